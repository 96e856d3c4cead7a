//! # Content Dispatcher
//!
//! Walks a content tree and produces an [`Instruction`] tree for a rendering
//! collaborator. The dispatch is an exhaustive `match` on [`ContentKind`], so
//! a new kind does not compile until it has a renderer.
//!
//! Containers render their children in order. In [`RenderMode::Editing`] the
//! children are interleaved with [`Instruction::DropZone`] markers (one before
//! each child that accepts drops, and one after the last child) which the
//! editor turns into palette drop targets.
//!
//! Rendering is fail-soft: unknown kinds and leaves whose payload has the wrong
//! shape become [`Instruction::Empty`] instead of taking the slide down.

use crate::model::{CalloutKind, ContentItem, ContentKind, Slide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Read-only presentation.
    #[default]
    Presenting,
    /// Editable canvas with drop-zone markers.
    Editing,
    /// Thumbnails and layout previews; never shows markers.
    Preview,
}

impl RenderMode {
    pub fn shows_drop_zones(&self) -> bool {
        matches!(self, RenderMode::Editing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Heading(u8),
    Text,
    Paragraph,
    Quote,
    Blockquote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Numbered,
    Bulleted,
    Todo,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Stack {
        id: String,
        axis: Axis,
        resizable: bool,
        children: Vec<Instruction>,
    },
    DropZone {
        container_id: String,
        index: usize,
    },
    TextBlock {
        id: String,
        role: TextRole,
        text: String,
        placeholder: Option<String>,
    },
    Image {
        id: String,
        src: String,
        alt: Option<String>,
    },
    Table {
        id: String,
        rows: Vec<Vec<String>>,
    },
    List {
        id: String,
        style: ListStyle,
        items: Vec<String>,
    },
    Code {
        id: String,
        language: Option<String>,
        code: String,
    },
    Link {
        id: String,
        href: String,
        text: String,
    },
    Divider {
        id: String,
    },
    Callout {
        id: String,
        kind: CalloutKind,
        text: String,
    },
    Button {
        id: String,
        label: String,
        link: Option<String>,
    },
    TableOfContents {
        id: String,
        entries: Vec<String>,
    },
    Empty,
}

impl Instruction {
    pub fn is_empty(&self) -> bool {
        matches!(self, Instruction::Empty)
    }

    pub fn children(&self) -> &[Instruction] {
        match self {
            Instruction::Stack { children, .. } => children.as_slice(),
            _ => &[],
        }
    }

    /// Every drop-zone marker in the tree as `(container_id, index)`.
    pub fn drop_zones(&self) -> Vec<(String, usize)> {
        let mut zones = Vec::new();
        collect_drop_zones(self, &mut zones);
        zones
    }
}

fn collect_drop_zones(instruction: &Instruction, zones: &mut Vec<(String, usize)>) {
    match instruction {
        Instruction::DropZone {
            container_id,
            index,
        } => zones.push((container_id.clone(), *index)),
        Instruction::Stack { children, .. } => {
            for child in children {
                collect_drop_zones(child, zones);
            }
        }
        _ => {}
    }
}

pub fn render_slide(slide: &Slide, mode: RenderMode) -> Instruction {
    render(&slide.content, mode)
}

pub fn render(node: &ContentItem, mode: RenderMode) -> Instruction {
    match &node.kind {
        ContentKind::Column => stack(node, Axis::Vertical, false, mode),
        ContentKind::Row => stack(node, Axis::Horizontal, false, mode),
        ContentKind::ResizableColumn => stack(node, Axis::Horizontal, true, mode),
        ContentKind::Title => text_block(node, TextRole::Title),
        ContentKind::Heading1 => text_block(node, TextRole::Heading(1)),
        ContentKind::Heading2 => text_block(node, TextRole::Heading(2)),
        ContentKind::Heading3 => text_block(node, TextRole::Heading(3)),
        ContentKind::Heading4 => text_block(node, TextRole::Heading(4)),
        ContentKind::Text => text_block(node, TextRole::Text),
        ContentKind::Paragraph => text_block(node, TextRole::Paragraph),
        ContentKind::Quote => text_block(node, TextRole::Quote),
        ContentKind::Blockquote => text_block(node, TextRole::Blockquote),
        ContentKind::NumberedList => list(node, ListStyle::Numbered),
        ContentKind::BulletedList => list(node, ListStyle::Bulleted),
        ContentKind::TodoList => list(node, ListStyle::Todo),
        ContentKind::Image => image(node),
        ContentKind::Table => match node.content.grid() {
            Some(rows) => Instruction::Table {
                id: node.id.clone(),
                rows: rows.to_vec(),
            },
            None => degraded(node),
        },
        ContentKind::Code | ContentKind::CodeBlock => code(node),
        ContentKind::Link => match node.content.text() {
            Some(text) => Instruction::Link {
                id: node.id.clone(),
                href: node.link.clone().unwrap_or_default(),
                text: text.to_string(),
            },
            None => degraded(node),
        },
        ContentKind::Divider => Instruction::Divider {
            id: node.id.clone(),
        },
        ContentKind::CalloutBox => match node.content.text() {
            Some(text) => Instruction::Callout {
                id: node.id.clone(),
                kind: node.call_out_type.unwrap_or(CalloutKind::Info),
                text: text.to_string(),
            },
            None => degraded(node),
        },
        ContentKind::CustomButton => match node.content.text() {
            Some(label) => Instruction::Button {
                id: node.id.clone(),
                label: label.to_string(),
                link: node.link.clone(),
            },
            None => degraded(node),
        },
        ContentKind::TableOfContents => match node.content.lines() {
            Some(entries) => Instruction::TableOfContents {
                id: node.id.clone(),
                entries: entries.to_vec(),
            },
            None => degraded(node),
        },
        ContentKind::Unknown(tag) => {
            log::debug!("render: unknown node kind '{}' ({})", tag, node.id);
            Instruction::Empty
        }
    }
}

fn degraded(node: &ContentItem) -> Instruction {
    log::debug!(
        "render: {} node {} has a {:?} payload",
        node.kind,
        node.id,
        node.content.shape()
    );
    Instruction::Empty
}

fn stack(node: &ContentItem, axis: Axis, resizable: bool, mode: RenderMode) -> Instruction {
    let Some(children) = node.content.nodes() else {
        return degraded(node);
    };

    let mut rendered = Vec::with_capacity(children.len() * 2 + 1);
    for (index, child) in children.iter().enumerate() {
        if mode.shows_drop_zones() && !child.restrict_to_drop {
            rendered.push(Instruction::DropZone {
                container_id: node.id.clone(),
                index,
            });
        }
        rendered.push(render(child, mode));
    }
    if mode.shows_drop_zones() {
        rendered.push(Instruction::DropZone {
            container_id: node.id.clone(),
            index: children.len(),
        });
    }

    Instruction::Stack {
        id: node.id.clone(),
        axis,
        resizable,
        children: rendered,
    }
}

fn text_block(node: &ContentItem, role: TextRole) -> Instruction {
    match node.content.text() {
        Some(text) => Instruction::TextBlock {
            id: node.id.clone(),
            role,
            text: text.to_string(),
            placeholder: node.placeholder.clone(),
        },
        None => degraded(node),
    }
}

fn list(node: &ContentItem, style: ListStyle) -> Instruction {
    match node.content.lines() {
        Some(items) => Instruction::List {
            id: node.id.clone(),
            style,
            items: items.to_vec(),
        },
        None => degraded(node),
    }
}

// Generated layouts put the image URL either in `src` or in `content`.
fn image(node: &ContentItem) -> Instruction {
    let src = node
        .src
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| node.content.text().map(str::to_string));
    match src {
        Some(src) => Instruction::Image {
            id: node.id.clone(),
            src,
            alt: node.alt.clone(),
        },
        None => degraded(node),
    }
}

fn code(node: &ContentItem) -> Instruction {
    let body = node
        .code
        .clone()
        .or_else(|| node.content.text().map(str::to_string));
    match body {
        Some(code) => Instruction::Code {
            id: node.id.clone(),
            language: node.language.clone(),
            code,
        },
        None => degraded(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Content, ContentItem, ContentKind};

    fn leaf(kind: ContentKind, id: &str, content: Content) -> ContentItem {
        ContentItem::new(kind, content).with_id(id)
    }

    fn column(children: Vec<ContentItem>) -> ContentItem {
        ContentItem::container(ContentKind::Column, children).with_id("col")
    }

    #[test]
    fn leaves_map_to_one_instruction_each() {
        let title = render(&leaf(ContentKind::Title, "t", "Hello".into()), RenderMode::Presenting);
        assert_eq!(
            title,
            Instruction::TextBlock {
                id: "t".into(),
                role: TextRole::Title,
                text: "Hello".into(),
                placeholder: None,
            }
        );

        let list = render(
            &leaf(ContentKind::BulletedList, "l", vec!["a".to_string()].into()),
            RenderMode::Presenting,
        );
        assert!(matches!(list, Instruction::List { style: ListStyle::Bulleted, .. }));

        let divider = render(&leaf(ContentKind::Divider, "d", Content::default()), RenderMode::Presenting);
        assert_eq!(divider, Instruction::Divider { id: "d".into() });
    }

    #[test]
    fn unknown_kinds_render_empty() {
        let node = leaf(ContentKind::Unknown("sparkles".into()), "x", "?".into());
        assert!(render(&node, RenderMode::Editing).is_empty());
    }

    #[test]
    fn wrong_payload_shape_degrades_only_that_node() {
        let slide = column(vec![
            leaf(ContentKind::Table, "bad", "not a grid".into()),
            leaf(ContentKind::Text, "good", "fine".into()),
        ]);
        let rendered = render(&slide, RenderMode::Presenting);
        let children = rendered.children();
        assert_eq!(children.len(), 2);
        assert!(children[0].is_empty());
        assert!(matches!(children[1], Instruction::TextBlock { .. }));
    }

    #[test]
    fn editing_interleaves_drop_zones() {
        let slide = column(vec![
            leaf(ContentKind::Text, "a", "A".into()),
            leaf(ContentKind::Text, "b", "B".into()),
        ]);
        let rendered = render(&slide, RenderMode::Editing);
        assert_eq!(
            rendered.drop_zones(),
            vec![("col".into(), 0), ("col".into(), 1), ("col".into(), 2)]
        );
        assert!(matches!(rendered.children()[0], Instruction::DropZone { .. }));
        assert!(matches!(rendered.children()[4], Instruction::DropZone { index: 2, .. }));
    }

    #[test]
    fn restricted_children_get_no_leading_zone() {
        let slide = column(vec![
            leaf(ContentKind::Title, "t", "T".into()).with_restrict_to_drop(true),
            leaf(ContentKind::Text, "a", "A".into()),
        ]);
        let rendered = render(&slide, RenderMode::Editing);
        assert_eq!(
            rendered.drop_zones(),
            vec![("col".into(), 1), ("col".into(), 2)]
        );
    }

    #[test]
    fn preview_and_presenting_have_no_markers() {
        let slide = column(vec![leaf(ContentKind::Text, "a", "A".into())]);
        assert!(render(&slide, RenderMode::Preview).drop_zones().is_empty());
        assert!(render(&slide, RenderMode::Presenting).drop_zones().is_empty());
    }

    #[test]
    fn image_source_falls_back_to_content() {
        let mut node = leaf(ContentKind::Image, "img", "https://example.com/a.png".into());
        node.alt = Some("A chart".into());
        match render(&node, RenderMode::Presenting) {
            Instruction::Image { src, alt, .. } => {
                assert_eq!(src, "https://example.com/a.png");
                assert_eq!(alt.as_deref(), Some("A chart"));
            }
            other => panic!("expected image, got {:?}", other),
        }
    }
}
