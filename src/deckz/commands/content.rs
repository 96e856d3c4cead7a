//! Content tree edits on one slide.
//!
//! The core ignores unknown node ids; here they are reported back to the
//! user instead, since a typo on the command line is not a stale UI event.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DeckzError, Result};
use crate::index::DeckSelector;
use crate::model::{Content, ContentItem, ContentKind, Scope, Shape};
use crate::store::DataStore;
use crate::tree;

use super::helpers::{edit_deck, resolve_deck, slide_at};

/// A payload as typed on the command line.
#[derive(Debug, Clone)]
pub enum PayloadInput {
    /// Interpreted by the target's kind: text joins the values, lists take
    /// one value per line, tables one value per row with `,` between cells.
    Values(Vec<String>),
    /// A raw JSON payload (`"text"`, `["a", "b"]`, `[["a"]]`).
    Json(String),
}

#[derive(Debug, Clone)]
pub enum ContentAction {
    Set {
        slide: usize,
        node_id: String,
        payload: PayloadInput,
    },
    Insert {
        slide: usize,
        container_id: String,
        index: Option<usize>,
        kind: String,
        text: Option<String>,
    },
    Remove {
        slide: usize,
        node_id: String,
    },
}

pub fn run<S: DataStore>(
    store: &mut S,
    scope: Scope,
    selector: &DeckSelector,
    action: ContentAction,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let state = resolve_deck(store, scope, selector)?.deck.state;

    let updated = match action {
        ContentAction::Set {
            slide,
            node_id,
            payload,
        } => {
            let target = slide_at(&state, slide)?.clone();
            let Some(node) = tree::find(&target.content, &node_id) else {
                return Err(node_not_found(&node_id, slide));
            };
            let payload = build_payload(&node.kind, payload)?;
            if payload.shape() != node.kind.shape() {
                result.add_message(CmdMessage::warning(format!(
                    "A {:?} payload does not fit a {} node; it will render empty",
                    payload.shape(),
                    node.kind
                )));
            }
            let updated = edit_deck(store, scope, selector, |session| {
                session.mutate_slide_content(&target.id, &node_id, payload);
            })?;
            result.add_message(CmdMessage::success(format!("Updated {}", node_id)));
            updated
        }
        ContentAction::Insert {
            slide,
            container_id,
            index,
            kind,
            text,
        } => {
            let target = slide_at(&state, slide)?.clone();
            let Some(container) = tree::find(&target.content, &container_id) else {
                return Err(node_not_found(&container_id, slide));
            };
            if !container.kind.is_container() {
                return Err(DeckzError::Api(format!(
                    "{} is a {} node and cannot hold blocks",
                    container_id, container.kind
                )));
            }
            let kind = ContentKind::from(kind);
            if let ContentKind::Unknown(tag) = &kind {
                return Err(DeckzError::Api(format!("Unknown block type: {}", tag)));
            }

            let block = palette_block(kind, text);
            let index = index.unwrap_or(container.children().len());
            let updated = edit_deck(store, scope, selector, |session| {
                session.insert_block(&target.id, &container_id, index, &block);
            })?;
            result.add_message(CmdMessage::success(format!(
                "Inserted {} into {}",
                block.kind, container_id
            )));
            updated
        }
        ContentAction::Remove { slide, node_id } => {
            let target = slide_at(&state, slide)?.clone();
            if tree::find_parent(&target.content, &node_id).is_none() {
                return Err(if tree::find(&target.content, &node_id).is_some() {
                    DeckzError::Api("The root node of a slide cannot be removed".to_string())
                } else {
                    node_not_found(&node_id, slide)
                });
            }
            let updated = edit_deck(store, scope, selector, |session| {
                session.apply(|s| s.remove_block(&target.id, &node_id));
            })?;
            result.add_message(CmdMessage::success(format!("Removed {}", node_id)));
            updated
        }
    };

    Ok(result.with_deck(updated))
}

fn node_not_found(id: &str, slide: usize) -> DeckzError {
    DeckzError::Api(format!("No node {} on slide {}", id, slide))
}

pub fn build_payload(kind: &ContentKind, input: PayloadInput) -> Result<Content> {
    match input {
        PayloadInput::Json(raw) => match serde_json::from_str(&raw) {
            Ok(Content::Invalid(value)) => Err(DeckzError::Api(format!(
                "Payload must be text, a list of strings or a list of rows, got {}",
                value
            ))),
            Ok(content) => Ok(content),
            Err(e) => Err(DeckzError::Api(format!("Invalid JSON payload: {}", e))),
        },
        PayloadInput::Values(values) => Ok(match kind.shape() {
            Shape::Lines => Content::Lines(values),
            Shape::Grid => Content::Grid(
                values
                    .iter()
                    .map(|row| row.split(',').map(|cell| cell.trim().to_string()).collect())
                    .collect(),
            ),
            Shape::Nodes => {
                return Err(DeckzError::Api(format!(
                    "{} holds other nodes; use --json or content insert",
                    kind
                )))
            }
            Shape::Text | Shape::Empty => Content::Text(values.join(" ")),
        }),
    }
}

/// A fresh block as the editor palette creates it.
pub fn palette_block(kind: ContentKind, text: Option<String>) -> ContentItem {
    let text = text.unwrap_or_default();
    let content = match kind.shape() {
        Shape::Nodes => Content::Nodes(Vec::new()),
        Shape::Lines if text.is_empty() => Content::Lines(vec![String::new()]),
        Shape::Lines => Content::Lines(text.lines().map(str::to_string).collect()),
        Shape::Grid => Content::Grid(vec![vec![String::new(); 2]; 2]),
        Shape::Text | Shape::Empty => Content::Text(text),
    };
    let mut block = ContentItem::new(kind, content);
    if block.kind == ContentKind::Table {
        block.initial_rows = Some(2);
        block.initial_columns = Some(2);
    }
    block
}
