//! # Document Model
//!
//! The data types every other module reads and writes:
//!
//! - [`OutlineCard`]: one section of the outline that precedes slide generation.
//! - [`ContentItem`]: a node of a slide's content tree. Containers hold child
//!   nodes, leaves hold a terminal payload (text, lines or a text grid).
//! - [`Slide`]: one slide, owning exactly one root [`ContentItem`].
//! - [`Deck`]: the persisted presentation (metadata plus the full [`DeckState`]).
//!
//! Child nodes are held behind [`Arc`] so an edit can rebuild only the path to
//! the changed node and share every other subtree with the previous version
//! (see [`crate::tree`]).
//!
//! Field names serialize in camelCase so snapshots exchanged with the
//! generation and persistence collaborators keep their JSON shape.

use crate::deck::DeckState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Shared handle to a content node.
pub type NodeRef = Arc<ContentItem>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Project,
    Global,
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// --- Outline ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineCard {
    pub id: String,
    pub title: String,
    // Older snapshots stored the order as a string.
    #[serde(default, deserialize_with = "deserialize_order")]
    pub order: u32,
}

impl OutlineCard {
    pub fn new(title: impl Into<String>, order: u32) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            order,
        }
    }
}

fn deserialize_order<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawOrder {
        Number(u32),
        Text(String),
    }

    Ok(match RawOrder::deserialize(deserializer)? {
        RawOrder::Number(n) => n,
        RawOrder::Text(s) => s.trim().parse().unwrap_or(0),
    })
}

// --- Content tree ---

/// Payload shape a [`ContentKind`] expects in its `content` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Nodes,
    Text,
    Lines,
    Grid,
    Empty,
}

/// The closed set of node kinds.
///
/// Tags the kind table does not know deserialize to [`ContentKind::Unknown`],
/// keeping the original tag so the node survives a save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentKind {
    Column,
    ResizableColumn,
    Row,
    Text,
    Paragraph,
    Image,
    Table,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Title,
    NumberedList,
    BulletedList,
    TodoList,
    Blockquote,
    Quote,
    Code,
    CodeBlock,
    Link,
    Divider,
    CalloutBox,
    CustomButton,
    TableOfContents,
    Unknown(String),
}

impl ContentKind {
    pub fn as_str(&self) -> &str {
        match self {
            ContentKind::Column => "column",
            ContentKind::ResizableColumn => "resizable-column",
            ContentKind::Row => "row",
            ContentKind::Text => "text",
            ContentKind::Paragraph => "paragraph",
            ContentKind::Image => "image",
            ContentKind::Table => "table",
            ContentKind::Heading1 => "heading1",
            ContentKind::Heading2 => "heading2",
            ContentKind::Heading3 => "heading3",
            ContentKind::Heading4 => "heading4",
            ContentKind::Title => "title",
            ContentKind::NumberedList => "numberedList",
            ContentKind::BulletedList => "bulletedList",
            ContentKind::TodoList => "todoList",
            ContentKind::Blockquote => "blockquote",
            ContentKind::Quote => "quote",
            ContentKind::Code => "code",
            ContentKind::CodeBlock => "codeBlock",
            ContentKind::Link => "link",
            ContentKind::Divider => "divider",
            ContentKind::CalloutBox => "calloutBox",
            ContentKind::CustomButton => "customButton",
            ContentKind::TableOfContents => "tableOfContents",
            ContentKind::Unknown(tag) => tag,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            ContentKind::Column | ContentKind::ResizableColumn | ContentKind::Row => Shape::Nodes,
            ContentKind::NumberedList
            | ContentKind::BulletedList
            | ContentKind::TodoList
            | ContentKind::TableOfContents => Shape::Lines,
            ContentKind::Table => Shape::Grid,
            ContentKind::Divider | ContentKind::Unknown(_) => Shape::Empty,
            ContentKind::Text
            | ContentKind::Paragraph
            | ContentKind::Image
            | ContentKind::Heading1
            | ContentKind::Heading2
            | ContentKind::Heading3
            | ContentKind::Heading4
            | ContentKind::Title
            | ContentKind::Blockquote
            | ContentKind::Quote
            | ContentKind::Code
            | ContentKind::CodeBlock
            | ContentKind::Link
            | ContentKind::CalloutBox
            | ContentKind::CustomButton => Shape::Text,
        }
    }

    pub fn is_container(&self) -> bool {
        self.shape() == Shape::Nodes
    }

    /// Label used for `name` when a node is created without one.
    pub fn default_name(&self) -> &str {
        match self {
            ContentKind::Column => "Column",
            ContentKind::ResizableColumn => "Resizable Column",
            ContentKind::Row => "Row",
            ContentKind::Text => "Text",
            ContentKind::Paragraph => "Paragraph",
            ContentKind::Image => "Image",
            ContentKind::Table => "Table",
            ContentKind::Heading1 => "Heading1",
            ContentKind::Heading2 => "Heading2",
            ContentKind::Heading3 => "Heading3",
            ContentKind::Heading4 => "Heading4",
            ContentKind::Title => "Title",
            ContentKind::NumberedList => "Numbered List",
            ContentKind::BulletedList => "Bulleted List",
            ContentKind::TodoList => "Todo List",
            ContentKind::Blockquote => "Blockquote",
            ContentKind::Quote => "Quote",
            ContentKind::Code => "Code",
            ContentKind::CodeBlock => "Code Block",
            ContentKind::Link => "Link",
            ContentKind::Divider => "Divider",
            ContentKind::CalloutBox => "Callout",
            ContentKind::CustomButton => "Button",
            ContentKind::TableOfContents => "Table of Contents",
            ContentKind::Unknown(tag) => tag,
        }
    }
}

impl Default for ContentKind {
    /// Nodes without a `type` tag.
    fn default() -> Self {
        ContentKind::Unknown(String::new())
    }
}

impl From<String> for ContentKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "column" => ContentKind::Column,
            "resizable-column" => ContentKind::ResizableColumn,
            "row" => ContentKind::Row,
            "text" => ContentKind::Text,
            "paragraph" => ContentKind::Paragraph,
            "image" => ContentKind::Image,
            "table" => ContentKind::Table,
            "heading" | "heading1" => ContentKind::Heading1,
            "heading2" => ContentKind::Heading2,
            "heading3" => ContentKind::Heading3,
            "heading4" => ContentKind::Heading4,
            "title" => ContentKind::Title,
            "numberedList" => ContentKind::NumberedList,
            "bulletedList" | "bulletList" => ContentKind::BulletedList,
            "todoList" => ContentKind::TodoList,
            "blockquote" => ContentKind::Blockquote,
            "quote" => ContentKind::Quote,
            "code" => ContentKind::Code,
            "codeBlock" => ContentKind::CodeBlock,
            "link" => ContentKind::Link,
            "divider" => ContentKind::Divider,
            "calloutBox" => ContentKind::CalloutBox,
            "customButton" => ContentKind::CustomButton,
            "tableOfContents" => ContentKind::TableOfContents,
            _ => ContentKind::Unknown(tag),
        }
    }
}

impl From<ContentKind> for String {
    fn from(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Unknown(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CalloutKind {
    Success,
    Warning,
    Info,
    Question,
    Caution,
}

impl CalloutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalloutKind::Success => "success",
            CalloutKind::Warning => "warning",
            CalloutKind::Info => "info",
            CalloutKind::Question => "question",
            CalloutKind::Caution => "caution",
        }
    }
}

impl From<String> for CalloutKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "success" => CalloutKind::Success,
            "warning" => CalloutKind::Warning,
            "question" => CalloutKind::Question,
            "caution" => CalloutKind::Caution,
            _ => CalloutKind::Info,
        }
    }
}

impl From<CalloutKind> for String {
    fn from(kind: CalloutKind) -> Self {
        kind.as_str().to_string()
    }
}

/// The `content` field of a node.
///
/// Serialized untagged, so the JSON is just the bare string, array of nodes,
/// array of strings or array of string arrays. An empty JSON array always
/// reads back as `Nodes`; [`Content::lines`] and [`Content::grid`] accept it.
///
/// Deserialization never fails. A payload that fits none of the shapes is
/// kept verbatim as [`Content::Invalid`] and renders empty, and a child that
/// is not a readable node becomes an [`ContentKind::Unknown`] node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Nodes(Vec<NodeRef>),
    Lines(Vec<String>),
    Grid(Vec<Vec<String>>),
    Invalid(Value),
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Content::from_value(Value::deserialize(deserializer)?))
    }
}

// Numbers and booleans in list items and table cells are common in generated
// tables; they are kept as their text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

impl Content {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Content::Text(s),
            Value::Array(items) if items.is_empty() => Content::Nodes(Vec::new()),
            Value::Array(items) if items.iter().any(Value::is_object) => Content::Nodes(
                items
                    .into_iter()
                    .map(|item| Arc::new(ContentItem::from_value(item)))
                    .collect(),
            ),
            Value::Array(items) if items.iter().all(Value::is_array) => {
                let rows: Option<Vec<Vec<String>>> = items
                    .iter()
                    .map(|row| row.as_array()?.iter().map(scalar_text).collect())
                    .collect();
                match rows {
                    Some(rows) => Content::Grid(rows),
                    None => Content::Invalid(Value::Array(items)),
                }
            }
            Value::Array(items) => {
                let lines: Option<Vec<String>> = items.iter().map(scalar_text).collect();
                match lines {
                    Some(lines) => Content::Lines(lines),
                    None => Content::Invalid(Value::Array(items)),
                }
            }
            other => Content::Invalid(other),
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::Text(String::new())
    }
}

impl Content {
    pub fn text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn nodes(&self) -> Option<&[NodeRef]> {
        match self {
            Content::Nodes(children) => Some(children),
            _ => None,
        }
    }

    pub fn lines(&self) -> Option<&[String]> {
        match self {
            Content::Lines(lines) => Some(lines),
            Content::Nodes(children) if children.is_empty() => Some(&[]),
            _ => None,
        }
    }

    pub fn grid(&self) -> Option<&[Vec<String>]> {
        match self {
            Content::Grid(rows) => Some(rows),
            Content::Nodes(children) if children.is_empty() => Some(&[]),
            _ => None,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Content::Text(_) => Shape::Text,
            Content::Nodes(_) => Shape::Nodes,
            Content::Lines(_) => Shape::Lines,
            Content::Grid(_) => Shape::Grid,
            Content::Invalid(_) => Shape::Empty,
        }
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Text(s)
    }
}

impl From<Vec<String>> for Content {
    fn from(lines: Vec<String>) -> Self {
        Content::Lines(lines)
    }
}

impl From<Vec<Vec<String>>> for Content {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Content::Grid(rows)
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: ContentKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: Content,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_out_type: Option<CalloutKind>,
    /// Not a valid drop target for palette inserts.
    #[serde(default, skip_serializing_if = "is_false")]
    pub restrict_to_drop: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_columns: Option<u32>,
}

impl ContentItem {
    /// Reads a node from generated or stored JSON. A value that is not a
    /// readable node becomes an `Unknown` node carrying the raw payload.
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<ContentItem>(value.clone()) {
            Ok(item) => item,
            Err(e) => {
                log::warn!("unreadable content node kept as unknown: {}", e);
                let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
                let tag = field("type").unwrap_or_default();
                let content = value
                    .get("content")
                    .cloned()
                    .map(Content::Invalid)
                    .unwrap_or_default();
                let mut item = ContentItem::new(ContentKind::Unknown(tag), content);
                if let Some(id) = field("id") {
                    item.id = id;
                }
                item
            }
        }
    }

    pub fn new(kind: ContentKind, content: impl Into<Content>) -> Self {
        Self {
            id: new_id(),
            name: kind.default_name().to_string(),
            kind,
            content: content.into(),
            placeholder: None,
            class_name: None,
            alt: None,
            src: None,
            link: None,
            code: None,
            language: None,
            call_out_type: None,
            restrict_to_drop: false,
            initial_rows: None,
            initial_columns: None,
        }
    }

    pub fn container(kind: ContentKind, children: Vec<ContentItem>) -> Self {
        let children = children.into_iter().map(Arc::new).collect();
        Self::new(kind, Content::Nodes(children))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_restrict_to_drop(mut self, restrict: bool) -> Self {
        self.restrict_to_drop = restrict;
        self
    }

    /// Shallow copy with `content` swapped out. Every other field is kept.
    pub fn with_content(&self, content: Content) -> Self {
        Self {
            id: self.id.clone(),
            kind: self.kind.clone(),
            name: self.name.clone(),
            content,
            placeholder: self.placeholder.clone(),
            class_name: self.class_name.clone(),
            alt: self.alt.clone(),
            src: self.src.clone(),
            link: self.link.clone(),
            code: self.code.clone(),
            language: self.language.clone(),
            call_out_type: self.call_out_type,
            restrict_to_drop: self.restrict_to_drop,
            initial_rows: self.initial_rows,
            initial_columns: self.initial_columns,
        }
    }

    pub fn children(&self) -> &[NodeRef] {
        self.content.nodes().unwrap_or(&[])
    }
}

// --- Slides ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slide_name: String,
    #[serde(default, rename = "type")]
    pub layout: String,
    #[serde(deserialize_with = "deserialize_root")]
    pub content: NodeRef,
    #[serde(default)]
    pub slide_order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

fn deserialize_root<'de, D>(deserializer: D) -> Result<NodeRef, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Arc::new(ContentItem::from_value(Value::deserialize(deserializer)?)))
}

impl Slide {
    pub fn new(name: impl Into<String>, root: ContentItem) -> Self {
        Self {
            id: new_id(),
            slide_name: name.into(),
            layout: String::new(),
            content: Arc::new(root),
            slide_order: 0,
            class_name: None,
        }
    }
}

// --- Decks ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckMetadata {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub theme_name: Option<String>,
}

impl DeckMetadata {
    pub fn new(title: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title,
            theme_name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub metadata: DeckMetadata,
    pub state: DeckState,
}

impl Deck {
    pub fn new(title: String) -> Self {
        Self {
            metadata: DeckMetadata::new(title),
            state: DeckState::default(),
        }
    }

    /// Installs a new state snapshot and bumps `updated_at`.
    pub fn replace_state(&mut self, state: DeckState) {
        self.state = state;
        self.metadata.updated_at = Utc::now();
    }
}
