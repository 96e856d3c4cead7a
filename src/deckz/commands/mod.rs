use crate::config::DeckzConfig;
use crate::dispatch::Instruction;
use crate::error::{DeckzError, Result};
use crate::index::DisplayDeck;
use crate::model::Scope;
use crate::themes::Theme;
use std::path::PathBuf;

pub mod config;
pub mod content;
pub mod create;
pub mod delete;
pub mod helpers;
pub mod ingest;
pub mod init;
pub mod list;
pub mod outline;
pub mod show;
pub mod slides;
pub mod theme;

#[derive(Debug, Clone)]
pub struct DeckzPaths {
    pub project: Option<PathBuf>,
    pub global: PathBuf,
}

impl DeckzPaths {
    pub fn scope_dir(&self, scope: Scope) -> Result<PathBuf> {
        match scope {
            Scope::Project => self
                .project
                .clone()
                .ok_or_else(|| DeckzError::Store("Project scope is not available".to_string())),
            Scope::Global => Ok(self.global.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Dispatcher output for one slide, as shown by `show`.
#[derive(Debug, Clone)]
pub struct RenderedSlide {
    /// 1-based position in the deck
    pub position: usize,
    pub slide_name: String,
    pub instruction: Instruction,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// The deck a command read or changed, after the change.
    pub deck: Option<DisplayDeck>,
    pub listed_decks: Vec<DisplayDeck>,
    pub rendered: Option<RenderedSlide>,
    pub themes: Vec<Theme>,
    pub config: Option<DeckzConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_deck(mut self, deck: DisplayDeck) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn with_listed_decks(mut self, decks: Vec<DisplayDeck>) -> Self {
        self.listed_decks = decks;
        self
    }

    pub fn with_rendered(mut self, rendered: RenderedSlide) -> Self {
        self.rendered = Some(rendered);
        self
    }

    pub fn with_themes(mut self, themes: Vec<Theme>) -> Self {
        self.themes = themes;
        self
    }

    pub fn with_config(mut self, config: DeckzConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}
