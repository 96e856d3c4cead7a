//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for all deckz operations, whatever UI drives them.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (deck selector strings become [`DeckSelector`]s,
//!   scope configuration is loaded and handed to the commands that need it)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It performs no business logic, no printing and no formatting.
//!
//! `DeckzApi<S: DataStore>` is generic over the storage backend:
//! - Production: `DeckzApi<FileStore>`
//! - Testing: `DeckzApi<InMemoryStore>`

use crate::commands;
use crate::config::DeckzConfig;
use crate::error::{DeckzError, Result};
use crate::index::{DeckSelector, DisplayDeck};
use crate::model::Scope;
use crate::session::DeckSession;
use crate::store::DataStore;

pub struct DeckzApi<S: DataStore> {
    store: S,
    paths: commands::DeckzPaths,
}

impl<S: DataStore> DeckzApi<S> {
    pub fn new(store: S, paths: commands::DeckzPaths) -> Self {
        Self { store, paths }
    }

    pub fn init(&self, scope: Scope) -> Result<commands::CmdResult> {
        commands::init::run(&self.paths, scope)
    }

    pub fn create_deck(
        &mut self,
        scope: Scope,
        title: String,
        theme: Option<String>,
    ) -> Result<commands::CmdResult> {
        let config = self.load_config(scope)?;
        commands::create::run(&mut self.store, scope, title, theme, &config.default_theme)
    }

    pub fn list_decks(&self, scope: Scope) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, scope)
    }

    pub fn delete_deck(&mut self, scope: Scope, deck: &str) -> Result<commands::CmdResult> {
        let selector = parse_selector(deck)?;
        commands::delete::run(&mut self.store, scope, &selector)
    }

    pub fn outline(
        &mut self,
        scope: Scope,
        deck: &str,
        action: OutlineAction,
    ) -> Result<commands::CmdResult> {
        let selector = parse_selector(deck)?;
        commands::outline::run(&mut self.store, scope, &selector, action)
    }

    pub fn slides(
        &mut self,
        scope: Scope,
        deck: &str,
        action: SlideAction,
    ) -> Result<commands::CmdResult> {
        let selector = parse_selector(deck)?;
        commands::slides::run(&mut self.store, scope, &selector, action)
    }

    pub fn ingest(&mut self, scope: Scope, deck: &str, raw: &str) -> Result<commands::CmdResult> {
        let selector = parse_selector(deck)?;
        let config = self.load_config(scope)?;
        commands::ingest::run(&mut self.store, scope, &selector, raw, config.repair_titles)
    }

    pub fn content(
        &mut self,
        scope: Scope,
        deck: &str,
        action: ContentAction,
    ) -> Result<commands::CmdResult> {
        let selector = parse_selector(deck)?;
        commands::content::run(&mut self.store, scope, &selector, action)
    }

    pub fn show(
        &self,
        scope: Scope,
        deck: &str,
        slide: Option<usize>,
        edit: bool,
    ) -> Result<commands::CmdResult> {
        let selector = parse_selector(deck)?;
        commands::show::run(&self.store, scope, &selector, slide, edit)
    }

    pub fn theme(
        &mut self,
        scope: Scope,
        deck: &str,
        action: ThemeAction,
    ) -> Result<commands::CmdResult> {
        let selector = parse_selector(deck)?;
        commands::theme::run(&mut self.store, scope, &selector, action)
    }

    pub fn config(&self, scope: Scope, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, scope, action)
    }

    /// Opens an edit session on a deck for pointer-driven clients. Drag
    /// sessions use the scope's configured `append_zone`.
    pub fn open_session(&self, scope: Scope, deck: &str) -> Result<(DisplayDeck, DeckSession)> {
        let selector = parse_selector(deck)?;
        let config = self.load_config(scope)?;
        let target = commands::helpers::resolve_deck(&self.store, scope, &selector)?;
        let session =
            DeckSession::new(target.deck.state.clone()).with_append_zone(config.append_zone);
        Ok((target, session))
    }

    /// Saves the state of a session opened with [`Self::open_session`].
    pub fn commit_session(
        &mut self,
        scope: Scope,
        deck: &str,
        session: DeckSession,
    ) -> Result<DisplayDeck> {
        let selector = parse_selector(deck)?;
        commands::helpers::edit_deck(&mut self.store, scope, &selector, |current| {
            *current = session;
        })
    }

    pub fn paths(&self) -> &commands::DeckzPaths {
        &self.paths
    }

    fn load_config(&self, scope: Scope) -> Result<DeckzConfig> {
        DeckzConfig::load(self.paths.scope_dir(scope)?)
    }
}

fn parse_selector(input: &str) -> Result<DeckSelector> {
    input.parse().map_err(DeckzError::Api)
}

pub use commands::config::ConfigAction;
pub use commands::content::{ContentAction, PayloadInput};
pub use commands::outline::OutlineAction;
pub use commands::slides::SlideAction;
pub use commands::theme::ThemeAction;
pub use commands::{CmdMessage, CmdResult, DeckzPaths, MessageLevel, RenderedSlide};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use tempfile::tempdir;

    fn api(dir: &std::path::Path) -> DeckzApi<InMemoryStore> {
        DeckzApi::new(
            InMemoryStore::new(),
            DeckzPaths {
                project: Some(dir.to_path_buf()),
                global: dir.join("global"),
            },
        )
    }

    #[test]
    fn create_uses_configured_default_theme() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());
        api.config(
            Scope::Project,
            ConfigAction::Set("default_theme".into(), "Coral".into()),
        )
        .unwrap();

        let result = api.create_deck(Scope::Project, "Talk".into(), None).unwrap();
        assert_eq!(
            result.deck.unwrap().deck.metadata.theme_name.as_deref(),
            Some("Coral")
        );
    }

    #[test]
    fn selectors_are_parsed() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());
        api.create_deck(Scope::Project, "Roadmap".into(), None).unwrap();

        assert!(api.outline(Scope::Project, "roadmap", OutlineAction::List).is_ok());
        assert!(api.outline(Scope::Project, "1", OutlineAction::List).is_ok());
        assert!(matches!(
            api.outline(Scope::Project, "0", OutlineAction::List),
            Err(DeckzError::Api(_))
        ));
    }

    #[test]
    fn session_drag_uses_configured_append_zone() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());
        api.config(
            Scope::Project,
            ConfigAction::Set("append_zone".into(), "50".into()),
        )
        .unwrap();
        api.create_deck(Scope::Project, "Drag".into(), None).unwrap();
        api.outline(
            Scope::Project,
            "1",
            OutlineAction::Import {
                raw: r#"{"outlines": ["A", "B", "C"]}"#.into(),
                replace: false,
            },
        )
        .unwrap();

        let (target, mut session) = api.open_session(Scope::Project, "1").unwrap();
        let first = target.deck.state.outlines[0].id.clone();
        session.start_outline_drag(&first);
        // 40px above the bottom of a 300px list: inside a 50px zone only
        let list = crate::drag::Rect::new(0.0, 300.0);
        assert_eq!(session.hover_outline_tail(list, 260.0), Some(3));
        session.drop_outline();

        let saved = api.commit_session(Scope::Project, "1", session).unwrap();
        let titles: Vec<_> = saved
            .deck
            .state
            .outlines
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, vec!["B", "C", "A"]);
    }

    #[test]
    fn outline_to_slides_flow() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());
        api.create_deck(Scope::Project, "Flow".into(), None).unwrap();
        api.outline(
            Scope::Project,
            "1",
            OutlineAction::Import {
                raw: r#"{"outlines": ["Hello"]}"#.into(),
                replace: false,
            },
        )
        .unwrap();

        let raw = r#"{"layouts": [{"slideName": "Hello", "content":
            {"id": "t", "type": "text", "name": "Text", "content": "hi"}}]}"#;
        let result = api.ingest(Scope::Project, "1", raw).unwrap();
        assert!(result
            .messages
            .iter()
            .all(|m| m.level != MessageLevel::Warning));

        let shown = api.show(Scope::Project, "1", None, false).unwrap();
        assert_eq!(shown.rendered.unwrap().slide_name, "Hello");
    }
}
