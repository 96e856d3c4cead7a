use super::DataStore;
use crate::deck::DeckState;
use crate::error::{DeckzError, Result};
use crate::model::{Deck, DeckMetadata, Scope};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const INDEX_FILENAME: &str = "decks.json";

pub struct FileStore {
    project_root: Option<PathBuf>,
    global_root: PathBuf,
}

impl FileStore {
    pub fn new(project_root: Option<PathBuf>, global_root: PathBuf) -> Self {
        Self {
            project_root,
            global_root,
        }
    }

    fn deck_filename(id: &Uuid) -> String {
        format!("deck-{}.json", id)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(DeckzError::Io)?;
        }
        Ok(())
    }

    fn get_store_path(&self, scope: Scope) -> Result<PathBuf> {
        let root = match scope {
            Scope::Project => self.project_root.as_ref().ok_or_else(|| {
                DeckzError::Store("No project scope available".to_string())
            })?,
            Scope::Global => &self.global_root,
        };
        Ok(root.clone())
    }

    fn load_metadata(&self, store_path: &Path) -> Result<HashMap<Uuid, DeckMetadata>> {
        let index_file = store_path.join(INDEX_FILENAME);
        if !index_file.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(index_file).map_err(DeckzError::Io)?;
        let meta: HashMap<Uuid, DeckMetadata> =
            serde_json::from_str(&content).map_err(DeckzError::Serialization)?;
        Ok(meta)
    }

    fn save_metadata(&self, store_path: &Path, meta: &HashMap<Uuid, DeckMetadata>) -> Result<()> {
        let index_file = store_path.join(INDEX_FILENAME);
        let content = serde_json::to_string_pretty(meta).map_err(DeckzError::Serialization)?;
        fs::write(index_file, content).map_err(DeckzError::Io)?;
        Ok(())
    }

    /// A missing snapshot file reads as an empty deck so that a stale index
    /// entry can still be listed and deleted.
    fn load_state(&self, store_path: &Path, id: &Uuid) -> Result<DeckState> {
        let path = store_path.join(Self::deck_filename(id));
        if !path.exists() {
            log::warn!("deck {} has no snapshot file, treating it as empty", id);
            return Ok(DeckState::default());
        }
        let content = fs::read_to_string(path).map_err(DeckzError::Io)?;
        let state = serde_json::from_str(&content).map_err(DeckzError::Serialization)?;
        Ok(state)
    }
}

impl DataStore for FileStore {
    fn save_deck(&mut self, deck: &Deck, scope: Scope) -> Result<()> {
        let root = self.get_store_path(scope)?;
        self.ensure_dir(&root)?;

        // 1. Update metadata index
        let mut meta_map = self.load_metadata(&root)?;
        meta_map.insert(deck.metadata.id, deck.metadata.clone());
        self.save_metadata(&root, &meta_map)?;

        // 2. Write the full snapshot
        let path = root.join(Self::deck_filename(&deck.metadata.id));
        let content = serde_json::to_string_pretty(&deck.state).map_err(DeckzError::Serialization)?;
        fs::write(path, content).map_err(DeckzError::Io)?;

        Ok(())
    }

    fn get_deck(&self, id: &Uuid, scope: Scope) -> Result<Deck> {
        let root = self.get_store_path(scope)?;

        let meta_map = self.load_metadata(&root)?;
        let metadata = meta_map.get(id).ok_or(DeckzError::DeckNotFound(*id))?.clone();
        let state = self.load_state(&root, id)?;

        Ok(Deck { metadata, state })
    }

    fn list_decks(&self, scope: Scope) -> Result<Vec<Deck>> {
        let root = self.get_store_path(scope)?;
        if !root.exists() {
            return Ok(Vec::new());
        }

        let meta_map = self.load_metadata(&root)?;
        let mut decks = Vec::with_capacity(meta_map.len());
        for (id, metadata) in meta_map {
            let state = self.load_state(&root, &id)?;
            decks.push(Deck { metadata, state });
        }

        Ok(decks)
    }

    fn delete_deck(&mut self, id: &Uuid, scope: Scope) -> Result<()> {
        let root = self.get_store_path(scope)?;

        let mut meta_map = self.load_metadata(&root)?;
        if meta_map.remove(id).is_none() {
            return Err(DeckzError::DeckNotFound(*id));
        }
        self.save_metadata(&root, &meta_map)?;

        let path = root.join(Self::deck_filename(id));
        if path.exists() {
            fs::remove_file(path).map_err(DeckzError::Io)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentItem, ContentKind, Slide};
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> FileStore {
        FileStore::new(Some(dir.join("project")), dir.join("global"))
    }

    #[test]
    fn save_and_get_round_trips_the_snapshot() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());

        let mut deck = Deck::new("Launch".to_string());
        let slide = Slide::new("Intro", ContentItem::new(ContentKind::Title, "Hello"));
        deck.replace_state(
            DeckState::default()
                .set_slides(vec![slide])
                .add_outlines(["Intro"]),
        );
        store.save_deck(&deck, Scope::Project).unwrap();

        let root = dir.path().join("project");
        assert!(root.join(INDEX_FILENAME).exists());
        assert!(root.join(FileStore::deck_filename(&deck.metadata.id)).exists());

        let loaded = store.get_deck(&deck.metadata.id, Scope::Project).unwrap();
        assert_eq!(loaded.metadata.title, "Launch");
        assert_eq!(loaded.state, deck.state);
    }

    #[test]
    fn scopes_are_separate() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());
        store
            .save_deck(&Deck::new("global".into()), Scope::Global)
            .unwrap();

        assert_eq!(store.list_decks(Scope::Global).unwrap().len(), 1);
        assert!(store.list_decks(Scope::Project).unwrap().is_empty());
    }

    #[test]
    fn missing_project_scope_is_an_error() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(None, dir.path().to_path_buf());
        assert!(matches!(
            store.list_decks(Scope::Project),
            Err(DeckzError::Store(_))
        ));
    }

    #[test]
    fn delete_removes_index_entry_and_file() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());
        let deck = Deck::new("gone".into());
        store.save_deck(&deck, Scope::Project).unwrap();

        store.delete_deck(&deck.metadata.id, Scope::Project).unwrap();
        assert!(store.list_decks(Scope::Project).unwrap().is_empty());
        assert!(!dir
            .path()
            .join("project")
            .join(FileStore::deck_filename(&deck.metadata.id))
            .exists());
        assert!(matches!(
            store.delete_deck(&deck.metadata.id, Scope::Project),
            Err(DeckzError::DeckNotFound(_))
        ));
    }

    #[test]
    fn missing_snapshot_reads_as_empty() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());
        let deck = Deck::new("orphan".into());
        store.save_deck(&deck, Scope::Project).unwrap();
        fs::remove_file(
            dir.path()
                .join("project")
                .join(FileStore::deck_filename(&deck.metadata.id)),
        )
        .unwrap();

        let loaded = store.get_deck(&deck.metadata.id, Scope::Project).unwrap();
        assert!(loaded.state.slides.is_empty());
    }

    #[test]
    fn malformed_node_in_a_snapshot_still_lists() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());
        let healthy = Deck::new("healthy".into());
        let damaged = Deck::new("damaged".into());
        store.save_deck(&healthy, Scope::Project).unwrap();
        store.save_deck(&damaged, Scope::Project).unwrap();

        let snapshot = r#"{"slides": [{"id": "s", "slideName": "One", "slideOrder": 0,
            "content": {"id": "c", "type": "column", "content": [
                {"id": "t", "type": "title", "content": "Still here"},
                {"id": "b", "type": "table", "content": [["x", {"oops": true}]]}
            ]}}], "outlines": [], "currentSlide": 0}"#;
        fs::write(
            dir.path()
                .join("project")
                .join(FileStore::deck_filename(&damaged.metadata.id)),
            snapshot,
        )
        .unwrap();

        assert_eq!(store.list_decks(Scope::Project).unwrap().len(), 2);
        let loaded = store.get_deck(&damaged.metadata.id, Scope::Project).unwrap();
        let children = loaded.state.slides[0].content.children();
        assert_eq!(children[0].content.text(), Some("Still here"));
        assert!(matches!(children[1].content, crate::model::Content::Invalid(_)));
    }
}
