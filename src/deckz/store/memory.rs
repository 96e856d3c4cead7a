use super::DataStore;
use crate::error::{DeckzError, Result};
use crate::model::{Deck, Scope};
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    decks: HashMap<(Scope, Uuid), Deck>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataStore for InMemoryStore {
    fn save_deck(&mut self, deck: &Deck, scope: Scope) -> Result<()> {
        self.decks.insert((scope, deck.metadata.id), deck.clone());
        Ok(())
    }

    fn get_deck(&self, id: &Uuid, scope: Scope) -> Result<Deck> {
        self.decks
            .get(&(scope, *id))
            .cloned()
            .ok_or(DeckzError::DeckNotFound(*id))
    }

    fn list_decks(&self, scope: Scope) -> Result<Vec<Deck>> {
        Ok(self
            .decks
            .iter()
            .filter(|((s, _), _)| *s == scope)
            .map(|(_, d)| d.clone())
            .collect())
    }

    fn delete_deck(&mut self, id: &Uuid, scope: Scope) -> Result<()> {
        if self.decks.remove(&(scope, *id)).is_none() {
            return Err(DeckzError::DeckNotFound(*id));
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::deck::DeckState;
    use crate::model::{ContentItem, ContentKind, Slide};
    use chrono::{Duration, Utc};

    /// A slide shaped like generator output: column > [title, text].
    pub fn titled_slide(name: &str, body: &str) -> Slide {
        Slide::new(
            name,
            ContentItem::container(
                ContentKind::Column,
                vec![
                    ContentItem::new(ContentKind::Title, name),
                    ContentItem::new(ContentKind::Text, body),
                ],
            ),
        )
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
        saved: i64,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                saved: 0,
            }
        }

        /// Each saved deck is one minute newer than the previous one, so the
        /// last deck added gets display index 1.
        fn save(&mut self, mut deck: Deck, scope: Scope) {
            self.saved += 1;
            deck.metadata.updated_at = Utc::now() - Duration::hours(1) + Duration::minutes(self.saved);
            self.store.save_deck(&deck, scope).unwrap();
        }

        pub fn with_decks(mut self, count: usize, scope: Scope) -> Self {
            for i in 0..count {
                self.save(Deck::new(format!("Test Deck {}", i + 1)), scope);
            }
            self
        }

        pub fn with_outlined_deck(mut self, title: &str, outlines: &[&str], scope: Scope) -> Self {
            let mut deck = Deck::new(title.to_string());
            deck.state = DeckState::default().add_outlines(outlines.iter().copied());
            self.save(deck, scope);
            self
        }

        pub fn with_slide_deck(mut self, title: &str, slide_names: &[&str], scope: Scope) -> Self {
            let mut deck = Deck::new(title.to_string());
            let slides = slide_names
                .iter()
                .map(|name| titled_slide(name, &format!("About {}", name)))
                .collect();
            deck.state = DeckState::default()
                .add_outlines(slide_names.iter().copied())
                .set_slides(slides);
            self.save(deck, scope);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_are_isolated() {
        let mut store = InMemoryStore::new();
        let deck = Deck::new("Shared".into());
        store.save_deck(&deck, Scope::Project).unwrap();

        assert_eq!(store.list_decks(Scope::Project).unwrap().len(), 1);
        assert!(store.list_decks(Scope::Global).unwrap().is_empty());
        assert!(matches!(
            store.get_deck(&deck.metadata.id, Scope::Global),
            Err(DeckzError::DeckNotFound(_))
        ));
    }

    #[test]
    fn save_overwrites_and_delete_removes() {
        let mut store = InMemoryStore::new();
        let mut deck = Deck::new("Draft".into());
        store.save_deck(&deck, Scope::Project).unwrap();
        deck.metadata.title = "Final".into();
        store.save_deck(&deck, Scope::Project).unwrap();

        let loaded = store.get_deck(&deck.metadata.id, Scope::Project).unwrap();
        assert_eq!(loaded.metadata.title, "Final");

        store.delete_deck(&deck.metadata.id, Scope::Project).unwrap();
        assert!(store.delete_deck(&deck.metadata.id, Scope::Project).is_err());
    }

    #[test]
    fn fixture_decks_get_increasing_timestamps() {
        let store = fixtures::StoreFixture::new()
            .with_decks(3, Scope::Project)
            .store;
        let mut decks = store.list_decks(Scope::Project).unwrap();
        decks.sort_by_key(|d| d.metadata.updated_at);
        let titles: Vec<_> = decks.iter().map(|d| d.metadata.title.as_str()).collect();
        assert_eq!(titles, vec!["Test Deck 1", "Test Deck 2", "Test Deck 3"]);
    }
}
