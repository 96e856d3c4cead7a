//! # Storage Layer
//!
//! The [`DataStore`] trait is the persistence seam. Commands only ever see
//! the trait, so the file store and the in-memory store are interchangeable.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one JSON file per deck plus a
//!   metadata index.
//! - [`memory::InMemoryStore`]: no persistence, used by tests.
//!
//! ## Scope Pattern
//!
//! All operations take a [`Scope`]:
//! - `Scope::Project`: a local `.deckz/` directory in the working directory
//! - `Scope::Global`: user-wide storage (`DECKZ_HOME` or the platform data dir)
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! .deckz/
//! ├── decks.json          # Metadata for all decks, keyed by id
//! ├── deck-{uuid}.json    # Full DeckState snapshot of one deck
//! └── config.json         # Scope configuration
//! ```
//!
//! Listing reads the index and each snapshot; a save always writes the whole
//! snapshot, never a partial patch.

use crate::error::Result;
use crate::model::{Deck, Scope};
use uuid::Uuid;

pub mod fs;
pub mod memory;

pub trait DataStore {
    /// Save a deck (create or update)
    fn save_deck(&mut self, deck: &Deck, scope: Scope) -> Result<()>;

    fn get_deck(&self, id: &Uuid, scope: Scope) -> Result<Deck>;

    fn list_decks(&self, scope: Scope) -> Result<Vec<Deck>>;

    /// Delete a deck permanently
    fn delete_deck(&mut self, id: &Uuid, scope: Scope) -> Result<()>;
}
