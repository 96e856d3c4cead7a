//! # Deckz Architecture
//!
//! Deckz is the **document model and edit engine** of a presentation builder:
//! an ordered list of slides, each holding a nested tree of content nodes,
//! plus the ordered outline cards that precede slide generation. It is a
//! library that happens to ship a CLI client, not the other way round.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, parses deck selectors         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Load a deck, run an edit through a DeckSession, save     │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                                │
//!                  ▼                                ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Core (deck, session,         │ │  Storage (store/)         │
//! │  ordering, drag, tree,        │ │  DataStore trait,         │
//! │  dispatch, ingest)            │ │  FileStore, InMemoryStore │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## The Core
//!
//! The core is synchronous, total and free of I/O. Every edit borrows the
//! current [`deck::DeckState`] and returns the next one:
//!
//! - [`ordering`]: splice-and-renumber for outline cards (1-based orders)
//!   and slides (0-based orders).
//! - [`drag`]: pointer geometry to insertion gaps, and the drag session that
//!   holds the dragged item until the drop.
//! - [`tree`]: copy-on-write payload replacement with structural sharing.
//! - [`dispatch`]: exhaustive node-kind dispatch to render instructions.
//! - [`ingest`]: the title repair applied to generated slides.
//!
//! Stale ids are no-ops and indices are clamped; the core never fails.
//! Errors ([`error::DeckzError`]) start at the storage and command layers.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Slide`, `ContentItem`, `OutlineCard`, `Deck`)
//! - [`deck`] / [`session`]: deck state transitions and their owner
//! - [`generation`]: parsing of generator output
//! - [`themes`]: theme presets
//! - [`index`]: deck display indexes and selectors
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod deck;
pub mod dispatch;
pub mod drag;
pub mod error;
pub mod generation;
pub mod index;
pub mod ingest;
pub mod model;
pub mod ordering;
pub mod session;
pub mod store;
pub mod themes;
pub mod tree;
