use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::generation;
use crate::index::DeckSelector;
use crate::model::Scope;
use crate::store::DataStore;

use super::helpers::{edit_deck, outline_at, outline_index, resolve_deck};

/// Outline card edits. Positions are 1-based, as shown by `outline list`.
#[derive(Debug, Clone)]
pub enum OutlineAction {
    List,
    Add { title: String, after: Option<usize> },
    Rename { position: usize, title: String },
    Remove { position: usize },
    Move { from: usize, to: usize },
    /// Raw generator output holding `{"outlines": [...]}`.
    Import { raw: String, replace: bool },
    Reset,
}

pub fn run<S: DataStore>(
    store: &mut S,
    scope: Scope,
    selector: &DeckSelector,
    action: OutlineAction,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let updated = match action {
        OutlineAction::List => {
            let target = resolve_deck(store, scope, selector)?;
            if target.deck.state.outlines.is_empty() {
                result.add_message(CmdMessage::info("No outline cards yet"));
            }
            return Ok(result.with_deck(target));
        }
        OutlineAction::Add { title, after } => {
            // `--after 0` puts the card first
            let front = after == Some(0);
            let after_index = match after {
                Some(position) if position > 0 => {
                    let state = resolve_deck(store, scope, selector)?.deck.state;
                    Some(outline_index(&state, position)?)
                }
                _ => None,
            };
            let updated = edit_deck(store, scope, selector, |session| {
                session.apply(|s| {
                    let added = s.add_outline(&title, after_index);
                    if front {
                        let last = added.outlines.len() - 1;
                        added.reorder_outline(last, 0)
                    } else {
                        added
                    }
                });
            })?;
            result.add_message(CmdMessage::success("Outline card added"));
            updated
        }
        OutlineAction::Rename { position, title } => {
            let state = resolve_deck(store, scope, selector)?.deck.state;
            let card = outline_at(&state, position)?.clone();
            let updated = edit_deck(store, scope, selector, |session| {
                session.apply(|s| s.rename_outline(&card.id, &title));
            })?;
            result.add_message(CmdMessage::success(format!(
                "Renamed card {}: {} -> {}",
                position, card.title, title
            )));
            updated
        }
        OutlineAction::Remove { position } => {
            let state = resolve_deck(store, scope, selector)?.deck.state;
            let card = outline_at(&state, position)?.clone();
            let updated = edit_deck(store, scope, selector, |session| {
                session.apply(|s| s.remove_outline(&card.id));
            })?;
            result.add_message(CmdMessage::success(format!(
                "Removed card {}: {}",
                position, card.title
            )));
            updated
        }
        OutlineAction::Move { from, to } => {
            let state = resolve_deck(store, scope, selector)?.deck.state;
            let from_index = outline_index(&state, from)?;
            let to_index = to.saturating_sub(1);
            let updated = edit_deck(store, scope, selector, |session| {
                session.apply(|s| s.reorder_outline(from_index, to_index));
            })?;
            result.add_message(CmdMessage::success(format!(
                "Moved card {} to position {}",
                from,
                to_index.min(state.outlines.len() - 1) + 1
            )));
            updated
        }
        OutlineAction::Import { raw, replace } => {
            let titles = generation::parse_outlines(&raw)?;
            let count = titles.len();
            let updated = edit_deck(store, scope, selector, |session| {
                session.apply(|s| {
                    let base = if replace { s.reset_outlines() } else { s.clone() };
                    base.add_outlines(titles)
                });
            })?;
            result.add_message(CmdMessage::success(format!(
                "Imported {} outline cards",
                count
            )));
            updated
        }
        OutlineAction::Reset => {
            let updated = edit_deck(store, scope, selector, |session| {
                session.apply(|s| s.reset_outlines());
            })?;
            result.add_message(CmdMessage::success("Outline cleared"));
            updated
        }
    };

    Ok(result.with_deck(updated))
}
