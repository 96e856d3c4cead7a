use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DeckzError, Result};
use crate::generation;
use crate::index::DeckSelector;
use crate::model::{Scope, Slide};
use crate::store::DataStore;
use crate::tree;

use super::helpers::{edit_deck, resolve_deck, slide_at, slide_index};

/// Slide list edits. Positions are 1-based, as shown by `slides list`.
#[derive(Debug, Clone)]
pub enum SlideAction {
    List,
    Move { from: usize, to: usize },
    Remove { position: usize },
    Select { position: usize },
    /// A single slide JSON object, or generator output holding
    /// `{"layouts": [...]}` (the first layout is used).
    Insert { raw: String, position: Option<usize> },
}

pub fn run<S: DataStore>(
    store: &mut S,
    scope: Scope,
    selector: &DeckSelector,
    action: SlideAction,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let updated = match action {
        SlideAction::List => {
            let target = resolve_deck(store, scope, selector)?;
            if target.deck.state.slides.is_empty() {
                result.add_message(CmdMessage::info("No slides yet"));
            }
            return Ok(result.with_deck(target));
        }
        SlideAction::Move { from, to } => {
            let state = resolve_deck(store, scope, selector)?.deck.state;
            let from_index = slide_index(&state, from)?;
            let to_index = to.saturating_sub(1);
            let updated = edit_deck(store, scope, selector, |session| {
                session.apply(|s| s.reorder_slide(from_index, to_index));
            })?;
            result.add_message(CmdMessage::success(format!(
                "Moved slide {} to position {}",
                from,
                to_index.min(state.slides.len() - 1) + 1
            )));
            updated
        }
        SlideAction::Remove { position } => {
            let state = resolve_deck(store, scope, selector)?.deck.state;
            let slide = slide_at(&state, position)?.clone();
            let updated = edit_deck(store, scope, selector, |session| {
                session.apply(|s| s.remove_slide(&slide.id));
            })?;
            result.add_message(CmdMessage::success(format!(
                "Removed slide {}: {}",
                position, slide.slide_name
            )));
            updated
        }
        SlideAction::Select { position } => {
            let state = resolve_deck(store, scope, selector)?.deck.state;
            let index = slide_index(&state, position)?;
            let updated = edit_deck(store, scope, selector, |session| {
                session.select_slide(index);
            })?;
            result.add_message(CmdMessage::info(format!(
                "Current slide: {} {}",
                position, state.slides[index].slide_name
            )));
            updated
        }
        SlideAction::Insert { raw, position } => {
            let slide = parse_slide(&raw)?;
            let name = slide.slide_name.clone();
            let state = resolve_deck(store, scope, selector)?.deck.state;
            // default: after the current slide
            let index = match position {
                Some(p) => p.saturating_sub(1),
                None if state.slides.is_empty() => 0,
                None => state.current_slide + 1,
            };
            let updated = edit_deck(store, scope, selector, |session| {
                session.apply(|s| s.insert_slide_at(slide, index));
            })?;
            let placed = updated.deck.state.current_slide + 1;
            result.add_message(CmdMessage::success(format!(
                "Inserted slide {} at position {}",
                name, placed
            )));
            updated
        }
    };

    Ok(result.with_deck(updated))
}

/// Parses one slide for insertion. Node ids are made unique within the
/// slide's tree.
pub fn parse_slide(raw: &str) -> Result<Slide> {
    let mut slide = match serde_json::from_str::<Slide>(raw.trim()) {
        Ok(slide) => slide,
        Err(direct) => generation::parse_layouts(raw)
            .ok()
            .and_then(|layouts| layouts.into_iter().next())
            .ok_or_else(|| DeckzError::Generation(format!("not a slide layout: {}", direct)))?,
    };
    slide.content = tree::ensure_unique_ids(&slide.content);
    if slide.slide_name.trim().is_empty() {
        slide.slide_name = "Untitled".to_string();
    }
    Ok(slide)
}
