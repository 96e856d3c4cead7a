use crate::commands::{CmdMessage, CmdResult, RenderedSlide};
use crate::dispatch::{render_slide, RenderMode};
use crate::error::Result;
use crate::index::DeckSelector;
use crate::model::Scope;
use crate::store::DataStore;

use super::helpers::{resolve_deck, slide_at};

/// Renders one slide (the current one unless `slide` is given). `edit`
/// renders in editing mode, drop-zone markers included.
pub fn run<S: DataStore>(
    store: &S,
    scope: Scope,
    selector: &DeckSelector,
    slide: Option<usize>,
    edit: bool,
) -> Result<CmdResult> {
    let target = resolve_deck(store, scope, selector)?;
    let state = &target.deck.state;
    let mut result = CmdResult::default();

    if state.slides.is_empty() {
        result.add_message(CmdMessage::info("Deck has no slides yet"));
        return Ok(result.with_deck(target));
    }

    let position = slide.unwrap_or(state.current_slide + 1);
    let chosen = slide_at(state, position)?;
    let mode = if edit {
        RenderMode::Editing
    } else {
        RenderMode::Presenting
    };

    let rendered = RenderedSlide {
        position,
        slide_name: chosen.slide_name.clone(),
        instruction: render_slide(chosen, mode),
    };
    Ok(result.with_rendered(rendered).with_deck(target))
}
