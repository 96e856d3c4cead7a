use crate::deck::DeckState;
use crate::error::{DeckzError, Result};
use crate::index::{self, index_decks, DeckSelector, DisplayDeck};
use crate::model::{OutlineCard, Scope, Slide};
use crate::session::DeckSession;
use crate::store::DataStore;

pub fn indexed_decks<S: DataStore>(store: &S, scope: Scope) -> Result<Vec<DisplayDeck>> {
    let decks = store.list_decks(scope)?;
    Ok(index_decks(decks))
}

pub fn resolve_deck<S: DataStore>(
    store: &S,
    scope: Scope,
    selector: &DeckSelector,
) -> Result<DisplayDeck> {
    let indexed = indexed_decks(store, scope)?;
    index::select(&indexed, selector)
        .cloned()
        .map_err(DeckzError::Api)
}

/// Loads a deck, runs `edit` on a session over its state and saves the
/// result. An edit that leaves the state unchanged saves nothing and keeps
/// the deck's display index.
pub fn edit_deck<S, F>(
    store: &mut S,
    scope: Scope,
    selector: &DeckSelector,
    edit: F,
) -> Result<DisplayDeck>
where
    S: DataStore,
    F: FnOnce(&mut DeckSession),
{
    let DisplayDeck { mut deck, index } = resolve_deck(store, scope, selector)?;

    let mut session = DeckSession::new(deck.state.clone());
    edit(&mut session);
    let next: DeckState = session.into_state();

    if next == deck.state {
        return Ok(DisplayDeck { deck, index });
    }

    deck.replace_state(next);
    store.save_deck(&deck, scope)?;
    // The freshly updated deck is always the newest.
    Ok(DisplayDeck { deck, index: 1 })
}

/// Index of the slide at a 1-based user position.
pub fn slide_index(state: &DeckState, position: usize) -> Result<usize> {
    let index = index::position_to_index(position).map_err(DeckzError::Api)?;
    if index >= state.slides.len() {
        return Err(DeckzError::Api(format!(
            "No slide at position {} (deck has {})",
            position,
            state.slides.len()
        )));
    }
    Ok(index)
}

pub fn slide_at(state: &DeckState, position: usize) -> Result<&Slide> {
    let index = slide_index(state, position)?;
    Ok(&state.slides[index])
}

pub fn outline_index(state: &DeckState, position: usize) -> Result<usize> {
    let index = index::position_to_index(position).map_err(DeckzError::Api)?;
    if index >= state.outlines.len() {
        return Err(DeckzError::Api(format!(
            "No outline card at position {} (deck has {})",
            position,
            state.outlines.len()
        )));
    }
    Ok(index)
}

pub fn outline_at(state: &DeckState, position: usize) -> Result<&OutlineCard> {
    let index = outline_index(state, position)?;
    Ok(&state.outlines[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn unchanged_edit_keeps_index() {
        let mut store = StoreFixture::new()
            .with_outlined_deck("Old", &["A"], Scope::Project)
            .with_decks(1, Scope::Project)
            .store;

        let old = DeckSelector::Index(2);
        let result = edit_deck(&mut store, Scope::Project, &old, |_| {}).unwrap();
        assert_eq!(result.index, 2);

        let result = edit_deck(&mut store, Scope::Project, &old, |session| {
            session.apply(|s| s.add_outline("B", None));
        })
        .unwrap();
        assert_eq!(result.index, 1);
        assert_eq!(result.deck.state.outline_titles(), vec!["A", "B"]);

        let reloaded = resolve_deck(&store, Scope::Project, &DeckSelector::Index(1)).unwrap();
        assert_eq!(reloaded.deck.metadata.title, "Old");
    }

    #[test]
    fn positions_must_exist() {
        let state = DeckState::default().add_outlines(["A", "B"]);
        assert_eq!(outline_at(&state, 2).unwrap().title, "B");
        assert!(outline_at(&state, 3).is_err());
        assert!(outline_at(&state, 0).is_err());
        assert!(slide_at(&state, 1).is_err());
    }

    #[test]
    fn unknown_deck_is_an_api_error() {
        let store = StoreFixture::new().store;
        assert!(matches!(
            resolve_deck(&store, Scope::Project, &DeckSelector::Index(1)),
            Err(DeckzError::Api(_))
        ));
    }
}
