use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::generation;
use crate::index::DeckSelector;
use crate::ingest::ingest_layouts;
use crate::model::Scope;
use crate::store::DataStore;

use super::helpers::{edit_deck, resolve_deck};

/// Replaces a deck's slides with freshly generated layouts.
pub fn run<S: DataStore>(
    store: &mut S,
    scope: Scope,
    selector: &DeckSelector,
    raw: &str,
    repair_titles: bool,
) -> Result<CmdResult> {
    let layouts = generation::parse_layouts(raw)?;
    let outline_count = resolve_deck(store, scope, selector)?.deck.state.outlines.len();

    let ingested = ingest_layouts(outline_count, layouts, repair_titles);
    let count = ingested.slides.len();
    let updated = edit_deck(store, scope, selector, |session| {
        session.set_slides(ingested.slides);
        session.select_slide(0);
    })?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Ingested {} slides", count)));
    if ingested.repaired > 0 {
        result.add_message(CmdMessage::info(format!(
            "Added a title to {} slides",
            ingested.repaired
        )));
    }
    if let Some(mismatch) = ingested.mismatch {
        result.add_message(CmdMessage::warning(format!(
            "Outline has {} cards but {} slides were generated",
            mismatch.outlines, mismatch.slides
        )));
    }
    Ok(result.with_deck(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::DeckzError;
    use crate::ingest::has_title;
    use crate::model::ContentKind;
    use crate::store::memory::fixtures::StoreFixture;

    const RAW: &str = r#"Sure, here are the layouts:
    {"layouts": [
        {"slideName": "Intro", "type": "blank-card", "content":
            {"id": "a", "type": "text", "name": "Text", "content": "hello"}},
        {"slideName": "Market", "type": "blank-card", "content":
            {"id": "b", "type": "column", "name": "Column", "content": [
                {"id": "b1", "type": "title", "name": "Title", "content": "Market"}
            ]}}
    ]}"#;

    #[test]
    fn repairs_titles_and_reports_mismatch() {
        let mut store = StoreFixture::new()
            .with_outlined_deck("Deck", &["Intro", "Market", "Close"], Scope::Project)
            .store;

        let result = run(&mut store, Scope::Project, &DeckSelector::default(), RAW, true).unwrap();
        let state = result.deck.as_ref().unwrap().deck.state.clone();
        assert_eq!(state.slides.len(), 2);
        assert!(state.slides.iter().all(has_title));

        let intro = &state.slides[0].content;
        assert_eq!(intro.kind, ContentKind::Column);
        assert_eq!(intro.children()[1].kind, ContentKind::Text);

        let levels: Vec<_> = result.messages.iter().map(|m| m.level.clone()).collect();
        assert_eq!(
            levels,
            vec![MessageLevel::Success, MessageLevel::Info, MessageLevel::Warning]
        );
    }

    #[test]
    fn repair_can_be_disabled() {
        let mut store = StoreFixture::new()
            .with_outlined_deck("Deck", &["Intro", "Market"], Scope::Project)
            .store;
        let result = run(&mut store, Scope::Project, &DeckSelector::default(), RAW, false).unwrap();
        let state = &result.deck.as_ref().unwrap().deck.state;
        assert!(!has_title(&state.slides[0]));
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn malformed_output_leaves_the_deck_alone() {
        let mut store = StoreFixture::new()
            .with_slide_deck("Deck", &["Keep"], Scope::Project)
            .store;
        let err = run(
            &mut store,
            Scope::Project,
            &DeckSelector::default(),
            r#"{"slides": []}"#,
            true,
        );
        assert!(matches!(err, Err(DeckzError::Generation(_))));
        assert_eq!(
            store.list_decks(Scope::Project).unwrap()[0].state.slides.len(),
            1
        );
    }
}
