use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DisplayDeck;
use crate::model::{Deck, Scope};
use crate::store::DataStore;
use crate::themes;

pub fn run<S: DataStore>(
    store: &mut S,
    scope: Scope,
    title: String,
    theme: Option<String>,
    default_theme: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let requested = theme.as_deref().unwrap_or(default_theme);
    let resolved = themes::find_theme(Some(requested));
    if !resolved.name.eq_ignore_ascii_case(requested) {
        result.add_message(CmdMessage::warning(format!(
            "Unknown theme {}, using {}",
            requested, resolved.name
        )));
    }

    let mut deck = Deck::new(title);
    deck.metadata.theme_name = Some(resolved.name.clone());
    store.save_deck(&deck, scope)?;

    result.add_message(CmdMessage::success(format!(
        "Deck created: {}",
        deck.metadata.title
    )));
    // New deck is always the newest, so it gets index 1
    Ok(result.with_deck(DisplayDeck { deck, index: 1 }))
}
