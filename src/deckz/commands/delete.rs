use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DeckSelector;
use crate::model::Scope;
use crate::store::DataStore;

use super::helpers::resolve_deck;

pub fn run<S: DataStore>(store: &mut S, scope: Scope, selector: &DeckSelector) -> Result<CmdResult> {
    let target = resolve_deck(store, scope, selector)?;
    store.delete_deck(&target.deck.metadata.id, scope)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deck deleted ({}): {}",
        target.index, target.deck.metadata.title
    )));
    Ok(result)
}
