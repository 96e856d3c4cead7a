use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Scope;
use crate::store::DataStore;

use super::helpers::indexed_decks;

pub fn run<S: DataStore>(store: &S, scope: Scope) -> Result<CmdResult> {
    let decks = indexed_decks(store, scope)?;
    Ok(CmdResult::default().with_listed_decks(decks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_newest_first() {
        let store = StoreFixture::new()
            .with_decks(2, Scope::Project)
            .with_decks(1, Scope::Global)
            .store;

        let result = run(&store, Scope::Project).unwrap();
        let listed: Vec<_> = result
            .listed_decks
            .iter()
            .map(|dd| (dd.index, dd.deck.metadata.title.as_str()))
            .collect();
        assert_eq!(listed, vec![(1, "Test Deck 2"), (2, "Test Deck 1")]);
    }
}
