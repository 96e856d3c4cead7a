use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DeckSelector;
use crate::model::Scope;
use crate::store::DataStore;
use crate::themes;

use super::helpers::resolve_deck;

#[derive(Debug, Clone)]
pub enum ThemeAction {
    List,
    Show,
    Set(String),
}

pub fn run<S: DataStore>(
    store: &mut S,
    scope: Scope,
    selector: &DeckSelector,
    action: ThemeAction,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match action {
        ThemeAction::List => Ok(result.with_themes(themes::themes().to_vec())),
        ThemeAction::Show => {
            let target = resolve_deck(store, scope, selector)?;
            let theme = themes::find_theme(target.deck.metadata.theme_name.as_deref());
            Ok(result.with_themes(vec![theme.clone()]).with_deck(target))
        }
        ThemeAction::Set(name) => {
            let Some(theme) = themes::get_theme(&name) else {
                result.add_message(CmdMessage::error(format!("Unknown theme: {}", name)));
                return Ok(result);
            };
            let mut target = resolve_deck(store, scope, selector)?;
            target.deck.metadata.theme_name = Some(theme.name.clone());
            target.deck.metadata.updated_at = chrono::Utc::now();
            store.save_deck(&target.deck, scope)?;
            target.index = 1;

            result.add_message(CmdMessage::success(format!(
                "Theme of {} set to {}",
                target.deck.metadata.title, theme.name
            )));
            Ok(result.with_themes(vec![theme.clone()]).with_deck(target))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn set_and_show() {
        let mut store = StoreFixture::new().with_decks(1, Scope::Project).store;
        let deck = DeckSelector::default();

        run(&mut store, Scope::Project, &deck, ThemeAction::Set("forest".into())).unwrap();
        let shown = run(&mut store, Scope::Project, &deck, ThemeAction::Show).unwrap();
        assert_eq!(shown.themes[0].name, "Forest");
    }

    #[test]
    fn decks_without_theme_show_the_default() {
        let mut store = StoreFixture::new().with_decks(1, Scope::Project).store;
        let shown = run(&mut store, Scope::Project, &DeckSelector::default(), ThemeAction::Show)
            .unwrap();
        assert_eq!(shown.themes[0].name, "Default");
    }

    #[test]
    fn unknown_theme_is_reported() {
        let mut store = StoreFixture::new().with_decks(1, Scope::Project).store;
        let result = run(
            &mut store,
            Scope::Project,
            &DeckSelector::default(),
            ThemeAction::Set("Vapor".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert_eq!(
            run(&mut store, Scope::Project, &DeckSelector::default(), ThemeAction::List)
                .unwrap()
                .themes
                .len(),
            themes::themes().len()
        );
    }
}
