//! User-facing numbering.
//!
//! Decks are shown newest-updated first and numbered from 1, so `1` is always
//! the deck touched last. Slide and outline positions on the command line are
//! also 1-based and converted here.

use crate::model::Deck;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct DisplayDeck {
    pub deck: Deck,
    pub index: usize,
}

/// A user input selecting a deck, either by display index or by title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckSelector {
    Index(usize),
    Title(String),
}

impl Default for DeckSelector {
    fn default() -> Self {
        DeckSelector::Index(1)
    }
}

impl fmt::Display for DeckSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckSelector::Index(i) => write!(f, "{}", i),
            DeckSelector::Title(t) => write!(f, "\"{}\"", t),
        }
    }
}

impl FromStr for DeckSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty deck selector".to_string());
        }
        match s.parse::<usize>() {
            Ok(0) => Err("Deck indexes start at 1".to_string()),
            Ok(n) => Ok(DeckSelector::Index(n)),
            Err(_) => Ok(DeckSelector::Title(s.to_string())),
        }
    }
}

/// Assigns display indexes, newest-updated first. Ties fall back to
/// creation time so the numbering is stable.
pub fn index_decks(mut decks: Vec<Deck>) -> Vec<DisplayDeck> {
    decks.sort_by(|a, b| {
        b.metadata
            .updated_at
            .cmp(&a.metadata.updated_at)
            .then_with(|| b.metadata.created_at.cmp(&a.metadata.created_at))
    });
    decks
        .into_iter()
        .enumerate()
        .map(|(i, deck)| DisplayDeck { deck, index: i + 1 })
        .collect()
}

/// Finds the deck a selector points at. Titles match case-insensitively,
/// exact matches first, then a unique substring match.
pub fn select<'a>(decks: &'a [DisplayDeck], selector: &DeckSelector) -> Result<&'a DisplayDeck, String> {
    match selector {
        DeckSelector::Index(i) => decks
            .iter()
            .find(|dd| dd.index == *i)
            .ok_or_else(|| format!("No deck at index {}", i)),
        DeckSelector::Title(title) => {
            let needle = title.to_lowercase();
            if let Some(exact) = decks
                .iter()
                .find(|dd| dd.deck.metadata.title.to_lowercase() == needle)
            {
                return Ok(exact);
            }
            let partial: Vec<_> = decks
                .iter()
                .filter(|dd| dd.deck.metadata.title.to_lowercase().contains(&needle))
                .collect();
            match partial.as_slice() {
                [only] => Ok(only),
                [] => Err(format!("No deck matches {}", selector)),
                _ => Err(format!(
                    "{} matches {} decks, use an index instead",
                    selector,
                    partial.len()
                )),
            }
        }
    }
}

/// Converts a 1-based position typed by the user into a list index.
pub fn position_to_index(position: usize) -> Result<usize, String> {
    position
        .checked_sub(1)
        .ok_or_else(|| "Positions start at 1".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn deck(title: &str, minutes_ago: i64) -> Deck {
        let mut deck = Deck::new(title.to_string());
        deck.metadata.updated_at = Utc::now() - Duration::minutes(minutes_ago);
        deck
    }

    #[test]
    fn newest_update_comes_first() {
        let indexed = index_decks(vec![deck("old", 30), deck("new", 1), deck("mid", 10)]);
        let titles: Vec<_> = indexed
            .iter()
            .map(|dd| (dd.index, dd.deck.metadata.title.as_str()))
            .collect();
        assert_eq!(titles, vec![(1, "new"), (2, "mid"), (3, "old")]);
    }

    #[test]
    fn test_parsing() {
        assert_eq!("2".parse::<DeckSelector>(), Ok(DeckSelector::Index(2)));
        assert_eq!(
            "Quarterly".parse::<DeckSelector>(),
            Ok(DeckSelector::Title("Quarterly".into()))
        );
        assert!("0".parse::<DeckSelector>().is_err());
        assert!("  ".parse::<DeckSelector>().is_err());
    }

    #[test]
    fn select_by_title() {
        let indexed = index_decks(vec![
            deck("Quarterly Review", 1),
            deck("Quarterly Plan", 2),
            deck("Pitch", 3),
        ]);
        let pick = |s: &str| select(&indexed, &s.parse().unwrap()).map(|dd| dd.index);

        assert_eq!(pick("pitch"), Ok(3));
        assert_eq!(pick("plan"), Ok(2));
        assert_eq!(pick("3"), Ok(3));
        assert!(pick("quarterly").is_err());
        assert!(pick("missing").is_err());
        assert!(pick("9").is_err());
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(position_to_index(1), Ok(0));
        assert!(position_to_index(0).is_err());
    }
}
