//! # Deck State
//!
//! [`DeckState`] is the single source of truth for one open presentation:
//! the slide list, the outline card list and the focused slide.
//!
//! Every operation borrows the current state and returns the next one; the
//! previous state is never modified, so anyone still holding it keeps a
//! consistent snapshot. Operations apply fully or not at all:
//!
//! - unknown slide, card or node ids are silent no-ops (the editor may submit
//!   ids that went stale one event ago),
//! - out-of-range indices are clamped.
//!
//! List edits delegate to [`crate::ordering`], content edits to
//! [`crate::tree`].

use crate::model::{new_id, Content, ContentItem, OutlineCard, Slide};
use crate::ordering;
use crate::tree;
use serde::{Deserialize, Serialize};

/// Title given to outline cards added without one.
pub const DEFAULT_CARD_TITLE: &str = "New Section";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckState {
    #[serde(default)]
    pub slides: Vec<Slide>,
    #[serde(default)]
    pub outlines: Vec<OutlineCard>,
    #[serde(default)]
    pub current_slide: usize,
}

impl DeckState {
    pub fn new(slides: Vec<Slide>, outlines: Vec<OutlineCard>) -> Self {
        Self::default().set_slides(slides).set_outlines(outlines)
    }

    // --- Slides ---

    /// Installs a slide list, keeping the slides in their `slideOrder`.
    pub fn set_slides(&self, slides: Vec<Slide>) -> Self {
        let slides = ordering::normalize(&ordering::sorted_by_order(&slides));
        let current_slide = clamp_index(self.current_slide, slides.len());
        Self {
            slides,
            outlines: self.outlines.clone(),
            current_slide,
        }
    }

    pub fn ordered_slides(&self) -> Vec<Slide> {
        ordering::sorted_by_order(&self.slides)
    }

    pub fn slide(&self, id: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.current_slide)
    }

    /// Moves a slide (move semantics, see [`ordering::reorder`]). The focus
    /// follows the slide that was focused before the move.
    pub fn reorder_slide(&self, from: usize, to: usize) -> Self {
        let slides = ordering::reorder(&self.slides, from, to);
        self.with_slides_keeping_focus(slides)
    }

    /// Applies a drag drop of the slide at `from` onto gap `drop_index`.
    pub fn drop_slide(&self, from: usize, drop_index: usize) -> Self {
        let slides = ordering::move_to_drop_index(&self.slides, from, drop_index);
        self.with_slides_keeping_focus(slides)
    }

    /// Inserts a copy of `slide` under a fresh id and focuses it.
    pub fn insert_slide_at(&self, slide: Slide, index: usize) -> Self {
        let index = index.min(self.slides.len());
        let slide = Slide {
            id: new_id(),
            ..slide
        };
        Self {
            slides: ordering::insert_at(&self.slides, slide, index),
            outlines: self.outlines.clone(),
            current_slide: index,
        }
    }

    pub fn remove_slide(&self, id: &str) -> Self {
        let Some(position) = ordering::position_of(&self.slides, id) else {
            log::debug!("remove_slide: unknown slide {}", id);
            return self.clone();
        };

        let slides = ordering::remove_by_id(&self.slides, id);
        let current_slide = if position < self.current_slide {
            self.current_slide - 1
        } else {
            self.current_slide
        };
        Self {
            current_slide: clamp_index(current_slide, slides.len()),
            slides,
            outlines: self.outlines.clone(),
        }
    }

    /// Replaces the payload of one node in one slide.
    pub fn mutate_slide_content(&self, slide_id: &str, content_id: &str, payload: Content) -> Self {
        self.map_slide_tree(slide_id, |root| tree::set_content(root, content_id, payload))
    }

    /// Drops a palette block into `container_id` at `index`.
    pub fn insert_block(
        &self,
        slide_id: &str,
        container_id: &str,
        index: usize,
        block: &ContentItem,
    ) -> Self {
        self.map_slide_tree(slide_id, |root| {
            tree::insert_child(root, container_id, index, block)
        })
    }

    pub fn remove_block(&self, slide_id: &str, content_id: &str) -> Self {
        self.map_slide_tree(slide_id, |root| tree::remove_node(root, content_id))
    }

    pub fn select_slide(&self, index: usize) -> Self {
        Self {
            slides: self.slides.clone(),
            outlines: self.outlines.clone(),
            current_slide: clamp_index(index, self.slides.len()),
        }
    }

    // --- Outline cards ---

    pub fn set_outlines(&self, outlines: Vec<OutlineCard>) -> Self {
        Self {
            slides: self.slides.clone(),
            outlines: ordering::normalize(&outlines),
            current_slide: self.current_slide,
        }
    }

    /// Adds a card after position `after`, or at the end when `after` is
    /// `None`. A blank title becomes [`DEFAULT_CARD_TITLE`].
    pub fn add_outline(&self, title: &str, after: Option<usize>) -> Self {
        let title = if title.trim().is_empty() {
            DEFAULT_CARD_TITLE
        } else {
            title
        };
        let index = match after {
            Some(position) => position.saturating_add(1),
            None => self.outlines.len(),
        };
        let card = OutlineCard::new(title, 0);
        self.with_outlines(ordering::insert_at(&self.outlines, card, index))
    }

    /// Appends a batch of titles, e.g. a freshly generated outline.
    pub fn add_outlines<I, T>(&self, titles: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let outlines = titles
            .into_iter()
            .fold(self.outlines.clone(), |cards, title| {
                ordering::append(&cards, OutlineCard::new(title, 0))
            });
        self.with_outlines(outlines)
    }

    pub fn rename_outline(&self, id: &str, title: &str) -> Self {
        if ordering::position_of(&self.outlines, id).is_none() {
            log::debug!("rename_outline: unknown card {}", id);
            return self.clone();
        }
        let outlines = self
            .outlines
            .iter()
            .map(|card| {
                if card.id == id {
                    OutlineCard {
                        title: title.to_string(),
                        ..card.clone()
                    }
                } else {
                    card.clone()
                }
            })
            .collect();
        self.with_outlines(outlines)
    }

    pub fn remove_outline(&self, id: &str) -> Self {
        self.with_outlines(ordering::remove_by_id(&self.outlines, id))
    }

    pub fn reorder_outline(&self, from: usize, to: usize) -> Self {
        self.with_outlines(ordering::reorder(&self.outlines, from, to))
    }

    /// Applies a drag drop of card `id` onto gap `drop_index`.
    pub fn drop_outline(&self, id: &str, drop_index: usize) -> Self {
        let Some(from) = ordering::position_of(&self.outlines, id) else {
            log::debug!("drop_outline: unknown card {}", id);
            return self.clone();
        };
        self.with_outlines(ordering::move_to_drop_index(&self.outlines, from, drop_index))
    }

    pub fn reset_outlines(&self) -> Self {
        self.with_outlines(Vec::new())
    }

    pub fn outline_titles(&self) -> Vec<String> {
        ordering::sorted_by_order(&self.outlines)
            .into_iter()
            .map(|card| card.title)
            .collect()
    }

    // --- helpers ---

    fn with_outlines(&self, outlines: Vec<OutlineCard>) -> Self {
        Self {
            slides: self.slides.clone(),
            outlines,
            current_slide: self.current_slide,
        }
    }

    fn with_slides_keeping_focus(&self, slides: Vec<Slide>) -> Self {
        let focused = self.current().map(|s| s.id.clone());
        let current_slide = focused
            .and_then(|id| ordering::position_of(&slides, &id))
            .unwrap_or_else(|| clamp_index(self.current_slide, slides.len()));
        Self {
            slides,
            outlines: self.outlines.clone(),
            current_slide,
        }
    }

    fn map_slide_tree<F>(&self, slide_id: &str, edit: F) -> Self
    where
        F: FnOnce(&crate::model::NodeRef) -> crate::model::NodeRef,
    {
        let Some(position) = ordering::position_of(&self.slides, slide_id) else {
            log::debug!("unknown slide {}", slide_id);
            return self.clone();
        };

        let mut slides = self.slides.clone();
        let root = edit(&slides[position].content);
        slides[position].content = root;
        Self {
            slides,
            outlines: self.outlines.clone(),
            current_slide: self.current_slide,
        }
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
