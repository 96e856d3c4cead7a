//! # Deck Session
//!
//! [`DeckSession`] is the one owner of an open presentation. It holds the
//! current [`DeckState`] behind an [`Arc`] and the two drag sessions (outline
//! cards and slides). Readers take [`DeckSession::snapshot`] and keep it for as
//! long as they like; every edit swaps in a new `Arc`.
//!
//! Pointer events only move the drag sessions' hover index. The list is
//! reordered when the drop lands, in [`DeckSession::drop_outline`] or
//! [`DeckSession::drop_slide`].

use crate::deck::DeckState;
use crate::drag::{DragSession, Rect, DEFAULT_APPEND_ZONE};
use crate::model::{Content, ContentItem, Slide};
use crate::ordering;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DeckSession {
    state: Arc<DeckState>,
    outline_drag: DragSession<String>,
    slide_drag: DragSession<String>,
    append_zone: f64,
}

impl Default for DeckSession {
    fn default() -> Self {
        Self::new(DeckState::default())
    }
}

impl DeckSession {
    pub fn new(state: DeckState) -> Self {
        Self {
            state: Arc::new(state),
            outline_drag: DragSession::new(),
            slide_drag: DragSession::new(),
            append_zone: DEFAULT_APPEND_ZONE,
        }
    }

    pub fn with_append_zone(mut self, append_zone: f64) -> Self {
        self.append_zone = append_zone;
        self
    }

    pub fn snapshot(&self) -> Arc<DeckState> {
        Arc::clone(&self.state)
    }

    pub fn into_state(self) -> DeckState {
        Arc::unwrap_or_clone(self.state)
    }

    /// Runs a transition against the current state and installs the result.
    pub fn apply<F>(&mut self, transition: F) -> Arc<DeckState>
    where
        F: FnOnce(&DeckState) -> DeckState,
    {
        let next = transition(&self.state);
        if next != *self.state {
            self.state = Arc::new(next);
        }
        self.snapshot()
    }

    // --- direct edits ---

    pub fn set_slides(&mut self, slides: Vec<Slide>) -> Arc<DeckState> {
        self.apply(|s| s.set_slides(slides))
    }

    pub fn mutate_slide_content(
        &mut self,
        slide_id: &str,
        content_id: &str,
        payload: Content,
    ) -> Arc<DeckState> {
        self.apply(|s| s.mutate_slide_content(slide_id, content_id, payload))
    }

    pub fn insert_block(
        &mut self,
        slide_id: &str,
        container_id: &str,
        index: usize,
        block: &ContentItem,
    ) -> Arc<DeckState> {
        self.apply(|s| s.insert_block(slide_id, container_id, index, block))
    }

    pub fn select_slide(&mut self, index: usize) -> Arc<DeckState> {
        self.apply(|s| s.select_slide(index))
    }

    // --- outline drag ---

    pub fn start_outline_drag(&mut self, card_id: &str) {
        if let Some(origin) = ordering::position_of(&self.state.outlines, card_id) {
            self.outline_drag.start(card_id.to_string(), origin);
        }
    }

    pub fn hover_outline(&mut self, index: usize, rect: Rect, pointer_y: f64) -> Option<usize> {
        self.outline_drag.over_item(index, rect, pointer_y)
    }

    pub fn hover_outline_tail(&mut self, list_rect: Rect, pointer_y: f64) -> Option<usize> {
        let len = self.state.outlines.len();
        self.outline_drag
            .over_list_tail(list_rect, len, pointer_y, self.append_zone)
    }

    pub fn outline_indicator_at(&self, position: usize) -> bool {
        self.outline_drag.shows_indicator_at(position)
    }

    pub fn cancel_outline_drag(&mut self) {
        self.outline_drag.cancel();
    }

    /// Completes the outline drag, if any, and applies the move.
    pub fn drop_outline(&mut self) -> Arc<DeckState> {
        match self.outline_drag.drop() {
            Some(intent) => self.apply(|s| s.drop_outline(&intent.item, intent.index)),
            None => self.snapshot(),
        }
    }

    // --- slide drag ---

    pub fn start_slide_drag(&mut self, slide_id: &str) {
        if let Some(origin) = ordering::position_of(&self.state.slides, slide_id) {
            self.slide_drag.start(slide_id.to_string(), origin);
        }
    }

    pub fn hover_slide(&mut self, index: usize, rect: Rect, pointer_y: f64) -> Option<usize> {
        self.slide_drag.over_item(index, rect, pointer_y)
    }

    pub fn hover_slide_tail(&mut self, list_rect: Rect, pointer_y: f64) -> Option<usize> {
        let len = self.state.slides.len();
        self.slide_drag
            .over_list_tail(list_rect, len, pointer_y, self.append_zone)
    }

    pub fn slide_indicator_at(&self, position: usize) -> bool {
        self.slide_drag.shows_indicator_at(position)
    }

    pub fn cancel_slide_drag(&mut self) {
        self.slide_drag.cancel();
    }

    pub fn drop_slide(&mut self) -> Arc<DeckState> {
        let Some(intent) = self.slide_drag.drop() else {
            return self.snapshot();
        };
        // The slide may have been removed while it was being dragged.
        match ordering::position_of(&self.state.slides, &intent.item) {
            Some(from) => self.apply(|s| s.drop_slide(from, intent.index)),
            None => self.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentKind;

    fn session_with_cards() -> DeckSession {
        DeckSession::new(DeckState::default().add_outlines(["A", "B", "C"]))
    }

    fn titles(state: &DeckState) -> Vec<String> {
        state.outline_titles()
    }

    #[test]
    fn dragging_c_above_a() {
        let mut session = session_with_cards();
        let c = session.snapshot().outlines[2].id.clone();

        session.start_outline_drag(&c);
        // upper half of the first card
        session.hover_outline(0, Rect::new(0.0, 40.0), 5.0);
        assert!(session.outline_indicator_at(0));

        let state = session.drop_outline();
        assert_eq!(titles(&state), vec!["C", "A", "B"]);
        assert_eq!(
            state.outlines.iter().map(|c| c.order).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn hovering_does_not_touch_the_state() {
        let mut session = session_with_cards();
        let before = session.snapshot();
        let a = before.outlines[0].id.clone();

        session.start_outline_drag(&a);
        session.hover_outline(2, Rect::new(80.0, 40.0), 119.0);
        assert!(Arc::ptr_eq(&before, &session.snapshot()));

        session.cancel_outline_drag();
        let after = session.drop_outline();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn tail_zone_appends_to_the_end() {
        let mut session = session_with_cards();
        let a = session.snapshot().outlines[0].id.clone();

        session.start_outline_drag(&a);
        assert_eq!(session.hover_outline_tail(Rect::new(0.0, 200.0), 195.0), Some(3));
        let state = session.drop_outline();
        assert_eq!(titles(&state), vec!["B", "C", "A"]);
    }

    #[test]
    fn drop_without_moving_is_a_no_op() {
        let mut session = session_with_cards();
        let before = session.snapshot();
        let b = before.outlines[1].id.clone();
        session.start_outline_drag(&b);
        let after = session.drop_outline();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn slide_drag_moves_slides() {
        let slides = ["one", "two", "three"]
            .iter()
            .map(|name| Slide::new(*name, ContentItem::new(ContentKind::Title, *name)))
            .collect();
        let mut session = DeckSession::default();
        session.set_slides(slides);
        let first = session.snapshot().slides[0].id.clone();

        session.start_slide_drag(&first);
        session.hover_slide(1, Rect::new(50.0, 50.0), 90.0);
        let state = session.drop_slide();
        let names: Vec<_> = state.slides.iter().map(|s| s.slide_name.as_str()).collect();
        assert_eq!(names, vec!["two", "one", "three"]);
        assert_eq!(state.current_slide, 1);
    }

    fn session_with_slides() -> DeckSession {
        let slides = ["one", "two", "three"]
            .iter()
            .map(|name| Slide::new(*name, ContentItem::new(ContentKind::Title, *name)))
            .collect();
        let mut session = DeckSession::default().with_append_zone(30.0);
        session.set_slides(slides);
        session
    }

    #[test]
    fn slide_tail_zone_uses_the_append_zone() {
        let mut session = session_with_slides();
        let first = session.snapshot().slides[0].id.clone();
        let list = Rect::new(0.0, 300.0);

        session.start_slide_drag(&first);
        // 40px above the bottom: outside a 30px zone
        assert_eq!(session.hover_slide_tail(list, 260.0), None);
        assert!(!session.slide_indicator_at(3));

        assert_eq!(session.hover_slide_tail(list, 285.0), Some(3));
        assert!(session.slide_indicator_at(3));

        let state = session.drop_slide();
        let names: Vec<_> = state.slides.iter().map(|s| s.slide_name.as_str()).collect();
        assert_eq!(names, vec!["two", "three", "one"]);
    }

    #[test]
    fn cancelled_slide_drag_drops_nothing() {
        let mut session = session_with_slides();
        let before = session.snapshot();
        let last = before.slides[2].id.clone();

        session.start_slide_drag(&last);
        session.hover_slide(0, Rect::new(0.0, 50.0), 5.0);
        assert!(session.slide_indicator_at(0));

        session.cancel_slide_drag();
        assert!(!session.slide_indicator_at(0));
        let after = session.drop_slide();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn old_snapshots_survive_edits() {
        let root = ContentItem::new(ContentKind::Text, "before").with_id("t");
        let mut session = DeckSession::default();
        session.set_slides(vec![Slide::new("s", root)]);
        let slide_id = session.snapshot().slides[0].id.clone();

        let old = session.snapshot();
        let new = session.mutate_slide_content(&slide_id, "t", "after".into());
        assert_eq!(old.slides[0].content.content, Content::Text("before".into()));
        assert_eq!(new.slides[0].content.content, Content::Text("after".into()));
    }
}
