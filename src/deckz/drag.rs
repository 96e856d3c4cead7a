//! # Drag Position Resolver
//!
//! Turns continuous pointer geometry into discrete insertion points. This is
//! the first of the two drag stages; the second (applying the drop to a list
//! or tree) lives in [`crate::ordering`] and [`crate::deck`].
//!
//! Insertion points are gaps: for a list of `n` items, gap `i` sits before
//! item `i` and gap `n` sits after the last item.
//!
//! A [`DragSession`] holds only the dragged item and the hovered gap. Nothing
//! structural changes until [`DragSession::drop`]; cancelling just clears the
//! two fields.

/// Default height of the trailing zone below a list that resolves to "append".
pub const DEFAULT_APPEND_ZONE: f64 = 20.0;

/// Vertical extent of a drop target, in whatever units the caller measures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Gap for a pointer hovering over the item at `index`: the upper half means
/// "insert before", the lower half "insert after".
pub fn resolve_insert_index(index: usize, rect: Rect, pointer_y: f64) -> usize {
    let offset = pointer_y - rect.top;
    if offset < rect.height / 2.0 {
        index
    } else {
        index + 1
    }
}

/// Resolves a pointer over the list container itself. Inside the trailing
/// `hot_zone` (or over an empty list) the gap is `len`; elsewhere the item
/// handlers decide and this returns `None`.
pub fn resolve_list_tail(list_rect: Rect, len: usize, pointer_y: f64, hot_zone: f64) -> Option<usize> {
    if len == 0 || pointer_y > list_rect.bottom() - hot_zone {
        Some(len)
    } else {
        None
    }
}

/// A completed drop: what was dragged and the gap it landed on.
#[derive(Debug, Clone, PartialEq)]
pub struct DropIntent<T> {
    pub item: T,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession<T> {
    dragged: Option<T>,
    hovered: Option<usize>,
}

impl<T> Default for DragSession<T> {
    fn default() -> Self {
        Self {
            dragged: None,
            hovered: None,
        }
    }
}

impl<T> DragSession<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a drag. The hover starts on the item's own gap, so an immediate
    /// drop is a no-op.
    pub fn start(&mut self, item: T, origin_index: usize) {
        self.dragged = Some(item);
        self.hovered = Some(origin_index);
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn dragged(&self) -> Option<&T> {
        self.dragged.as_ref()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn over_item(&mut self, index: usize, rect: Rect, pointer_y: f64) -> Option<usize> {
        if !self.is_dragging() {
            return None;
        }
        let gap = resolve_insert_index(index, rect, pointer_y);
        self.hovered = Some(gap);
        Some(gap)
    }

    pub fn over_list_tail(
        &mut self,
        list_rect: Rect,
        len: usize,
        pointer_y: f64,
        hot_zone: f64,
    ) -> Option<usize> {
        if !self.is_dragging() {
            return None;
        }
        let gap = resolve_list_tail(list_rect, len, pointer_y, hot_zone)?;
        self.hovered = Some(gap);
        Some(gap)
    }

    /// Ends the drag with a drop. Returns `None` when nothing was being
    /// dragged or no gap was hovered. The session is reset either way.
    pub fn drop(&mut self) -> Option<DropIntent<T>> {
        let item = self.dragged.take();
        let index = self.hovered.take();
        match (item, index) {
            (Some(item), Some(index)) => Some(DropIntent { item, index }),
            _ => None,
        }
    }

    /// Drag ended without a drop.
    pub fn cancel(&mut self) {
        self.dragged = None;
        self.hovered = None;
    }

    /// Whether the drop indicator belongs at gap `position`.
    pub fn shows_indicator_at(&self, position: usize) -> bool {
        self.is_dragging() && self.hovered == Some(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_half_inserts_before() {
        let rect = Rect::new(100.0, 40.0);
        assert_eq!(resolve_insert_index(3, rect, 100.0), 3);
        assert_eq!(resolve_insert_index(3, rect, 119.9), 3);
    }

    #[test]
    fn lower_half_inserts_after() {
        let rect = Rect::new(100.0, 40.0);
        assert_eq!(resolve_insert_index(3, rect, 120.0), 4);
        assert_eq!(resolve_insert_index(3, rect, 139.0), 4);
    }

    #[test]
    fn tail_zone_appends() {
        let list = Rect::new(0.0, 300.0);
        assert_eq!(resolve_list_tail(list, 5, 290.0, DEFAULT_APPEND_ZONE), Some(5));
        assert_eq!(resolve_list_tail(list, 5, 150.0, DEFAULT_APPEND_ZONE), None);
        assert_eq!(resolve_list_tail(list, 0, 10.0, DEFAULT_APPEND_ZONE), Some(0));
    }

    #[test]
    fn events_without_a_drag_are_ignored() {
        let mut session: DragSession<String> = DragSession::new();
        assert_eq!(session.over_item(1, Rect::new(0.0, 10.0), 9.0), None);
        assert_eq!(session.hovered(), None);
        assert!(session.drop().is_none());
    }

    #[test]
    fn drop_returns_intent_and_resets() {
        let mut session = DragSession::new();
        session.start("c".to_string(), 2);
        assert!(session.shows_indicator_at(2));

        session.over_item(0, Rect::new(0.0, 50.0), 10.0);
        assert!(session.shows_indicator_at(0));
        assert!(!session.shows_indicator_at(2));

        let intent = session.drop().unwrap();
        assert_eq!(intent.item, "c");
        assert_eq!(intent.index, 0);
        assert!(!session.is_dragging());
        assert_eq!(session.hovered(), None);
    }

    #[test]
    fn cancel_clears_everything() {
        let mut session = DragSession::new();
        session.start(7u32, 0);
        // lower half of the second item
        assert_eq!(session.over_item(1, Rect::new(40.0, 40.0), 70.0), Some(2));
        session.cancel();
        assert!(!session.is_dragging());
        assert!(!session.shows_indicator_at(2));
        assert!(session.drop().is_none());
    }
}
