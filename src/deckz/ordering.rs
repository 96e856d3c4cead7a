//! # Ordered List Engine
//!
//! Splice-and-renumber primitives shared by the outline card list and the
//! slide list. Each item carries its own order key, and after every operation
//! that key equals `T::BASE + position`:
//!
//! - outline cards are numbered from 1 (`1..=N`)
//! - slides are numbered from 0 (`0..N`)
//!
//! Every function is pure (the input slice is never touched) and total.
//! Drag interactions routinely produce indices outside the current bounds,
//! for example dragging past the last card yields `index == len`, so
//! out-of-range indices are clamped instead of rejected.
//!
//! ## Move vs. drop indices
//!
//! [`reorder`] takes a *move* destination: the index the element should end
//! up at, counted in the list with the element already removed.
//! [`move_to_drop_index`] takes a *drop* index: a gap in the list as it looks
//! while the element is still in place (what the drag resolver produces).
//! Dropping into either gap next to the element is a no-op.

use crate::model::{OutlineCard, Slide};

/// An element of an ordered list.
pub trait Ordered: Clone {
    /// Order value of the first element.
    const BASE: u32;

    fn id(&self) -> &str;
    fn order(&self) -> u32;
    fn set_order(&mut self, order: u32);
}

impl Ordered for OutlineCard {
    const BASE: u32 = 1;

    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

impl Ordered for Slide {
    const BASE: u32 = 0;

    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> u32 {
        self.slide_order
    }

    fn set_order(&mut self, order: u32) {
        self.slide_order = order;
    }
}

fn renumber_from<T: Ordered>(items: &mut [T], start: usize) {
    for (position, item) in items.iter_mut().enumerate().skip(start) {
        item.set_order(T::BASE + position as u32);
    }
}

/// Moves the element at `from` so it ends up at `to`, then renumbers.
///
/// `from` is clamped to the last element and `to` to the length of the list
/// without the moved element. A move onto itself returns the list as is.
pub fn reorder<T: Ordered>(list: &[T], from: usize, to: usize) -> Vec<T> {
    if list.is_empty() {
        return Vec::new();
    }

    let from = from.min(list.len() - 1);
    let to = to.min(list.len() - 1);
    if from == to {
        return list.to_vec();
    }

    let mut items = list.to_vec();
    let moved = items.remove(from);
    items.insert(to, moved);
    renumber_from(&mut items, 0);
    items
}

/// Applies a drop at gap `drop_index` for the element currently at `from`.
pub fn move_to_drop_index<T: Ordered>(list: &[T], from: usize, drop_index: usize) -> Vec<T> {
    if list.is_empty() || from >= list.len() {
        return list.to_vec();
    }

    let drop_index = drop_index.min(list.len());
    if drop_index == from || drop_index == from + 1 {
        return list.to_vec();
    }

    let to = if drop_index > from {
        drop_index - 1
    } else {
        drop_index
    };
    reorder(list, from, to)
}

/// Splices `item` in at `index` (clamped to `[0, len]`) and renumbers the
/// elements from `index` onward.
pub fn insert_at<T: Ordered>(list: &[T], item: T, index: usize) -> Vec<T> {
    let index = index.min(list.len());
    let mut items = Vec::with_capacity(list.len() + 1);
    items.extend_from_slice(&list[..index]);
    items.push(item);
    items.extend_from_slice(&list[index..]);
    renumber_from(&mut items, index);
    items
}

pub fn append<T: Ordered>(list: &[T], item: T) -> Vec<T> {
    insert_at(list, item, list.len())
}

/// Removes the element with `id` and renumbers the rest. Unknown ids leave
/// the list untouched.
pub fn remove_by_id<T: Ordered>(list: &[T], id: &str) -> Vec<T> {
    let Some(position) = position_of(list, id) else {
        return list.to_vec();
    };

    let mut items = list.to_vec();
    items.remove(position);
    renumber_from(&mut items, position);
    items
}

pub fn position_of<T: Ordered>(list: &[T], id: &str) -> Option<usize> {
    list.iter().position(|item| item.id() == id)
}

/// Renumbers the whole list densely in its current positional order.
pub fn normalize<T: Ordered>(list: &[T]) -> Vec<T> {
    let mut items = list.to_vec();
    renumber_from(&mut items, 0);
    items
}

/// Stable sort by order key.
pub fn sorted_by_order<T: Ordered>(list: &[T]) -> Vec<T> {
    let mut items = list.to_vec();
    items.sort_by_key(|item| item.order());
    items
}

/// True when the order keys are exactly `BASE..BASE + len`.
pub fn is_dense<T: Ordered>(list: &[T]) -> bool {
    list.iter()
        .enumerate()
        .all(|(position, item)| item.order() == T::BASE + position as u32)
}
