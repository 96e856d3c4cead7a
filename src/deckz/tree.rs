//! # Tree Mutator
//!
//! Copy-on-write edits of a slide's content tree.
//!
//! [`set_content`] is the single mutation primitive: it finds a node by id and
//! returns a new root in which only that node's `content` differs. Every
//! ancestor on the path is shallow-copied; every subtree off the path is the
//! same [`Arc`] as before, so a consumer can tell what changed with
//! `Arc::ptr_eq` alone.
//!
//! Structural edits ([`insert_child`], [`remove_node`]) compute the parent's
//! new child list and hand it to [`set_content`].
//!
//! Unknown ids are not errors. The editor may be one event behind a deletion,
//! so a miss hands back the original root.

use crate::model::{new_id, Content, ContentItem, ContentKind, NodeRef};
use std::collections::HashSet;
use std::sync::Arc;

/// Replaces the `content` of the node with `target_id`.
pub fn set_content(root: &NodeRef, target_id: &str, payload: Content) -> NodeRef {
    match rebuild(root, target_id, &payload) {
        Some(updated) => updated,
        None => {
            log::debug!("set_content: node {} not found, tree unchanged", target_id);
            Arc::clone(root)
        }
    }
}

fn rebuild(node: &NodeRef, target_id: &str, payload: &Content) -> Option<NodeRef> {
    if node.id == target_id {
        return Some(Arc::new(node.with_content(payload.clone())));
    }

    let children = node.content.nodes()?;
    let (position, updated) = children
        .iter()
        .enumerate()
        .find_map(|(i, child)| rebuild(child, target_id, payload).map(|c| (i, c)))?;

    let mut next = children.to_vec();
    next[position] = updated;
    Some(Arc::new(node.with_content(Content::Nodes(next))))
}

/// Depth-first lookup.
pub fn find<'a>(root: &'a NodeRef, id: &str) -> Option<&'a NodeRef> {
    if root.id == id {
        return Some(root);
    }
    root.children().iter().find_map(|child| find(child, id))
}

/// The container holding `id`, if `id` is not the root.
pub fn find_parent<'a>(root: &'a NodeRef, id: &str) -> Option<&'a NodeRef> {
    let children = root.children();
    if children.iter().any(|child| child.id == id) {
        return Some(root);
    }
    children.iter().find_map(|child| find_parent(child, id))
}

/// Pre-order traversal.
pub fn walk<'a>(root: &'a NodeRef, visit: &mut dyn FnMut(&'a NodeRef)) {
    visit(root);
    for child in root.children() {
        walk(child, visit);
    }
}

pub fn contains_kind(root: &NodeRef, kind: &ContentKind) -> bool {
    &root.kind == kind || root.children().iter().any(|child| contains_kind(child, kind))
}

pub fn node_count(root: &NodeRef) -> usize {
    1 + root.children().iter().map(node_count).sum::<usize>()
}

pub fn collect_ids(root: &NodeRef) -> Vec<String> {
    let mut ids = Vec::new();
    walk(root, &mut |node| ids.push(node.id.clone()));
    ids
}

/// Text of every `title` node, in tree order.
pub fn titles(root: &NodeRef) -> Vec<String> {
    let mut found = Vec::new();
    walk(root, &mut |node| {
        if node.kind == ContentKind::Title {
            if let Some(text) = node.content.text() {
                found.push(text.to_string());
            }
        }
    });
    found
}

/// Gives every node of `node` (and its descendants) a new id.
pub fn with_fresh_ids(node: &ContentItem) -> ContentItem {
    let content = match &node.content {
        Content::Nodes(children) => Content::Nodes(
            children
                .iter()
                .map(|child| Arc::new(with_fresh_ids(child)))
                .collect(),
        ),
        other => other.clone(),
    };
    let mut copy = node.with_content(content);
    copy.id = new_id();
    copy
}

/// Fills in missing ids and replaces ids already seen earlier in the walk.
pub fn ensure_unique_ids(root: &NodeRef) -> NodeRef {
    let mut seen = HashSet::new();
    dedupe(root, &mut seen)
}

fn dedupe(node: &NodeRef, seen: &mut HashSet<String>) -> NodeRef {
    let needs_id = node.id.is_empty() || seen.contains(&node.id);
    let id = if needs_id { new_id() } else { node.id.clone() };
    seen.insert(id.clone());

    let (content, children_changed) = match &node.content {
        Content::Nodes(children) => {
            let rebuilt: Vec<NodeRef> = children.iter().map(|child| dedupe(child, seen)).collect();
            let changed = rebuilt
                .iter()
                .zip(children.iter())
                .any(|(new, old)| !Arc::ptr_eq(new, old));
            (Content::Nodes(rebuilt), changed)
        }
        other => (other.clone(), false),
    };

    if !needs_id && !children_changed {
        return Arc::clone(node);
    }
    let mut copy = node.with_content(content);
    copy.id = id;
    Arc::new(copy)
}

/// Inserts `node` as a child of `container_id` at `index` (clamped). The
/// inserted subtree is given fresh ids. Non-container targets and unknown
/// ids leave the tree unchanged.
pub fn insert_child(root: &NodeRef, container_id: &str, index: usize, node: &ContentItem) -> NodeRef {
    let Some(children) = find(root, container_id).and_then(|c| c.content.nodes()) else {
        log::debug!("insert_child: no container {}", container_id);
        return Arc::clone(root);
    };

    let index = index.min(children.len());
    let mut next = children.to_vec();
    next.insert(index, Arc::new(with_fresh_ids(node)));
    set_content(root, container_id, Content::Nodes(next))
}

/// Removes the node with `id`. The root itself cannot be removed.
pub fn remove_node(root: &NodeRef, id: &str) -> NodeRef {
    let Some(parent) = find_parent(root, id) else {
        return Arc::clone(root);
    };

    let next: Vec<NodeRef> = parent
        .children()
        .iter()
        .filter(|child| child.id != id)
        .cloned()
        .collect();
    let parent_id = parent.id.clone();
    set_content(root, &parent_id, Content::Nodes(next))
}
