//! # Ingestion of Generated Slides
//!
//! Slides produced by the generation collaborator pass through here exactly
//! once before they reach the deck. Ingestion:
//!
//! 1. fills in missing slide ids and node ids and replaces duplicated ones,
//! 2. names unnamed slides after their position,
//! 3. applies the title repair policy ([`ensure_title`]),
//! 4. renumbers `slideOrder` densely.
//!
//! A slide count that differs from the outline count is reported but never
//! rejected.
//!
//! The title policy is a generation-time rule only. Slides edited by hand may
//! end up with zero or several titles and are left alone.

use crate::model::{new_id, Content, ContentItem, ContentKind, Slide};
use crate::ordering;
use crate::tree;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMismatch {
    pub outlines: usize,
    pub slides: usize,
}

#[derive(Debug, Clone)]
pub struct Ingested {
    pub slides: Vec<Slide>,
    /// How many slides received a synthesized title.
    pub repaired: usize,
    pub mismatch: Option<CountMismatch>,
}

pub fn has_title(slide: &Slide) -> bool {
    tree::contains_kind(&slide.content, &ContentKind::Title)
}

/// Wraps the root in a column headed by a title built from the slide name,
/// unless the tree already has a `title` node somewhere.
pub fn ensure_title(slide: Slide) -> Slide {
    if has_title(&slide) {
        return slide;
    }

    let title = ContentItem::new(ContentKind::Title, slide.slide_name.as_str());
    let wrapper = ContentItem::new(
        ContentKind::Column,
        Content::Nodes(vec![Arc::new(title), Arc::clone(&slide.content)]),
    );
    Slide {
        content: Arc::new(wrapper),
        ..slide
    }
}

pub fn ingest_layouts(outline_count: usize, layouts: Vec<Slide>, repair_titles: bool) -> Ingested {
    let mismatch = (outline_count != layouts.len()).then(|| {
        log::warn!(
            "generated {} slides for {} outline cards",
            layouts.len(),
            outline_count
        );
        CountMismatch {
            outlines: outline_count,
            slides: layouts.len(),
        }
    });

    let mut repaired = 0;
    let mut seen_ids = HashSet::new();
    let slides: Vec<Slide> = layouts
        .into_iter()
        .enumerate()
        .map(|(position, mut slide)| {
            if slide.id.is_empty() || !seen_ids.insert(slide.id.clone()) {
                slide.id = new_id();
                seen_ids.insert(slide.id.clone());
            }
            if slide.slide_name.trim().is_empty() {
                slide.slide_name = format!("Slide {}", position + 1);
            }
            slide.content = tree::ensure_unique_ids(&slide.content);

            if repair_titles && !has_title(&slide) {
                repaired += 1;
                slide = ensure_title(slide);
            }
            slide
        })
        .collect();

    if repaired > 0 {
        log::info!("added a title to {} generated slides", repaired);
    }

    Ingested {
        slides: ordering::normalize(&slides),
        repaired,
        mismatch,
    }
}
