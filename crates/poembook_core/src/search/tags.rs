//! Tag aggregation for the tag bar.
//!
//! # Responsibility
//! - Count how many poems carry each tag.
//! - Provide a deterministic presentation order.
//!
//! # Invariants
//! - A poem contributes 1 to each of its distinct tags, or 1 to
//!   [`UNCATEGORIZED_TAG`] when it has none. Poem records are never mutated.
//! - `entries()` is ordered by descending count, ties by first-seen order.

use crate::model::poem::Poem;
use std::collections::HashMap;

/// Synthetic bucket for poems without usable tags.
pub const UNCATEGORIZED_TAG: &str = "Uncategorized";

/// Tag label with its poem count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Aggregated tag counts over one poem collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCounts {
    total: usize,
    entries: Vec<TagCount>,
}

impl TagCounts {
    /// Number of poems aggregated; shown on the "All" pseudo-tag.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Tags ordered by descending count, ties by first appearance.
    pub fn entries(&self) -> &[TagCount] {
        &self.entries
    }

    /// Count for one label, `0` when unknown.
    pub fn count(&self, tag: &str) -> usize {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map_or(0, |entry| entry.count)
    }

    /// Sum over every bucket, including [`UNCATEGORIZED_TAG`].
    pub fn contributions(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Aggregates tag counts for the given poems.
pub fn aggregate_tags(poems: &[Poem]) -> TagCounts {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<TagCount> = Vec::new();

    for poem in poems {
        if poem.tags.is_empty() {
            bump(&mut index, &mut entries, UNCATEGORIZED_TAG);
            continue;
        }
        for (position, tag) in poem.tags.iter().enumerate() {
            // Duplicate labels within one poem count once.
            if poem.tags[..position].contains(tag) {
                continue;
            }
            bump(&mut index, &mut entries, tag.as_str());
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    entries.sort_by(|left, right| right.count.cmp(&left.count));

    TagCounts {
        total: poems.len(),
        entries,
    }
}

fn bump<'a>(index: &mut HashMap<&'a str, usize>, entries: &mut Vec<TagCount>, tag: &'a str) {
    match index.get(tag) {
        Some(&slot) => entries[slot].count += 1,
        None => {
            index.insert(tag, entries.len());
            entries.push(TagCount {
                tag: tag.to_string(),
                count: 1,
            });
        }
    }
}
