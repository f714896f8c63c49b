//! Loaded collections for one browsing session.
//!
//! # Invariants
//! - Poems are held newest-first (stable), the order every view starts from.
//! - Contents never change after construction.

use crate::model::poem::Poem;
use crate::model::poet::Poet;
use log::warn;
use std::collections::HashSet;

/// Poems and poets loaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    poems: Vec<Poem>,
    poets: Vec<Poet>,
}

impl Catalog {
    /// Builds a catalog, ordering poems newest-first.
    pub fn new(mut poems: Vec<Poem>, poets: Vec<Poet>) -> Self {
        poems.sort_by(|left, right| right.created_instant().cmp(&left.created_instant()));

        let mut seen = HashSet::with_capacity(poems.len());
        for poem in &poems {
            if !seen.insert(poem.id.as_str()) {
                warn!(
                    "event=catalog_build module=model status=duplicate_id poem_id={}",
                    poem.id
                );
            }
        }

        Self { poems, poets }
    }

    pub fn poems(&self) -> &[Poem] {
        &self.poems
    }

    pub fn poets(&self) -> &[Poet] {
        &self.poets
    }

    pub fn is_empty(&self) -> bool {
        self.poems.is_empty()
    }
}
