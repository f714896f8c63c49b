//! Selection and detail resolution.
//!
//! # Invariants
//! - Ids compare through their normalized string form.
//! - A poet reference that does not resolve is a normal outcome
//!   ([`PoetLookup::Unknown`]), never an error.

use crate::model::poem::Poem;
use crate::model::poet::Poet;
use crate::model::RecordId;

/// Result of resolving `Poem::poet_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoetLookup<'a> {
    Known(&'a Poet),
    /// Missing `poet_id` or no poet with that id.
    Unknown,
}

impl<'a> PoetLookup<'a> {
    pub fn poet(self) -> Option<&'a Poet> {
        match self {
            Self::Known(poet) => Some(poet),
            Self::Unknown => None,
        }
    }
}

/// Finds a poem by id given as free text.
pub fn find_poem<'a>(poems: &'a [Poem], id: &str) -> Option<&'a Poem> {
    poems.iter().find(|poem| poem.id.matches(id))
}

/// Resolves the poet referenced by `poet_id`.
pub fn find_poet<'a>(poets: &'a [Poet], poet_id: Option<&RecordId>) -> PoetLookup<'a> {
    poet_id
        .and_then(|poet_id| poets.iter().find(|poet| &poet.id == poet_id))
        .map_or(PoetLookup::Unknown, PoetLookup::Known)
}
