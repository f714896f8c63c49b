//! Filter and sort engine for the poem list.
//!
//! # Responsibility
//! - Apply the active tag and free-text query to the loaded collection.
//! - Order the result by the requested sort mode.
//!
//! # Invariants
//! - Recomputed from scratch on every call; no partial results are cached.
//! - Sorting is stable: equal keys keep their order from the input slice.
//! - Tag matching is exact and case-sensitive; text matching is
//!   case-insensitive substring over title, then body.
//! - Titles order by Unicode collation (CLDR root), not by code point.

use crate::model::poem::Poem;
use feruca::Collator;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// List ordering selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Most recent `created_at` first.
    #[default]
    Newest,
    /// Oldest `created_at` first.
    Oldest,
    /// Title ascending.
    AToZ,
    /// Title descending.
    ZToA,
}

impl SortMode {
    /// Wire/display key (`newest|oldest|a-z|z-a`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::AToZ => "a-z",
            Self::ZToA => "z-a",
        }
    }

    /// Parses a sort key, falling back to `newest` for unknown input.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortModeError(String);

impl Display for ParseSortModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported sort mode `{}`; expected newest|oldest|a-z|z-a",
            self.0
        )
    }
}

impl Error for ParseSortModeError {}

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "a-z" => Ok(Self::AToZ),
            "z-a" => Ok(Self::ZToA),
            other => Err(ParseSortModeError(other.to_string())),
        }
    }
}

/// Current list query state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseQuery {
    /// Exact tag label; `None` selects all poems.
    pub active_tag: Option<String>,
    /// Free text; empty disables text filtering.
    pub text: String,
    pub sort: SortMode,
}

impl BrowseQuery {
    /// Returns whether `poem` passes every active predicate.
    pub fn matches(&self, poem: &Poem) -> bool {
        if let Some(tag) = self.active_tag.as_deref() {
            if !poem.has_tag(tag) {
                return false;
            }
        }

        let needle = self.text.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        if poem.title.to_lowercase().contains(&needle) {
            return true;
        }
        poem.body.search_text().to_lowercase().contains(&needle)
    }
}

/// Filters and sorts `poems` for the list view.
pub fn apply_filters<'a>(poems: &'a [Poem], query: &BrowseQuery) -> Vec<&'a Poem> {
    let mut result: Vec<&Poem> = poems.iter().filter(|poem| query.matches(poem)).collect();
    sort_poems(&mut result, query.sort);
    result
}

/// Stable in-place sort by `mode`.
pub fn sort_poems(poems: &mut [&Poem], mode: SortMode) {
    match mode {
        SortMode::Newest => {
            poems.sort_by(|left, right| right.created_instant().cmp(&left.created_instant()))
        }
        SortMode::Oldest => {
            poems.sort_by(|left, right| left.created_instant().cmp(&right.created_instant()))
        }
        SortMode::AToZ => {
            let mut collator = Collator::default();
            poems.sort_by(|left, right| collator.collate(left.title.as_str(), right.title.as_str()));
        }
        SortMode::ZToA => {
            let mut collator = Collator::default();
            poems.sort_by(|left, right| collator.collate(right.title.as_str(), left.title.as_str()));
        }
    }
}

/// Collation-order title comparison; empty titles sort first and lowercase
/// precedes uppercase on case-only differences.
///
/// Builds a fresh collator; prefer [`sort_poems`] for whole lists.
pub fn compare_titles(left: &str, right: &str) -> Ordering {
    Collator::default().collate(left, right)
}

#[cfg(test)]
mod tests {
    use super::{compare_titles, SortMode};
    use std::cmp::Ordering;

    #[test]
    fn sort_mode_round_trips_keys() {
        for mode in [
            SortMode::Newest,
            SortMode::Oldest,
            SortMode::AToZ,
            SortMode::ZToA,
        ] {
            assert_eq!(mode.as_str().parse::<SortMode>().unwrap(), mode);
        }
        assert!("sideways".parse::<SortMode>().is_err());
        assert_eq!(SortMode::parse_or_default("sideways"), SortMode::Newest);
    }

    #[test]
    fn title_compare_ignores_case_and_puts_empty_first() {
        assert_eq!(compare_titles("rain", "Sky"), Ordering::Less);
        assert_eq!(compare_titles("", "a"), Ordering::Less);
        assert_eq!(compare_titles("apple", "Apple"), Ordering::Less);
        assert_eq!(compare_titles("same", "same"), Ordering::Equal);
    }

    #[test]
    fn title_compare_places_accented_letters_with_their_base() {
        assert_eq!(compare_titles("éclair", "zebra"), Ordering::Less);
        assert_eq!(compare_titles("Édith", "eagle"), Ordering::Greater);
        assert_eq!(compare_titles("ñandu", "nube"), Ordering::Less);
    }
}
