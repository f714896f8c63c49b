//! Render sink contract and view-model builders.
//!
//! # Responsibility
//! - Define the [`RenderSink`] boundary the browse controller drives.
//! - Shape domain records into display-ready view models.
//!
//! # Invariants
//! - At most one [`TagControl`] is active; "All" is active iff no tag is selected.
//! - A [`ListEntry`] is active iff its id equals the selected id.
//! - View builders never fail; missing data maps to placeholders.

pub mod text;

use crate::model::poem::{Poem, PoemId};
use crate::model::poet::{Poet, PoetId};
use crate::search::selection::PoetLookup;
use crate::search::tags::TagCounts;
use crate::source::FetchError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Label of the pseudo-tag that clears the tag filter.
pub const ALL_TAG_LABEL: &str = "All";
/// Title shown for poems with an empty title.
pub const UNTITLED_LABEL: &str = "Untitled";
/// Poet name shown when `poet_id` does not resolve ("unknown author").
pub const UNKNOWN_POET_LABEL: &str = "அறியப்படாதவர்";
/// Photo shown for poets without one.
pub const POET_PHOTO_PLACEHOLDER: &str = "images/placeholder.jpg";

const EXCERPT_MAX_CHARS: usize = 100;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Output side of the browse controller.
pub trait RenderSink {
    /// Replaces the tag bar.
    fn render_tags(&mut self, controls: &[TagControl]);
    /// Replaces the visible poem list.
    fn render_list(&mut self, entries: &[ListEntry]);
    /// Replaces the detail pane.
    fn render_detail(&mut self, detail: &DetailView);
    /// Shows the "failed to load" state instead of an empty list.
    fn render_load_failure(&mut self, error: &FetchError);
}

impl<T: RenderSink + ?Sized> RenderSink for &mut T {
    fn render_tags(&mut self, controls: &[TagControl]) {
        (**self).render_tags(controls);
    }

    fn render_list(&mut self, entries: &[ListEntry]) {
        (**self).render_list(entries);
    }

    fn render_detail(&mut self, detail: &DetailView) {
        (**self).render_detail(detail);
    }

    fn render_load_failure(&mut self, error: &FetchError) {
        (**self).render_load_failure(error);
    }
}

/// One selectable tag button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagControl {
    /// Tag applied on click; `None` for the "All" control.
    pub tag: Option<String>,
    pub label: String,
    pub count: usize,
    pub active: bool,
}

impl TagControl {
    /// Button caption, e.g. `nature (3)`.
    pub fn caption(&self) -> String {
        format!("{} ({})", self.label, self.count)
    }
}

/// One row of the poem list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: PoemId,
    pub title: String,
    /// Cover image path.
    pub thumbnail: Option<String>,
    /// Raw creation date.
    pub subtitle: Option<String>,
    pub excerpt: Option<String>,
    pub active: bool,
}

/// Detail pane content for the selected poem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub poem_id: PoemId,
    pub title: String,
    /// Poet name or [`UNKNOWN_POET_LABEL`].
    pub poet_name: String,
    pub poet_known: bool,
    /// Raw creation date, empty when absent.
    pub created_at: String,
    /// Body with line breaks preserved.
    pub lines: Vec<String>,
}

/// One card of the poets directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoetCard {
    pub id: PoetId,
    pub name: String,
    pub bio: String,
    pub photo: String,
    pub joined: String,
}

/// Builds the tag bar: "All" first, then tags in aggregate order.
pub fn tag_controls(counts: &TagCounts, selected: Option<&str>) -> Vec<TagControl> {
    let mut controls = Vec::with_capacity(counts.entries().len() + 1);
    controls.push(TagControl {
        tag: None,
        label: ALL_TAG_LABEL.to_string(),
        count: counts.total(),
        active: selected.is_none(),
    });
    controls.extend(counts.entries().iter().map(|entry| TagControl {
        tag: Some(entry.tag.clone()),
        label: entry.tag.clone(),
        count: entry.count,
        active: selected == Some(entry.tag.as_str()),
    }));
    controls
}

/// Builds list rows, marking the selected poem active.
pub fn list_entries(items: &[&Poem], selected_id: Option<&PoemId>) -> Vec<ListEntry> {
    items
        .iter()
        .map(|poem| ListEntry {
            id: poem.id.clone(),
            title: display_title(poem),
            thumbnail: poem.cover_image.clone(),
            subtitle: poem.created_at.clone(),
            excerpt: excerpt(poem),
            active: selected_id == Some(&poem.id),
        })
        .collect()
}

/// Builds the detail pane for `poem`.
pub fn detail_view(poem: &Poem, poet: PoetLookup<'_>) -> DetailView {
    let (poet_name, poet_known) = match poet {
        PoetLookup::Known(poet) => (poet.name.clone(), true),
        PoetLookup::Unknown => (UNKNOWN_POET_LABEL.to_string(), false),
    };
    DetailView {
        poem_id: poem.id.clone(),
        title: poem.title.clone(),
        poet_name,
        poet_known,
        created_at: poem.created_at.clone().unwrap_or_default(),
        lines: poem.body.display_lines(),
    }
}

/// Builds the poets directory cards in collection order.
pub fn poet_cards(poets: &[Poet]) -> Vec<PoetCard> {
    poets
        .iter()
        .map(|poet| PoetCard {
            id: poet.id.clone(),
            name: poet.name.clone(),
            bio: poet.bio.clone().unwrap_or_default(),
            photo: poet
                .photo
                .clone()
                .unwrap_or_else(|| POET_PHOTO_PLACEHOLDER.to_string()),
            joined: poet.created_at.clone().unwrap_or_default(),
        })
        .collect()
}

/// Whitespace-collapsed body preview, at most 100 characters.
pub fn excerpt(poem: &Poem) -> Option<String> {
    let text = poem.body.search_text();
    let normalized = WHITESPACE_RE.replace_all(&text, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut preview: String = trimmed.chars().take(EXCERPT_MAX_CHARS).collect();
    if trimmed.chars().count() > EXCERPT_MAX_CHARS {
        preview.push('…');
    }
    Some(preview)
}

fn display_title(poem: &Poem) -> String {
    if poem.title.is_empty() {
        UNTITLED_LABEL.to_string()
    } else {
        poem.title.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{excerpt, list_entries, poet_cards, tag_controls, POET_PHOTO_PLACEHOLDER};
    use crate::model::poem::{Poem, PoemBody};
    use crate::model::poet::Poet;
    use crate::search::tags::aggregate_tags;

    #[test]
    fn active_control_follows_selected_tag() {
        let poems = vec![Poem::new("1", "Sky").with_tags(["sky"])];
        let counts = aggregate_tags(&poems);

        let all = tag_controls(&counts, None);
        assert!(all[0].active);
        assert_eq!(all[0].caption(), "All (1)");

        let sky = tag_controls(&counts, Some("sky"));
        assert!(!sky[0].active);
        assert_eq!(sky.iter().filter(|c| c.active).count(), 1);
        assert_eq!(sky[1].tag.as_deref(), Some("sky"));
        assert!(sky[1].active);
    }

    #[test]
    fn list_entries_use_placeholder_title() {
        let poem = Poem::new("4", "");
        let entries = list_entries(&[&poem], None);
        assert_eq!(entries[0].title, "Untitled");
        assert!(!entries[0].active);
    }

    #[test]
    fn excerpt_collapses_whitespace_and_truncates() {
        let poem = Poem::new("1", "Long").with_body(PoemBody::Text(format!(
            "first\n\n   second {}",
            "x".repeat(200)
        )));
        let preview = excerpt(&poem).unwrap();
        assert!(preview.starts_with("first second"));
        assert!(preview.ends_with('…'));
        assert!(excerpt(&Poem::new("2", "Empty")).is_none());
    }

    #[test]
    fn poet_cards_fill_missing_photo() {
        let cards = poet_cards(&[Poet::new("1", "Avvaiyar")]);
        assert_eq!(cards[0].photo, POET_PHOTO_PLACEHOLDER);
        assert_eq!(cards[0].bio, "");
    }
}
