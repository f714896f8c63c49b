//! Poem record model.
//!
//! # Responsibility
//! - Define the canonical poem record used by list, search and detail views.
//! - Parse tags and creation dates leniently from collection JSON.
//!
//! # Invariants
//! - `tags` never contains empty or whitespace-only labels.
//! - `created_instant` defaults to the Unix epoch when `created_at` is absent
//!   or unparseable; it is only used for ordering.

use crate::model::{optional_string, string_field, RecordId};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Stable identifier of a poem within one loaded collection.
pub type PoemId = RecordId;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Poem text as supplied by the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoemBody {
    /// One string, lines separated by `\n`.
    Text(String),
    /// Ordered lines.
    Lines(Vec<String>),
}

impl Default for PoemBody {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl PoemBody {
    /// Text used for free-text matching: lines joined with single spaces.
    pub fn search_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text.as_str()),
            Self::Lines(lines) => Cow::Owned(lines.join(" ")),
        }
    }

    /// Display lines with line breaks preserved.
    pub fn display_lines(&self) -> Vec<String> {
        let joined = match self {
            Self::Text(text) => Cow::Borrowed(text.as_str()),
            Self::Lines(lines) => Cow::Owned(lines.join("\n")),
        };
        if joined.is_empty() {
            return Vec::new();
        }
        joined
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Lines(lines) => lines.iter().all(String::is_empty),
        }
    }

    fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(text)) => Self::Text(text.clone()),
            Some(Value::Array(items)) => Self::Lines(items.iter().map(scalar_to_string).collect()),
            _ => Self::default(),
        }
    }
}

/// Canonical poem record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poem {
    pub id: PoemId,
    /// May be empty; list views substitute a placeholder.
    pub title: String,
    pub body: PoemBody,
    /// Parsed tag labels in source order.
    pub tags: Vec<String>,
    /// Reference to `Poet::id`; may not resolve.
    pub poet_id: Option<RecordId>,
    pub cover_image: Option<String>,
    /// Raw creation timestamp as supplied, shown as-is in views.
    pub created_at: Option<String>,
    created_instant: DateTime<Utc>,
}

impl Poem {
    /// Creates a poem with empty body, no tags and no creation date.
    pub fn new(id: impl Into<PoemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: PoemBody::default(),
            tags: Vec::new(),
            poet_id: None,
            cover_image: None,
            created_at: None,
            created_instant: DateTime::<Utc>::default(),
        }
    }

    pub fn with_body(mut self, body: PoemBody) -> Self {
        self.body = body;
        self
    }

    /// Sets tags through the same normalization used for collection input.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = clean_tags(tags);
        self
    }

    pub fn with_poet(mut self, poet_id: impl Into<RecordId>) -> Self {
        self.poet_id = Some(poet_id.into());
        self
    }

    pub fn with_cover_image(mut self, cover_image: impl Into<String>) -> Self {
        self.cover_image = Some(cover_image.into());
        self
    }

    /// Sets the raw creation timestamp and recomputes the sort instant.
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        let raw = created_at.into();
        self.created_instant = normalize_created_at(Some(raw.as_str()));
        self.created_at = Some(raw);
        self
    }

    /// Normalized creation instant used for `newest`/`oldest` ordering.
    pub fn created_instant(&self) -> DateTime<Utc> {
        self.created_instant
    }

    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }

    /// Decodes one collection record.
    ///
    /// Returns `None` only when the record is not an object or carries no
    /// usable `id`. Every other field degrades to its empty form on bad input.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = RecordId::from_json(object.get("id")?)?;
        let created_at = optional_string(object.get("created_at"));

        Some(Self {
            id,
            title: string_field(object, "title"),
            body: PoemBody::from_json(object.get("body")),
            tags: object.get("tags").map(parse_tags).unwrap_or_default(),
            poet_id: object.get("poet_id").and_then(RecordId::from_json),
            cover_image: optional_string(object.get("cover_image")),
            created_instant: normalize_created_at(created_at.as_deref()),
            created_at,
        })
    }
}

/// Parses a raw `tags` field.
///
/// Accepts a comma-delimited string or an array of scalars. Labels are trimmed
/// and blanks dropped; any other shape yields no tags.
pub fn parse_tags(raw: &Value) -> Vec<String> {
    match raw {
        Value::String(text) => clean_tags(text.split(',')),
        Value::Array(items) => clean_tags(items.iter().map(scalar_to_string)),
        _ => Vec::new(),
    }
}

fn clean_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| tag.as_ref().trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Normalizes a raw creation timestamp into a sortable instant.
///
/// Accepts RFC 3339, zone-less date-times (read as UTC) and bare dates.
/// Anything else maps to the Unix epoch.
pub fn normalize_created_at(raw: Option<&str>) -> DateTime<Utc> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(parse_instant)
        .unwrap_or_default()
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}


fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_created_at, parse_tags, Poem, PoemBody};
    use chrono::{DateTime, Datelike, Utc};
    use serde_json::json;

    #[test]
    fn parse_tags_matches_for_string_and_array_input() {
        let from_string = parse_tags(&json!(" nature, sky ,, "));
        let from_array = parse_tags(&json!(["nature", " sky", "", "   "]));
        assert_eq!(from_string, vec!["nature".to_string(), "sky".to_string()]);
        assert_eq!(from_string, from_array);
    }

    #[test]
    fn parse_tags_ignores_unsupported_shapes() {
        assert!(parse_tags(&json!({"tag": "x"})).is_empty());
        assert!(parse_tags(&json!(null)).is_empty());
        assert!(parse_tags(&json!(42)).is_empty());
    }

    #[test]
    fn created_at_defaults_to_epoch() {
        let epoch = DateTime::<Utc>::default();
        assert_eq!(normalize_created_at(None), epoch);
        assert_eq!(normalize_created_at(Some("not a date")), epoch);
        assert_eq!(normalize_created_at(Some("2024-06-01")).year(), 2024);
        assert!(normalize_created_at(Some("2024-06-01T10:30:00+05:30")) > epoch);
        assert!(normalize_created_at(Some("2024-06-01T10:30:00")) > epoch);
    }

    #[test]
    fn malformed_fields_degrade_without_dropping_record() {
        let poem = Poem::from_json(&json!({
            "id": 3,
            "title": "Wind",
            "body": {"unexpected": true},
            "tags": {"also": "wrong"},
            "created_at": 12
        }))
        .unwrap();
        assert_eq!(poem.id.as_str(), "3");
        assert!(poem.tags.is_empty());
        assert!(poem.body.is_empty());
        assert_eq!(poem.created_at, None);
        assert_eq!(poem.created_instant(), DateTime::<Utc>::default());
    }

    #[test]
    fn records_without_id_are_rejected() {
        assert!(Poem::from_json(&json!({"title": "orphan"})).is_none());
        assert!(Poem::from_json(&json!("not an object")).is_none());
    }

    #[test]
    fn body_lines_join_with_spaces_for_search_and_newlines_for_display() {
        let body = PoemBody::Lines(vec!["first line".to_string(), "second".to_string()]);
        assert_eq!(body.search_text(), "first line second");
        assert_eq!(body.display_lines(), vec!["first line", "second"]);

        let text = PoemBody::Text("a\r\nb\nc".to_string());
        assert_eq!(text.display_lines(), vec!["a", "b", "c"]);
    }
}
