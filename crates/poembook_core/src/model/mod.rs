//! Poem and poet domain model.
//!
//! # Responsibility
//! - Define the records loaded from the site's JSON collections.
//! - Own the lenient per-record decoding rules (tags, body, ids, dates).
//!
//! # Invariants
//! - Records are immutable after load; derived fields never change identity.
//! - Ids always compare through their normalized string form.

pub mod catalog;
pub mod poem;
pub mod poet;
pub mod preference;

use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Identifier shared by poems and poets.
///
/// Collections supply ids as JSON strings or numbers. Both are stored in their
/// normalized string form so `7` and `"7"` refer to the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    /// Creates an id from its textual form.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the normalized string form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Reads an id from a JSON value.
    ///
    /// Returns `None` for null, empty strings and non-scalar values.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Self(trimmed.to_string()))
                }
            }
            Value::Number(number) => Some(Self(normalize_number(number))),
            _ => None,
        }
    }

    /// Compares against an id given as free text (e.g. from a click or CLI arg).
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == raw.trim()
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Integral floats render without a fraction (`1.0` -> `"1"`).
fn normalize_number(number: &serde_json::Number) -> String {
    if let Some(value) = number.as_i64() {
        return value.to_string();
    }
    if let Some(value) = number.as_u64() {
        return value.to_string();
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() < 9.0e15 => {
            format!("{}", value as i64)
        }
        _ => number.to_string(),
    }
}

/// Reads a required text field; numbers are stringified, anything else is empty.
pub(crate) fn string_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

/// Reads an optional non-empty string field, tolerating wrong types.
pub(crate) fn optional_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text.clone()),
        _ => None,
    }
}
