//! Poet record model.

use crate::model::{optional_string, string_field, RecordId};
use serde_json::Value;

/// Stable identifier of a poet, referenced by `Poem::poet_id`.
pub type PoetId = RecordId;

/// Poet profile as supplied by the poets collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poet {
    pub id: PoetId,
    pub name: String,
    pub bio: Option<String>,
    /// Relative or absolute image path.
    pub photo: Option<String>,
    /// Raw join timestamp as supplied.
    pub created_at: Option<String>,
}

impl Poet {
    pub fn new(id: impl Into<PoetId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bio: None,
            photo: None,
            created_at: None,
        }
    }

    /// Decodes one collection record; `None` when it has no usable `id`.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = RecordId::from_json(object.get("id")?)?;
        let name = string_field(object, "name");

        Some(Self {
            id,
            name,
            bio: optional_string(object.get("bio")),
            photo: optional_string(object.get("photo")),
            created_at: optional_string(object.get("created_at")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Poet;
    use serde_json::json;

    #[test]
    fn numeric_name_is_kept_as_text() {
        let poet = Poet::from_json(&json!({"id": 3, "name": 1984, "bio": ""})).unwrap();
        assert_eq!(poet.id.as_str(), "3");
        assert_eq!(poet.name, "1984");
        assert_eq!(poet.bio, None);
    }

    #[test]
    fn structured_name_degrades_to_empty() {
        let poet = Poet::from_json(&json!({"id": "p1", "name": {"ta": "x"}})).unwrap();
        assert_eq!(poet.name, "");
        assert!(Poet::from_json(&json!({"name": "No id"})).is_none());
    }
}
