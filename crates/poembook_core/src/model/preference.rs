//! Display preferences persisted across sessions.
//!
//! # Invariants
//! - Serialized forms match the stored keys (`light|dark`,
//!   `noto-sans|noto-serif|baloo`).

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownPreferenceValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownPreferenceValue {
                key: "theme",
                value: other.to_string(),
            }),
        }
    }
}

/// UI font choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontKey {
    #[default]
    NotoSans,
    NotoSerif,
    Baloo,
}

impl FontKey {
    pub const ALL: [FontKey; 3] = [Self::NotoSans, Self::NotoSerif, Self::Baloo];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotoSans => "noto-sans",
            Self::NotoSerif => "noto-serif",
            Self::Baloo => "baloo",
        }
    }

    /// CSS `font-family` stack for this choice.
    pub fn css_stack(self) -> &'static str {
        match self {
            Self::NotoSans => "'Noto Sans Tamil', Inter, system-ui, -apple-system, sans-serif",
            Self::NotoSerif => "'Noto Serif Tamil', Georgia, 'Times New Roman', serif",
            Self::Baloo => {
                "'Baloo 2', 'Noto Sans Tamil', Inter, system-ui, -apple-system, sans-serif"
            }
        }
    }
}

impl Display for FontKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontKey {
    type Err = UnknownPreferenceValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or(UnknownPreferenceValue {
                key: "font",
                value: normalized,
            })
    }
}

/// Preference value outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreferenceValue {
    pub key: &'static str,
    pub value: String,
}

impl Display for UnknownPreferenceValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported {} value `{}`", self.key, self.value)
    }
}

impl std::error::Error for UnknownPreferenceValue {}

#[cfg(test)]
mod tests {
    use super::{FontKey, Theme};

    #[test]
    fn serialized_forms_match_storage_keys() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(
            serde_json::to_string(&FontKey::NotoSerif).unwrap(),
            "\"noto-serif\""
        );
        for key in FontKey::ALL {
            assert_eq!(key.as_str().parse::<FontKey>().unwrap(), key);
        }
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!("sepia".parse::<Theme>().is_err());
        let err = "comic".parse::<FontKey>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported font value `comic`");
    }
}
