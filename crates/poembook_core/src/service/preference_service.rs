//! Theme and font preference use-cases.
//!
//! # Responsibility
//! - Resolve the effective theme and font at startup.
//! - Persist user toggles.
//!
//! # Invariants
//! - Values are stored JSON-encoded (`"dark"`, `"noto-serif"`).
//! - Unreadable stored values fall back to defaults instead of failing.
//! - Theme resolution order: saved value, then system preference, then light.

use crate::model::preference::{FontKey, Theme};
use crate::repo::preference_repo::{PreferenceRepository, RepoError, RepoResult};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage key for the color theme.
pub const THEME_KEY: &str = "theme";
/// Storage key for the UI font.
pub const FONT_KEY: &str = "font";

/// Preference facade over repository implementations.
pub struct PreferenceService<R: PreferenceRepository> {
    repo: R,
}

impl<R: PreferenceRepository> PreferenceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Effective theme; `system_prefers_dark` is used when nothing is saved.
    pub fn theme(&self, system_prefers_dark: bool) -> RepoResult<Theme> {
        if let Some(saved) = self.load::<Theme>(THEME_KEY)? {
            return Ok(saved);
        }
        Ok(if system_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        })
    }

    pub fn set_theme(&self, theme: Theme) -> RepoResult<()> {
        self.store(THEME_KEY, &theme)?;
        info!("event=pref_set module=service status=ok key=theme value={theme}");
        Ok(())
    }

    /// Flips the effective theme, persists it and returns the new value.
    pub fn toggle_theme(&self, system_prefers_dark: bool) -> RepoResult<Theme> {
        let next = self.theme(system_prefers_dark)?.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Saved font, or `noto-sans`.
    pub fn font(&self) -> RepoResult<FontKey> {
        Ok(self.load::<FontKey>(FONT_KEY)?.unwrap_or_default())
    }

    pub fn set_font(&self, font: FontKey) -> RepoResult<()> {
        self.store(FONT_KEY, &font)?;
        info!("event=pref_set module=service status=ok key=font value={font}");
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> RepoResult<Option<T>> {
        let Some(raw) = self.repo.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                warn!("event=pref_load module=service status=invalid key={key}");
                Ok(None)
            }
        }
    }

    fn store<T: Serialize>(&self, key: &str, value: &T) -> RepoResult<()> {
        let encoded = serde_json::to_string(value)
            .map_err(|err| RepoError::InvalidValue(err.to_string()))?;
        self.repo.set(key, &encoded)
    }
}
