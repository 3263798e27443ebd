//! User preferences
//!
//! Theme and language, persisted as JSON under [`STORAGE_KEY`]. Unreadable
//! stored values fall back to the defaults.

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const STORAGE_KEY: &str = "recipe-box.preferences";

/// Languages offered in the header, as (code, native label)
pub const LANGUAGES: &[(&str, &str)] = &[("he", "עברית"), ("en", "English"), ("ar", "العربية")];

const RTL_LANGUAGES: &[&str] = &["he", "ar"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            language: "he".to_string(),
        }
    }
}

impl Preferences {
    /// Parse a stored value; anything unreadable gives the defaults
    pub fn from_stored(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match serde_json::from_str::<Preferences>(raw) {
            Ok(prefs) if !prefs.language.trim().is_empty() => prefs,
            Ok(_) => Self::default(),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable preferences");
                Self::default()
            }
        }
    }

    pub fn to_stored(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Text direction for the current language
    pub fn is_rtl(&self) -> bool {
        let primary = self.language.split(['-', '_']).next().unwrap_or_default();
        RTL_LANGUAGES
            .iter()
            .any(|code| code.eq_ignore_ascii_case(primary))
    }

    pub fn dir(&self) -> &'static str {
        if self.is_rtl() {
            "rtl"
        } else {
            "ltr"
        }
    }

    pub fn with_language(mut self, code: &str) -> Self {
        self.language = code.to_string();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}
