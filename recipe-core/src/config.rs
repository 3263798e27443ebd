//! Deployment configuration.
//!
//! Settings come from a plain key lookup so the UI can feed it
//! compile-time `option_env!` values and tests can feed it a map:
//!
//! | key                    | meaning                                  |
//! |------------------------|------------------------------------------|
//! | `RECIPE_BOX_API_URL`   | catalog REST API; unset = in-memory demo |
//! | `RECIPE_BOX_API_TOKEN` | bearer token for both APIs               |
//! | `RECIPE_BOX_AI_URL`    | AI endpoints; defaults to the API URL    |
//! | `RECIPE_BOX_PAGE_SIZE` | recipes per grid page (default 8)        |

use reqwest::Url;
use thiserror::Error;

pub const API_URL_KEY: &str = "RECIPE_BOX_API_URL";
pub const API_TOKEN_KEY: &str = "RECIPE_BOX_API_TOKEN";
pub const AI_URL_KEY: &str = "RECIPE_BOX_AI_URL";
pub const PAGE_SIZE_KEY: &str = "RECIPE_BOX_PAGE_SIZE";

pub const DEFAULT_PAGE_SIZE: usize = 8;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{key} is not a valid URL: {value}")]
    InvalidUrl { key: &'static str, value: String },
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    pub ai_url: Option<String>,
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            ai_url: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Build from a key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let page_size = match get(PAGE_SIZE_KEY) {
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                ConfigError::Validation(format!("{} must be a number, got {}", PAGE_SIZE_KEY, raw))
            })?,
            None => DEFAULT_PAGE_SIZE,
        };

        let config = Self {
            api_url: get(API_URL_KEY),
            api_token: get(API_TOKEN_KEY),
            ai_url: get(AI_URL_KEY),
            page_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [(API_URL_KEY, &self.api_url), (AI_URL_KEY, &self.ai_url)] {
            if let Some(value) = value {
                if Url::parse(value).is_err() {
                    return Err(ConfigError::InvalidUrl {
                        key,
                        value: value.clone(),
                    });
                }
            }
        }
        if self.page_size == 0 {
            return Err(ConfigError::Validation(format!(
                "{} must be at least 1",
                PAGE_SIZE_KEY
            )));
        }
        Ok(())
    }

    /// Base URL for the AI endpoints, if any backend is configured
    pub fn ai_base(&self) -> Option<&str> {
        self.ai_url.as_deref().or(self.api_url.as_deref())
    }

    /// Whether writes go to the in-memory demo store
    pub fn is_offline(&self) -> bool {
        self.api_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_lookup_is_offline_default() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.is_offline());
        assert_eq!(config.ai_base(), None);
    }

    #[test]
    fn test_ai_base_falls_back_to_api_url() {
        let config = AppConfig::from_lookup(lookup(&[
            (API_URL_KEY, "https://be.example.com"),
            (API_TOKEN_KEY, " 1234 "),
        ]))
        .unwrap();
        assert_eq!(config.ai_base(), Some("https://be.example.com"));
        assert_eq!(config.api_token.as_deref(), Some("1234"));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = AppConfig::from_lookup(lookup(&[(API_URL_KEY, "   ")])).unwrap();
        assert!(config.is_offline());
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = AppConfig::from_lookup(lookup(&[(AI_URL_KEY, "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { key: AI_URL_KEY, .. }));

        let err = AppConfig::from_lookup(lookup(&[(PAGE_SIZE_KEY, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = AppConfig::from_lookup(lookup(&[(PAGE_SIZE_KEY, "eight")])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
