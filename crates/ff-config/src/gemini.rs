//! Generative model service configuration.

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_fallback_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

/// Default HTTP timeout per generator call, in seconds.
const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// API key. Also read from `FIELDFIX_GEMINI__API_KEY`.
    #[serde(default)]
    pub api_key: String,

    /// Primary model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Model tried once after the primary's retry budget is exhausted.
    /// Empty, or equal to `model`, disables fallback.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Returns `true` if an API key is set.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Returns `true` if a distinct fallback model is configured.
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        !self.fallback_model.is_empty() && self.fallback_model != self.model
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            fallback_model: default_fallback_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeminiConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.model, "gemini-3-flash-preview");
        assert_eq!(config.fallback_model, "gemini-3-pro-preview");
        assert!(config.has_fallback());
    }

    #[test]
    fn same_fallback_name_disables_fallback() {
        let config = GeminiConfig {
            fallback_model: "gemini-3-flash-preview".into(),
            ..GeminiConfig::default()
        };
        assert!(!config.has_fallback());
    }
}
