//! # ff-config
//!
//! Layered configuration loading for FieldFix using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FIELDFIX_*` prefix, `__` as separator)
//! 2. Project-level `.fieldfix/config.toml`
//! 3. User-level `~/.config/fieldfix/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FIELDFIX_GEMINI__API_KEY` -> `gemini.api_key`,
//! `FIELDFIX_PATHS__KB_DIR` -> `paths.kb_dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ff_config::FieldFixConfig;
//!
//! let config = FieldFixConfig::load_with_dotenv().expect("config");
//! if config.gemini.is_configured() {
//!     println!("primary model: {}", config.gemini.model);
//! }
//! ```

mod error;
mod gemini;
mod general;
mod paths;
mod retry;
mod store;

pub use error::ConfigError;
pub use gemini::GeminiConfig;
pub use general::GeneralConfig;
pub use paths::PathsConfig;
pub use retry::RetrySettings;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FieldFixConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl FieldFixConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a source fails to parse, or
    /// `ConfigError::OutOfRange` if a loaded value is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load with a specific project root instead of the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_for_project(root: &Path) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment_for(root))
    }

    /// Provider chain rooted at the current directory.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_for(Path::new("."))
    }

    /// Provider chain rooted at `root`.
    ///
    /// Public so tests can inspect the figment directly or layer additional
    /// providers on top.
    #[must_use]
    pub fn figment_for(root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = root.join(".fieldfix").join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("FIELDFIX_").split("__"))
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no stage can work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OutOfRange` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::OutOfRange {
                field: "retry.max_attempts",
                reason: "must be at least 1",
            });
        }
        if self.gemini.model.trim().is_empty() {
            return Err(ConfigError::OutOfRange {
                field: "gemini.model",
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    /// The Gemini section, or an error if no API key is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredential` when `gemini.api_key` is empty.
    pub fn require_gemini(&self) -> Result<&GeminiConfig, ConfigError> {
        if self.gemini.is_configured() {
            Ok(&self.gemini)
        } else {
            Err(ConfigError::MissingCredential {
                section: "gemini",
                env: "FIELDFIX_GEMINI__API_KEY",
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fieldfix").join("config.toml"))
    }
}
