//! # kiroku-config
//!
//! Layered configuration loading for Kiroku using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KIROKU_*` prefix, `__` as separator)
//! 2. Project-level `.kiroku/config.toml`
//! 3. User-level `~/.config/kiroku/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `KIROKU_NOTION__TOKEN` -> `notion.token`,
//! `KIROKU_SYNC__BATCH_SIZE` -> `sync.batch_size`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use kiroku_config::KirokuConfig;
//!
//! let config = KirokuConfig::load_with_dotenv().expect("config");
//! if config.notion.is_configured() {
//!     println!("Catalog database: {}", config.notion.database_id);
//! }
//! ```

mod error;
mod jikan;
mod notion;
mod search;
mod sync;

pub use error::ConfigError;
pub use jikan::JikanConfig;
pub use notion::NotionConfig;
pub use search::SearchConfig;
pub use sync::SyncConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KirokuConfig {
    #[serde(default)]
    pub notion: NotionConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub jikan: JikanConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

impl KirokuConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value fails
    /// validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support from the current directory
    /// or its nearest parent. A missing `.env` is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Dotenv`] if a `.env` file exists but cannot be
    /// read or parsed; otherwise see [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
            Err(error) if error.not_found() => {}
            Err(error) => return Err(ConfigError::Dotenv(error)),
        }
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".kiroku/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("KIROKU_").split("__"))
    }

    /// Reject values the sync pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero batch size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sync.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sync.batch_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The Notion section, or an error naming what is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the token or database id is empty.
    pub fn require_notion(&self) -> Result<&NotionConfig, ConfigError> {
        if self.notion.is_configured() {
            Ok(&self.notion)
        } else {
            Err(ConfigError::NotConfigured {
                section: "notion".to_string(),
            })
        }
    }

    /// The search section, or an error naming what is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the API key or engine id is empty.
    pub fn require_search(&self) -> Result<&SearchConfig, ConfigError> {
        if self.search.is_configured() {
            Ok(&self.search)
        } else {
            Err(ConfigError::NotConfigured {
                section: "search".to_string(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kiroku").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = KirokuConfig::default();
        assert!(!config.notion.is_configured());
        assert!(!config.search.is_configured());
        assert_eq!(config.sync.batch_size, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn require_reports_missing_section() {
        let config = KirokuConfig::default();
        let err = config.require_notion().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { ref section } if section == "notion"));
        let err = config.require_search().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { ref section } if section == "search"));
    }

    #[test]
    fn zero_batch_size_is_invalid() {
        let mut config = KirokuConfig::default();
        config.sync.batch_size = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "sync.batch_size"));
    }
}
