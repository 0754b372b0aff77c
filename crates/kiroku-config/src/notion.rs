//! Notion catalog configuration.

use serde::{Deserialize, Serialize};

const fn default_page_size() -> u32 {
    100
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotionConfig {
    /// Integration token (`secret_...` / `ntn_...`).
    #[serde(default)]
    pub token: String,

    /// Id of the database holding the catalog.
    #[serde(default)]
    pub database_id: String,

    /// Page size for database queries (Notion caps this at 100).
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            database_id: String::new(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl NotionConfig {
    /// Check if both the token and the database id are set.
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty() && !self.database_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = NotionConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.page_size, 100);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn configured_when_token_and_database_set() {
        let config = NotionConfig {
            token: "secret_abc".into(),
            database_id: "0123abcd".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn token_alone_is_not_enough() {
        let config = NotionConfig {
            token: "secret_abc".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}
