//! Google Programmable Search configuration.

use serde::{Deserialize, Serialize};

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Custom Search JSON API key.
    #[serde(default)]
    pub api_key: String,

    /// Search engine id (`cx`).
    #[serde(default)]
    pub engine_id: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            engine_id: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SearchConfig {
    /// Check if the API key and engine id are both set.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.engine_id.is_empty()
    }
}
