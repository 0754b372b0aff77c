//! Sync run tuning: batching, pacing, and retry policy.

use serde::{Deserialize, Serialize};

const fn default_batch_size() -> usize {
    15
}

const fn default_batch_pause_secs() -> u64 {
    15
}

const fn default_max_retries() -> u32 {
    16
}

const fn default_base_delay_ms() -> u64 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Records processed together before pausing.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between batches, in seconds.
    #[serde(default = "default_batch_pause_secs")]
    pub batch_pause_secs: u64,

    /// Retries after the first attempt before a call fails terminally.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry; doubles on every further attempt.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Also leave out records flagged "Cleaned".
    #[serde(default)]
    pub skip_cleaned: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_pause_secs: default_batch_pause_secs(),
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            skip_cleaned: false,
        }
    }
}
