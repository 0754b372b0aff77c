//! Per-run call accounting.
//!
//! One [`SyncStats`] value is created per sync run and lent to every
//! pipeline stage, so counters stay correct however the records of a batch
//! are scheduled.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct SyncStats {
    search_calls: AtomicU64,
    media_fetches: AtomicU64,
    catalog_writes: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub search_calls: u64,
    pub media_fetches: u64,
    pub catalog_writes: u64,
}

impl SyncStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one search request, retries included.
    pub fn record_search(&self) {
        self.search_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one media database request, retries included.
    pub fn record_fetch(&self) {
        self.media_fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write(&self) {
        self.catalog_writes.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            search_calls: self.search_calls.load(Ordering::Relaxed),
            media_fetches: self.media_fetches.load(Ordering::Relaxed),
            catalog_writes: self.catalog_writes.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let stats = SyncStats::new();
        stats.record_search();
        stats.record_search();
        stats.record_fetch();
        assert_eq!(
            stats.snapshot(),
            StatsSnapshot {
                search_calls: 2,
                media_fetches: 1,
                catalog_writes: 0,
            }
        );
    }
}
