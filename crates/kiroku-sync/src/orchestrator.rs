//! Batched, paced sync run over the whole catalog.

use std::fmt;
use std::time::Duration;

use futures::future::join_all;
use kiroku_config::SyncConfig;
use kiroku_core::{CatalogRecord, CatalogStore, CatalogUpdate, MediaDatabase, SearchService};
use serde::Serialize;
use thiserror::Error;

use crate::aggregator::Aggregator;
use crate::backoff::Backoff;
use crate::resolver::{ResolvedFrom, Resolver};
use crate::stats::{StatsSnapshot, SyncStats};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to list catalog records: {0}")]
    Catalog(String),
}

/// Knobs for one sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub batch_size: usize,
    pub batch_pause: Duration,
    pub skip_cleaned: bool,
    /// Records of the filtered list to pass over before starting.
    pub start: usize,
    pub limit: Option<usize>,
    /// Compute updates without writing them.
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::from_config(&SyncConfig::default())
    }
}

impl SyncOptions {
    #[must_use]
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            batch_pause: Duration::from_secs(config.batch_pause_secs),
            skip_cleaned: config.skip_cleaned,
            start: 0,
            limit: None,
            dry_run: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// What happened to one catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    Updated,
    DryRun,
    /// Neither the record nor a search produced an identifier.
    Unresolved,
    /// The root entry could not be fetched.
    NoData,
    WriteFailed { error: String },
}

impl RecordOutcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::DryRun => "dry_run",
            Self::Unresolved => "unresolved",
            Self::NoData => "no_data",
            Self::WriteFailed { .. } => "write_failed",
        }
    }
}

impl fmt::Display for RecordOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
    pub key: String,
    pub name: String,
    pub id: Option<u32>,
    pub source: Option<ResolvedFrom>,
    pub outcome: RecordOutcome,
    pub update: Option<CatalogUpdate>,
}

impl RecordReport {
    fn new(record: &CatalogRecord, outcome: RecordOutcome) -> Self {
        Self {
            key: record.key.clone(),
            name: record.display_name().to_string(),
            id: None,
            source: None,
            outcome,
            update: None,
        }
    }
}

/// Result of a full sync run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    /// Records listed from the catalog, before filtering.
    pub listed: usize,
    pub processed: usize,
    pub batches: usize,
    pub updated: usize,
    pub dry_run: usize,
    pub unresolved: usize,
    pub no_data: usize,
    pub write_failed: usize,
    pub stats: StatsSnapshot,
    pub records: Vec<RecordReport>,
}

impl SyncReport {
    fn push(&mut self, record: RecordReport) {
        self.processed += 1;
        match record.outcome {
            RecordOutcome::Updated => self.updated += 1,
            RecordOutcome::DryRun => self.dry_run += 1,
            RecordOutcome::Unresolved => self.unresolved += 1,
            RecordOutcome::NoData => self.no_data += 1,
            RecordOutcome::WriteFailed { .. } => self.write_failed += 1,
        }
        self.records.push(record);
    }
}

/// Records eligible for a run: not skipped (nor cleaned, if configured),
/// then windowed by `start` and `limit`. Catalog order is preserved.
#[must_use]
pub fn select_pending(records: Vec<CatalogRecord>, options: &SyncOptions) -> Vec<CatalogRecord> {
    records
        .into_iter()
        .filter(|r| !r.skip && !(options.skip_cleaned && r.cleaned))
        .skip(options.start)
        .take(options.limit.unwrap_or(usize::MAX))
        .collect()
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Drives resolve, aggregate, and write-back for every pending record.
pub struct Orchestrator<'a, C, S, D> {
    catalog: &'a C,
    search: &'a S,
    db: &'a D,
    backoff: Backoff,
    options: SyncOptions,
}

impl<'a, C, S, D> Orchestrator<'a, C, S, D>
where
    C: CatalogStore,
    S: SearchService,
    D: MediaDatabase,
{
    #[must_use]
    pub const fn new(
        catalog: &'a C,
        search: &'a S,
        db: &'a D,
        backoff: Backoff,
        options: SyncOptions,
    ) -> Self {
        Self {
            catalog,
            search,
            db,
            backoff,
            options,
        }
    }

    /// Run one full sync.
    ///
    /// Records of a batch are driven together on the current task; batches
    /// run in catalog order with `batch_pause` between them. A failure inside
    /// one record's pipeline only shows up in that record's outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Catalog`] if the catalog cannot be listed.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let stats = SyncStats::new();
        let records = self
            .backoff
            .execute("catalog list", || self.catalog.list_records())
            .await
            .map_err(|e| SyncError::Catalog(e.to_string()))?;

        let mut report = SyncReport {
            listed: records.len(),
            ..SyncReport::default()
        };
        let pending = select_pending(records, &self.options);
        let batch_size = self.options.batch_size.max(1);
        let batch_count = pending.len().div_ceil(batch_size);
        tracing::info!(
            listed = report.listed,
            pending = pending.len(),
            batches = batch_count,
            dry_run = self.options.dry_run,
            "starting sync"
        );

        for (index, batch) in pending.chunks(batch_size).enumerate() {
            if index > 0 && !self.options.batch_pause.is_zero() {
                tracing::debug!(pause_secs = self.options.batch_pause.as_secs(), "pausing between batches");
                tokio::time::sleep(self.options.batch_pause).await;
            }

            let results = join_all(batch.iter().map(|record| self.sync_record(record, &stats))).await;
            report.batches += 1;
            for result in results {
                report.push(result);
            }
            tracing::info!(
                batch = index + 1,
                of = batch_count,
                processed = report.processed,
                "batch complete"
            );
        }

        report.stats = stats.snapshot();
        tracing::info!(
            updated = report.updated,
            dry_run = report.dry_run,
            unresolved = report.unresolved,
            no_data = report.no_data,
            write_failed = report.write_failed,
            search_calls = report.stats.search_calls,
            media_fetches = report.stats.media_fetches,
            "sync finished"
        );
        Ok(report)
    }

    /// Resolve, aggregate, and write back one record.
    pub async fn sync_record(&self, record: &CatalogRecord, stats: &SyncStats) -> RecordReport {
        let name = record.display_name();
        let kind = record.media_kind();

        let resolution = match Resolver::new(self.search, &self.backoff, stats)
            .resolve(record)
            .await
        {
            Ok(resolution) => resolution,
            Err(error) => {
                tracing::warn!(name, %error, "unresolved");
                return RecordReport::new(record, RecordOutcome::Unresolved);
            }
        };
        tracing::debug!(name, id = resolution.id, source = %resolution.source, "resolved");

        let mut report = RecordReport::new(record, RecordOutcome::NoData);
        report.id = Some(resolution.id);
        report.source = Some(resolution.source);

        let Some(summary) = Aggregator::new(self.db, &self.backoff, stats)
            .aggregate(resolution.id, kind, record.skip_chain_traverse)
            .await
        else {
            tracing::warn!(name, id = resolution.id, "no media data, leaving record untouched");
            return report;
        };

        let update = CatalogUpdate::from_summary(resolution.id, kind, &summary);
        report.outcome = if self.options.dry_run {
            RecordOutcome::DryRun
        } else {
            self.write(record, &update, stats).await
        };
        tracing::info!(name, id = resolution.id, outcome = %report.outcome, "record synced");
        report.update = Some(update);
        report
    }

    async fn write(
        &self,
        record: &CatalogRecord,
        update: &CatalogUpdate,
        stats: &SyncStats,
    ) -> RecordOutcome {
        let result = self
            .backoff
            .execute("catalog write", || {
                stats.record_write();
                self.catalog.write_record(&record.key, update)
            })
            .await;

        match result {
            Ok(()) => RecordOutcome::Updated,
            Err(error) => {
                tracing::error!(key = %record.key, %error, "catalog write failed");
                RecordOutcome::WriteFailed {
                    error: error.to_string(),
                }
            }
        }
    }
}
