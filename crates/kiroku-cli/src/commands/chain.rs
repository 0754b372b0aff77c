use anyhow::Context;
use kiroku_config::KirokuConfig;
use kiroku_core::{CatalogUpdate, ChainSummary, MediaKind};
use kiroku_remote::JikanClient;
use kiroku_sync::{Aggregator, Backoff, RetryConfig, StatsSnapshot, SyncStats};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ChainArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ChainResponse {
    id: u32,
    kind: MediaKind,
    summary: ChainSummary,
    update: CatalogUpdate,
    stats: StatsSnapshot,
}

/// Handle `kiroku chain`.
pub async fn handle(
    args: &ChainArgs,
    config: &KirokuConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let kind = MediaKind::from(args.kind);
    let db = JikanClient::new(&config.jikan);
    let backoff = Backoff::new(RetryConfig::from_sync_config(&config.sync));
    let stats = SyncStats::new();

    let summary = Aggregator::new(&db, &backoff, &stats)
        .aggregate(args.id, kind, args.shallow)
        .await
        .with_context(|| format!("no media data for {kind} {}", args.id))?;

    output(
        &ChainResponse {
            id: args.id,
            kind,
            update: CatalogUpdate::from_summary(args.id, kind, &summary),
            summary,
            stats: stats.snapshot(),
        },
        flags.format,
    )
}
