use kiroku_config::{KirokuConfig, SyncConfig};
use kiroku_remote::{GoogleSearchClient, JikanClient, NotionCatalog};
use kiroku_sync::{Backoff, Orchestrator, RetryConfig, SyncOptions};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SyncArgs;
use crate::output::output;

/// Handle `kiroku sync`.
pub async fn handle(
    args: &SyncArgs,
    config: &KirokuConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let catalog = NotionCatalog::new(config.require_notion()?);
    let search = GoogleSearchClient::new(config.require_search()?);
    let db = JikanClient::new(&config.jikan);
    let backoff = Backoff::new(RetryConfig::from_sync_config(&config.sync));

    let report = Orchestrator::new(&catalog, &search, &db, backoff, sync_options(args, &config.sync))
        .run()
        .await?;

    output(&report, flags.format)
}

fn sync_options(args: &SyncArgs, config: &SyncConfig) -> SyncOptions {
    SyncOptions {
        start: args.start,
        limit: args.limit,
        dry_run: args.dry_run,
        ..SyncOptions::from_config(config)
    }
}
