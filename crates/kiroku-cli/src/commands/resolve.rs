use kiroku_config::KirokuConfig;
use kiroku_core::{CatalogRecord, MediaKind};
use kiroku_remote::GoogleSearchClient;
use kiroku_sync::resolver::search_query;
use kiroku_sync::{Backoff, ResolvedFrom, Resolver, RetryConfig, SyncStats};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResolveArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ResolveResponse {
    name: String,
    kind: MediaKind,
    query: Option<String>,
    id: u32,
    source: ResolvedFrom,
}

/// Handle `kiroku resolve`.
pub async fn handle(
    args: &ResolveArgs,
    config: &KirokuConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let record = lookup_record(args);
    let kind = record.media_kind();
    if record.external_id.is_none() {
        config.require_search()?;
    }

    let search = GoogleSearchClient::new(&config.search);
    let backoff = Backoff::new(RetryConfig::from_sync_config(&config.sync));
    let stats = SyncStats::new();
    let resolution = Resolver::new(&search, &backoff, &stats)
        .resolve(&record)
        .await?;

    output(
        &ResolveResponse {
            name: args.name.clone(),
            kind,
            query: record
                .external_id
                .is_none()
                .then(|| search_query(&args.name, kind)),
            id: resolution.id,
            source: resolution.source,
        },
        flags.format,
    )
}

fn lookup_record(args: &ResolveArgs) -> CatalogRecord {
    CatalogRecord {
        key: String::from("cli"),
        external_id: args.id,
        kind: Some(args.kind.into()),
        name: Some(args.name.clone()),
        ..CatalogRecord::default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::root_commands::KindArg;

    #[test]
    fn lookup_record_carries_name_kind_and_id() {
        let record = lookup_record(&ResolveArgs {
            name: "Berserk".to_string(),
            kind: KindArg::Manga,
            id: Some(2),
        });

        assert_eq!(record.name.as_deref(), Some("Berserk"));
        assert_eq!(record.media_kind(), MediaKind::Print);
        assert_eq!(record.external_id, Some(2));
        assert!(!record.skip);
    }
}
