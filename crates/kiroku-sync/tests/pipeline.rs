//! End-to-end sync runs against in-memory collaborators.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use kiroku_core::{
    AiringStatus, CatalogRecord, CatalogStore, CatalogUpdate, MediaDatabase, MediaFormat,
    MediaKind, MediaRecord, SearchHit, SearchService, SuccessorRef, Transient,
};
use kiroku_sync::{Backoff, Orchestrator, RecordOutcome, RetryConfig, SyncOptions};
use pretty_assertions::assert_eq;

#[derive(Debug)]
struct Unavailable;

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unavailable")
    }
}

impl Transient for Unavailable {
    fn is_transient(&self) -> bool {
        false
    }
}

#[derive(Default)]
struct MemoryCatalog {
    records: Vec<CatalogRecord>,
    written: Mutex<Vec<(String, CatalogUpdate)>>,
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    type Error = Unavailable;

    async fn list_records(&self) -> Result<Vec<CatalogRecord>, Unavailable> {
        Ok(self.records.clone())
    }

    async fn write_record(&self, key: &str, update: &CatalogUpdate) -> Result<(), Unavailable> {
        self.written
            .lock()
            .unwrap()
            .push((key.to_string(), update.clone()));
        Ok(())
    }
}

/// Answers every query with a fixed URL per name prefix.
struct CannedSearch(HashMap<&'static str, &'static str>);

#[async_trait]
impl SearchService for CannedSearch {
    type Error = Unavailable;

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, Unavailable> {
        Ok(self
            .0
            .iter()
            .filter(|(name, _)| query.starts_with(*name))
            .map(|(_, url)| SearchHit {
                url: (*url).to_string(),
                title: None,
            })
            .collect())
    }
}

struct MemoryDb(HashMap<u32, MediaRecord>);

#[async_trait]
impl MediaDatabase for MemoryDb {
    type Error = Unavailable;

    async fn fetch(&self, id: u32, _kind: MediaKind) -> Result<MediaRecord, Unavailable> {
        self.0.get(&id).cloned().ok_or(Unavailable)
    }
}

fn entry(id: u32, title: &str, format: MediaFormat, units: u32, next: &[(u32, &str)]) -> MediaRecord {
    MediaRecord {
        id,
        title: title.to_string(),
        kind: MediaKind::Series,
        format,
        genres: vec!["Comedy".to_string()],
        demographics: vec!["Shounen".to_string()],
        units: Some(units),
        duration: Some("24 min per ep".to_string()),
        status: AiringStatus::Finished,
        score: Some(8.0),
        successors: next
            .iter()
            .map(|(id, title)| SuccessorRef {
                id: *id,
                title: (*title).to_string(),
            })
            .collect(),
    }
}

fn catalog_record(key: &str, name: &str) -> CatalogRecord {
    CatalogRecord {
        key: key.to_string(),
        name: Some(name.to_string()),
        kind: Some(MediaKind::Series),
        ..CatalogRecord::default()
    }
}

fn instant_backoff() -> Backoff {
    Backoff::new(RetryConfig {
        max_retries: 1,
        base_delay: Duration::ZERO,
    })
}

fn options() -> SyncOptions {
    SyncOptions {
        batch_size: 2,
        batch_pause: Duration::ZERO,
        ..SyncOptions::default()
    }
}

fn database() -> MemoryDb {
    MemoryDb(HashMap::from([
        (100, entry(100, "Example", MediaFormat::Tv, 12, &[(101, "Example 2")])),
        (101, entry(101, "Example 2", MediaFormat::Tv, 13, &[])),
        (200, entry(200, "Other", MediaFormat::Tv, 24, &[(201, "Other: The Movie")])),
        (201, entry(201, "Other: The Movie", MediaFormat::Movie, 1, &[])),
    ]))
}

#[tokio::test]
async fn unidentified_record_is_searched_aggregated_and_written() {
    let catalog = MemoryCatalog {
        records: vec![catalog_record("page-1", "Example")],
        ..MemoryCatalog::default()
    };
    let search = CannedSearch(HashMap::from([(
        "Example",
        "https://myanimelist.net/anime/100/Example",
    )]));
    let db = database();

    let report = Orchestrator::new(&catalog, &search, &db, instant_backoff(), options())
        .run()
        .await
        .unwrap();

    assert_eq!(report.updated, 1);
    let written = catalog.written.lock().unwrap().clone();
    assert_eq!(
        written,
        vec![(
            "page-1".to_string(),
            CatalogUpdate {
                total: Some(25),
                duration: Some(24),
                airing_status: "Finished Airing".to_string(),
                web_rating: Some(4.0),
                external_id: 100,
                genres: vec!["Comedy".to_string()],
                sequel_titles: "Example 2".to_string(),
                skip: false,
            }
        )]
    );
}

#[tokio::test]
async fn mixed_catalog_reports_each_outcome() {
    let mut skipped = catalog_record("page-skip", "Example");
    skipped.skip = true;
    let mut known = catalog_record("page-known", "Other");
    known.external_id = Some(200);
    let catalog = MemoryCatalog {
        records: vec![
            skipped,
            catalog_record("page-1", "Example"),
            catalog_record("page-lost", "Nobody Knows"),
            known,
        ],
        ..MemoryCatalog::default()
    };
    let search = CannedSearch(HashMap::from([(
        "Example",
        "https://myanimelist.net/anime/100/Example",
    )]));
    let db = database();

    let report = Orchestrator::new(&catalog, &search, &db, instant_backoff(), options())
        .run()
        .await
        .unwrap();

    assert_eq!(report.listed, 4);
    assert_eq!(report.processed, 3);
    assert_eq!(report.batches, 2);
    let outcomes: Vec<(&str, &RecordOutcome)> = report
        .records
        .iter()
        .map(|r| (r.key.as_str(), &r.outcome))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("page-1", &RecordOutcome::Updated),
            ("page-lost", &RecordOutcome::Unresolved),
            ("page-known", &RecordOutcome::Updated),
        ]
    );

    let written = catalog.written.lock().unwrap().clone();
    let (_, other) = written
        .iter()
        .find(|(key, _)| key == "page-known")
        .unwrap();
    assert_eq!(other.total, Some(24));
    assert_eq!(other.sequel_titles, "");
    assert_eq!(report.stats.search_calls, 2);
}

#[tokio::test]
async fn dry_run_reports_updates_without_writing() {
    let catalog = MemoryCatalog {
        records: vec![catalog_record("page-1", "Example")],
        ..MemoryCatalog::default()
    };
    let search = CannedSearch(HashMap::from([(
        "Example",
        "https://myanimelist.net/anime/100/Example",
    )]));
    let db = database();
    let dry = SyncOptions {
        dry_run: true,
        ..options()
    };

    let report = Orchestrator::new(&catalog, &search, &db, instant_backoff(), dry)
        .run()
        .await
        .unwrap();

    assert_eq!(report.dry_run, 1);
    assert_eq!(report.records[0].update.as_ref().unwrap().total, Some(25));
    assert!(catalog.written.lock().unwrap().is_empty());
}
