//! Collaborator interfaces the sync pipeline is written against.
//!
//! `kiroku-remote` implements these over HTTP; tests implement them with
//! in-memory fakes.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::entities::{CatalogRecord, CatalogUpdate, MediaRecord, SearchHit};
use crate::enums::MediaKind;

/// Classifies a failure as worth retrying.
///
/// Rate limiting and overloaded upstreams are transient; unknown ids,
/// malformed payloads and missing credentials are not.
pub trait Transient {
    fn is_transient(&self) -> bool;

    /// How long the service asked callers to wait before trying again.
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// The user-maintained catalog being synchronized.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    type Error: Transient + fmt::Display + Send + Sync;

    /// List every record in the catalog, including ones flagged `skip`.
    async fn list_records(&self) -> Result<Vec<CatalogRecord>, Self::Error>;

    /// Overwrite the synchronized fields of one record.
    async fn write_record(&self, key: &str, update: &CatalogUpdate) -> Result<(), Self::Error>;
}

/// Web search used to find a media database identifier by name.
#[async_trait]
pub trait SearchService: Send + Sync {
    type Error: Transient + fmt::Display + Send + Sync;

    /// Ranked results for `query`, best match first.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, Self::Error>;
}

/// The external media database.
#[async_trait]
pub trait MediaDatabase: Send + Sync {
    type Error: Transient + fmt::Display + Send + Sync;

    /// Fetch one entry by identifier.
    async fn fetch(&self, id: u32, kind: MediaKind) -> Result<MediaRecord, Self::Error>;
}
