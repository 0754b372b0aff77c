//! Catalog record → media database identifier.

use std::fmt;

use kiroku_core::{CatalogRecord, MediaKind, SearchHit, SearchService};
use serde::Serialize;
use thiserror::Error;

use crate::backoff::Backoff;
use crate::stats::SyncStats;

/// Host of the media database whose identifiers we resolve to.
pub const MEDIA_DB_HOST: &str = "myanimelist.net";

/// Appended to every query so the media database page ranks first.
const QUERY_SUFFIX: &str = "MyAnimeList";

/// Where a resolved identifier came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedFrom {
    /// The catalog already carried the identifier; no search was made.
    SearchSkipped,
    /// Parsed from this search result URL.
    Search(String),
}

impl fmt::Display for ResolvedFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SearchSkipped => f.write_str("search skipped"),
            Self::Search(url) => f.write_str(url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub id: u32,
    pub source: ResolvedFrom,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no identifier available for '{name}'")]
    NoIdentifier { name: String },
}

/// Search query for a catalog entry, e.g. `"Mob Psycho 100 Anime MyAnimeList"`.
#[must_use]
pub fn search_query(name: &str, kind: MediaKind) -> String {
    format!("{name} {kind} {QUERY_SUFFIX}")
}

/// Extract the identifier from a media database URL such as
/// `https://myanimelist.net/anime/5114/Fullmetal_Alchemist__Brotherhood`.
///
/// The scheme must be http(s) in any case, the host [`MEDIA_DB_HOST`] (or a
/// subdomain of it, any port) and the path must start with the kind's
/// segment followed by a numeric id. Character, people, and forum pages on
/// the same host are rejected.
#[must_use]
pub fn id_from_url(url: &str, kind: MediaKind) -> Option<u32> {
    let (scheme, rest) = url.split_once("://")?;
    if !scheme.eq_ignore_ascii_case("https") && !scheme.eq_ignore_ascii_case("http") {
        return None;
    }
    let (authority, path) = rest.split_once('/')?;
    let host = authority
        .rsplit_once(':')
        .map_or(authority, |(host, _port)| host)
        .to_ascii_lowercase();
    let on_host = host == MEDIA_DB_HOST || host.ends_with(&format!(".{MEDIA_DB_HOST}"));
    if !on_host {
        return None;
    }

    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    if segments.next()? != kind.path_segment() {
        return None;
    }
    segments.next()?.parse::<u32>().ok().filter(|id| *id > 0)
}

/// First hit that points at a media database entry of the right kind.
#[must_use]
pub fn pick_hit(hits: &[SearchHit], kind: MediaKind) -> Option<(u32, &str)> {
    hits.iter()
        .find_map(|hit| id_from_url(&hit.url, kind).map(|id| (id, hit.url.as_str())))
}

/// Resolves catalog records, searching only when the record has no id.
pub struct Resolver<'a, S> {
    search: &'a S,
    backoff: &'a Backoff,
    stats: &'a SyncStats,
}

impl<'a, S: SearchService> Resolver<'a, S> {
    #[must_use]
    pub const fn new(search: &'a S, backoff: &'a Backoff, stats: &'a SyncStats) -> Self {
        Self {
            search,
            backoff,
            stats,
        }
    }

    /// Determine the media database identifier for `record`.
    ///
    /// A search that fails terminally is treated like one that found nothing.
    /// The record's own identifier is the only fallback, and it is checked
    /// before any search is made.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoIdentifier`] when neither the record nor the
    /// search results provide an identifier.
    pub async fn resolve(&self, record: &CatalogRecord) -> Result<Resolution, ResolveError> {
        if let Some(id) = record.external_id {
            return Ok(Resolution {
                id,
                source: ResolvedFrom::SearchSkipped,
            });
        }

        let kind = record.media_kind();
        if let Some(name) = record.name.as_deref() {
            let hits = self.search_hits(name, kind).await;
            if let Some((id, url)) = pick_hit(&hits, kind) {
                return Ok(Resolution {
                    id,
                    source: ResolvedFrom::Search(url.to_string()),
                });
            }
            tracing::debug!(name, results = hits.len(), "no media database link in search results");
        }

        Err(ResolveError::NoIdentifier {
            name: record.display_name().to_string(),
        })
    }

    async fn search_hits(&self, name: &str, kind: MediaKind) -> Vec<SearchHit> {
        let query = search_query(name, kind);
        let result = self
            .backoff
            .execute("search", || {
                self.stats.record_search();
                self.search.search(&query)
            })
            .await;

        result.unwrap_or_else(|error| {
            tracing::warn!(%query, %error, "search failed");
            Vec::new()
        })
    }
}
