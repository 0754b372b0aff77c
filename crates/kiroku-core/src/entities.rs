//! Entity structs shared by the sync pipeline and the remote adapters.

use serde::{Deserialize, Serialize};

use crate::enums::{AiringStatus, MediaFormat, MediaKind};

// ---------------------------------------------------------------------------
// Media database side
// ---------------------------------------------------------------------------

/// A link from one media entry to the entry that continues it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessorRef {
    pub id: u32,
    pub title: String,
}

/// Read-only snapshot of one media database entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: u32,
    pub title: String,
    pub kind: MediaKind,
    pub format: MediaFormat,
    pub genres: Vec<String>,
    pub demographics: Vec<String>,
    /// Episodes for series, volumes for print. Absent while still running.
    pub units: Option<u32>,
    /// Raw duration text, e.g. `"24 min per ep"`. Print entries have none.
    pub duration: Option<String>,
    pub status: AiringStatus,
    /// Average user score on a 0-10 scale.
    pub score: Option<f64>,
    /// Ordered successor list; empty when the entry has no sequel.
    pub successors: Vec<SuccessorRef>,
}

/// Cumulative statistics folded from a root entry and its successor chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSummary {
    pub total_units: Option<u32>,
    /// Per-unit duration of the root entry, in minutes.
    pub unit_duration: Option<u32>,
    /// Sum of `units * duration` across every counted entry, in minutes.
    pub total_duration: Option<u32>,
    pub status: AiringStatus,
    pub average_score: Option<f64>,
    pub successor_titles: String,
    pub successor_count: u32,
    pub genres: Vec<String>,
    pub demographics: Vec<String>,
}

/// One ranked result from the search service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// Catalog side
// ---------------------------------------------------------------------------

/// A user-maintained catalog entry, as listed from the catalog store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Store-specific key (a page id for Notion).
    pub key: String,
    pub external_id: Option<u32>,
    pub kind: Option<MediaKind>,
    pub name: Option<String>,
    pub successor_titles: Option<String>,
    /// Already processed; excluded from sync runs.
    pub skip: bool,
    /// Needed manual intervention after a previous run.
    pub cleaned: bool,
    /// Only list immediate successors instead of walking the chain.
    pub skip_chain_traverse: bool,
}

impl CatalogRecord {
    /// Media kind used for lookups; untyped records are treated as series.
    #[must_use]
    pub fn media_kind(&self) -> MediaKind {
        self.kind.unwrap_or_default()
    }

    /// Name for log lines.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// Field set written back to the catalog after a successful aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogUpdate {
    pub total: Option<u32>,
    pub duration: Option<u32>,
    pub airing_status: String,
    /// Averaged score halved onto a 0-5 scale.
    pub web_rating: Option<f64>,
    pub external_id: u32,
    pub genres: Vec<String>,
    pub sequel_titles: String,
    /// Always `false`: a fresh update re-arms the record for the next run.
    pub skip: bool,
}

impl CatalogUpdate {
    /// Map a chain summary onto catalog fields.
    #[must_use]
    pub fn from_summary(external_id: u32, kind: MediaKind, summary: &ChainSummary) -> Self {
        Self {
            total: summary.total_units,
            duration: summary.unit_duration,
            airing_status: summary.status.label(kind).to_string(),
            web_rating: summary.average_score.map(|score| score / 2.0),
            external_id,
            genres: summary.genres.clone(),
            sequel_titles: summary.successor_titles.clone(),
            skip: false,
        }
    }
}
