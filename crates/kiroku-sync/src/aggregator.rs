//! Sequel-chain traversal and statistics aggregation.
//!
//! Starting from a root entry, the aggregator follows "Sequel" links through
//! the media database and folds every main-continuity entry it meets into a
//! [`ChainSummary`]: unit and runtime totals, the averaged score, the status
//! of the last entry visited, and the joined successor titles.
//!
//! The walk is a single path. Each step scans the current frontier in order,
//! passing over side entries (movies, OVAs, specials) until it finds one
//! main-continuity entry; the successors of every entry fetched on the way
//! become the next frontier. A visited set keyed by identifier stops cyclic
//! links from looping.

use std::collections::HashSet;

use kiroku_core::{
    AiringStatus, ChainSummary, MediaDatabase, MediaKind, MediaRecord, SuccessorRef,
    parse_duration,
};

use crate::backoff::{Backoff, BackoffError};
use crate::stats::SyncStats;

/// Running totals while a chain is folded.
#[derive(Debug, Clone)]
struct ChainFold {
    total_units: Option<u32>,
    unit_duration: Option<u32>,
    total_duration: Option<u32>,
    status: AiringStatus,
    score_sum: Option<f64>,
    titles: Vec<String>,
    successor_count: u32,
}

impl ChainFold {
    fn new(root: &MediaRecord) -> Self {
        let unit_duration = parse_duration(root.duration.as_deref());
        Self {
            total_units: root.units,
            unit_duration,
            total_duration: unit_duration
                .zip(root.units)
                .map(|(d, u)| d.saturating_mul(u)),
            status: root.status,
            score_sum: root.score,
            titles: Vec::new(),
            successor_count: 0,
        }
    }

    /// Count one main-continuity successor.
    fn absorb(&mut self, node: &MediaRecord) {
        self.successor_count += 1;
        self.titles.push(node.title.clone());

        let units = node.units.filter(|u| *u > 0);
        let duration = parse_duration(node.duration.as_deref()).filter(|d| *d > 0);
        if let (Some(units), Some(duration)) = (units, duration) {
            self.total_duration = Some(
                self.total_duration
                    .unwrap_or(0)
                    .saturating_add(units.saturating_mul(duration)),
            );
            self.total_units = Some(self.total_units.unwrap_or(0).saturating_add(units));
        }

        if let Some(score) = node.score {
            self.score_sum = Some(self.score_sum.unwrap_or(0.0) + score);
        }
        self.status = node.status;
    }

    fn finish(self, root: MediaRecord, shallow: bool) -> ChainSummary {
        let successor_titles = if shallow {
            join_titles(&root.successors)
        } else {
            self.titles.join(", ")
        };
        let average_score = if self.successor_count > 0 {
            self.score_sum
                .map(|sum| sum / f64::from(self.successor_count + 1))
        } else {
            self.score_sum
        };

        ChainSummary {
            total_units: self.total_units,
            unit_duration: self.unit_duration,
            total_duration: self.total_duration,
            status: self.status,
            average_score,
            successor_titles,
            successor_count: self.successor_count,
            genres: root.genres,
            demographics: root.demographics,
        }
    }
}

fn join_titles(successors: &[SuccessorRef]) -> String {
    successors
        .iter()
        .map(|s| s.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Folds a root entry and its sequel chain into one summary.
pub struct Aggregator<'a, D> {
    db: &'a D,
    backoff: &'a Backoff,
    stats: &'a SyncStats,
}

impl<'a, D: MediaDatabase> Aggregator<'a, D> {
    #[must_use]
    pub const fn new(db: &'a D, backoff: &'a Backoff, stats: &'a SyncStats) -> Self {
        Self { db, backoff, stats }
    }

    /// Summarize the chain rooted at `root_id`.
    ///
    /// With `skip_chain_traverse` only the root is fetched and the titles of
    /// its immediate successors are listed. Returns `None` when the root
    /// cannot be fetched, which callers treat as "nothing to update".
    pub async fn aggregate(
        &self,
        root_id: u32,
        kind: MediaKind,
        skip_chain_traverse: bool,
    ) -> Option<ChainSummary> {
        let root = self.fetch(root_id, kind).await?;
        let mut fold = ChainFold::new(&root);

        if skip_chain_traverse {
            tracing::debug!(id = root_id, "chain traversal skipped");
        } else {
            self.walk(&root, kind, &mut fold).await;
        }

        Some(fold.finish(root, skip_chain_traverse))
    }

    async fn walk(&self, root: &MediaRecord, kind: MediaKind, fold: &mut ChainFold) {
        let mut visited = HashSet::from([root.id]);
        let mut frontier: Vec<SuccessorRef> = root.successors.clone();

        while !frontier.is_empty() {
            let mut next = Vec::new();

            for successor in &frontier {
                if successor.id == 0 {
                    tracing::debug!(title = %successor.title, "invalid successor reference, dropping frontier");
                    break;
                }
                if !visited.insert(successor.id) {
                    tracing::debug!(id = successor.id, "successor already visited");
                    continue;
                }

                let Some(node) = self.fetch(successor.id, kind).await else {
                    return;
                };
                next.extend(node.successors.iter().cloned());

                if node.format != kind.main_format() {
                    tracing::debug!(id = node.id, title = %node.title, format = %node.format, "skipping side entry");
                    continue;
                }

                tracing::debug!(id = node.id, title = %node.title, "counting successor");
                fold.absorb(&node);
                break;
            }

            frontier = next;
        }
    }

    /// Fetch one entry through the backoff. Failures are logged and mapped to
    /// `None`: unknown ids are permanent, exhausted retries are terminal.
    async fn fetch(&self, id: u32, kind: MediaKind) -> Option<MediaRecord> {
        let result = self
            .backoff
            .execute("media fetch", || {
                self.stats.record_fetch();
                self.db.fetch(id, kind)
            })
            .await;

        match result {
            Ok(record) => Some(record),
            Err(BackoffError::Permanent(error)) => {
                tracing::warn!(id, %kind, %error, "no media data");
                None
            }
            Err(error) => {
                tracing::error!(id, %kind, %error, "media fetch failed");
                None
            }
        }
    }
}
