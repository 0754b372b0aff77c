//! # kiroku-sync
//!
//! The retry-governed aggregation pipeline:
//! - [`backoff`]: exponential-backoff retry around any fallible async call
//! - [`resolver`]: catalog record → media database identifier (direct or via search)
//! - [`aggregator`]: sequel-chain walk folding per-entry metrics into a [`ChainSummary`]
//! - [`orchestrator`]: batched, paced sync run over the whole catalog
//!
//! Everything is written against the `kiroku-core` collaborator traits and
//! runs on a single task; records of one batch are interleaved, never run on
//! separate threads.
//!
//! [`ChainSummary`]: kiroku_core::ChainSummary

pub mod aggregator;
pub mod backoff;
pub mod orchestrator;
pub mod resolver;
pub mod stats;

mod test_support;

pub use aggregator::Aggregator;
pub use backoff::{Backoff, BackoffError, RetryConfig};
pub use orchestrator::{Orchestrator, RecordOutcome, RecordReport, SyncError, SyncOptions, SyncReport};
pub use resolver::{Resolution, ResolveError, ResolvedFrom, Resolver};
pub use stats::{StatsSnapshot, SyncStats};
