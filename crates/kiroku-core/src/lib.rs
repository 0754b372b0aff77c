//! # kiroku-core
//!
//! Core types, collaborator traits, and error types for Kiroku.
//!
//! This crate provides the foundational types shared across all Kiroku crates:
//! - Media database records and the chain summary folded from them
//! - Catalog records and the field set written back to the catalog
//! - Kind, format, and status enums
//! - Duration text parsing
//! - Async traits for the catalog store, search service, and media database
//! - Cross-cutting error types

pub mod duration;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod traits;

pub use duration::{DEFAULT_DURATION_MINUTES, parse_duration};
pub use entities::{
    CatalogRecord, CatalogUpdate, ChainSummary, MediaRecord, SearchHit, SuccessorRef,
};
pub use enums::{AiringStatus, MediaFormat, MediaKind};
pub use errors::CoreError;
pub use traits::{CatalogStore, MediaDatabase, SearchService, Transient};
