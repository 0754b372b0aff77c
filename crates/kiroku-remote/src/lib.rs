//! # kiroku-remote
//!
//! HTTP adapters for the services Kiroku synchronizes between:
//! - Jikan v4 (MyAnimeList media database)
//! - Google Programmable Search (identifier lookup by name)
//! - Notion (the user's catalog database)
//!
//! Each adapter implements the matching `kiroku-core` trait. Retrying is not
//! done here: errors carry enough detail (`RateLimited`, status codes) for
//! the sync pipeline's backoff to decide.

pub mod jikan;
pub mod notion;
pub mod search;

mod error;
mod http;

pub use error::RemoteError;
pub use jikan::JikanClient;
pub use notion::NotionCatalog;
pub use search::GoogleSearchClient;
