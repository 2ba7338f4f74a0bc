//! Data-source connector for smdash.
//!
//! Fetches the published CSV export over HTTP, parses it into the shared
//! [`smdash_core::MetricRecord`] table (dropping rows whose date fails to
//! parse, zeroing missing numerics), and caches the last good table for a
//! bounded freshness window.

use thiserror::Error;

pub mod cache;
pub mod fetch;

pub use cache::TableCache;
pub use fetch::{fetch_export, parse_export};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
