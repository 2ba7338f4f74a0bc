//! Freshness-window cache for the export table.

use std::time::{Duration, Instant};

use smdash_core::{AppConfig, MetricRecord};
use tokio::sync::Mutex;

use crate::fetch::fetch_export;
use crate::SourceError;

struct CachedTable {
    records: Vec<MetricRecord>,
    fetched_at: Instant,
}

/// Re-fetch-if-stale cache around the export fetch.
///
/// The only invalidation signal is time: a table older than the refresh
/// window is re-fetched on the next access. Within one request the returned
/// table is an owned, immutable snapshot. A failed refresh serves the stale
/// table with a warning; only a cold cache turns a fetch failure into an
/// error, so first loads never show a partial dashboard.
pub struct TableCache {
    client: reqwest::Client,
    url: String,
    ttl: Duration,
    state: Mutex<Option<CachedTable>>,
}

impl TableCache {
    /// Build the cache and its HTTP client from the app config.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(config.fetch_user_agent.clone())
            .build()?;
        Ok(Self::new(client, config.export_url.clone(), Duration::from_secs(config.refresh_secs)))
    }

    #[must_use]
    pub fn new(client: reqwest::Client, url: String, ttl: Duration) -> Self {
        Self {
            client,
            url,
            ttl,
            state: Mutex::new(None),
        }
    }

    /// Current table snapshot, re-fetching when the cached one is stale.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] only when the fetch fails and there is no
    /// cached table to fall back on.
    pub async fn get(&self) -> Result<Vec<MetricRecord>, SourceError> {
        let mut state = self.state.lock().await;

        if let Some(cached) = state.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                return Ok(cached.records.clone());
            }
        }

        match fetch_export(&self.client, &self.url).await {
            Ok(records) => {
                tracing::info!(rows = records.len(), "export table refreshed");
                *state = Some(CachedTable {
                    records: records.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(records)
            }
            Err(e) => {
                if let Some(cached) = state.as_ref() {
                    tracing::warn!(error = %e, "export refresh failed; serving stale table");
                    return Ok(cached.records.clone());
                }
                Err(e)
            }
        }
    }

    /// Whether a table has ever been fetched successfully.
    pub async fn is_warm(&self) -> bool {
        self.state.lock().await.is_some()
    }
}
