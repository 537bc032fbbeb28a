//! Shared season dataset cache
//!
//! Keyed by the sorted season list. A miss loads the seasons on the blocking
//! pool; concurrent misses for the same key share one load. Entries expire
//! after the configured TTL or on an explicit refresh.

use anyhow::{anyhow, Result};
use moka::future::Cache;
use polars::prelude::DataFrame;
use std::sync::Arc;
use std::time::Duration;

use crate::data::{load_scope, season_key, PlaySource};
use crate::teams::TeamRegistry;

#[derive(Clone)]
pub struct SeasonCache {
    source: Arc<dyn PlaySource>,
    registry: Arc<TeamRegistry>,
    cache: Cache<Vec<i32>, Arc<DataFrame>>,
}

impl SeasonCache {
    pub fn new(
        source: Arc<dyn PlaySource>,
        registry: Arc<TeamRegistry>,
        capacity: u64,
        ttl: Duration,
    ) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        Self { source, registry, cache }
    }

    /// Play table for the given seasons, loading it on a miss
    pub async fn get(&self, seasons: &[i32]) -> Result<Arc<DataFrame>> {
        let key = season_key(seasons);
        let source = Arc::clone(&self.source);
        let registry = Arc::clone(&self.registry);
        let load_key = key.clone();

        self.cache
            .try_get_with(key, async move {
                tracing::debug!("Season cache miss for {:?}", load_key);
                tokio::task::spawn_blocking(move || {
                    load_scope(source.as_ref(), &registry, &load_key).map(Arc::new)
                })
                .await
                .map_err(|e| anyhow!("Season load task failed: {}", e))?
            })
            .await
            .map_err(|e: Arc<anyhow::Error>| anyhow!("{:#}", e))
    }

    /// Drop every cached season table
    pub async fn refresh(&self) {
        let entries = self.cache.entry_count();
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        tracing::info!("Season cache refreshed ({} entries dropped)", entries);
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn describe_source(&self) -> String {
        self.source.describe()
    }
}
