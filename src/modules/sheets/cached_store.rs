use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::store::{ReportStore, StoreError, Table};

/// Table snapshot with fetch time tracking
struct CachedTable {
    table: Table,
    fetched_at: Instant,
}

/// Snapshot plus a write counter.
///
/// A read only stores its result if no write started or finished while it
/// was in flight, so a slow read cannot bring back a pre-write table.
#[derive(Default)]
struct CacheState {
    snapshot: Option<CachedTable>,
    generation: u64,
}

/// Read-through cache in front of another store.
///
/// Reads within `ttl` of the last fetch are served from memory. Any write
/// drops the snapshot so the next read goes back to the store. A zero TTL
/// disables caching entirely. `list_fresh` always goes to the inner store.
pub struct CachedStore<S> {
    inner: S,
    ttl: Duration,
    cache: RwLock<CacheState>,
}

impl<S: ReportStore> CachedStore<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cache: RwLock::new(CacheState::default()),
        }
    }

    async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        cache.snapshot = None;
        cache.generation += 1;
    }

    /// Read from the inner store and keep the result unless a write raced it
    async fn fetch(&self) -> Result<Table, StoreError> {
        let generation = self.cache.read().await.generation;
        let table = self.inner.list().await?;

        let mut cache = self.cache.write().await;
        if cache.generation == generation {
            cache.snapshot = Some(CachedTable {
                table: table.clone(),
                fetched_at: Instant::now(),
            });
        } else {
            tracing::debug!("Report table changed during read; not caching it");
        }

        Ok(table)
    }
}

#[async_trait]
impl<S: ReportStore> ReportStore for CachedStore<S> {
    async fn list(&self) -> Result<Table, StoreError> {
        if self.ttl.is_zero() {
            return self.inner.list().await;
        }

        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = cache.snapshot {
                if cached.fetched_at.elapsed() < self.ttl {
                    tracing::debug!(
                        "Serving report table from cache ({} rows)",
                        cached.table.len()
                    );
                    return Ok(cached.table.clone());
                }
            }
        }

        self.fetch().await
    }

    async fn list_fresh(&self) -> Result<Table, StoreError> {
        if self.ttl.is_zero() {
            return self.inner.list_fresh().await;
        }
        self.fetch().await
    }

    async fn replace_all(&self, table: Table) -> Result<(), StoreError> {
        // Before: a failed write never leaves a stale snapshot behind.
        // After: reads that overlapped the write are not cached.
        self.invalidate().await;
        let result = self.inner.replace_all(table).await;
        self.invalidate().await;
        result
    }
}
