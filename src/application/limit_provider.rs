use crate::domain::jurisdiction::Jurisdiction;
use crate::domain::limits::{LimitSnapshot, Threshold};
use crate::domain::ports::LimitConfigStoreBox;
use crate::error::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// How long a fetched limit snapshot is served before it is re-read.
pub const DEFAULT_LIMIT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Default)]
struct LimitCache {
    snapshot: Arc<LimitSnapshot>,
    last_refreshed_at: Option<Instant>,
}

impl LimitCache {
    /// A snapshot expires once its age exceeds `ttl`. A zero `ttl` disables
    /// caching.
    fn is_stale_at(&self, now: Instant, ttl: Duration) -> bool {
        match self.last_refreshed_at {
            Some(at) => ttl.is_zero() || now.saturating_duration_since(at) > ttl,
            None => true,
        }
    }
}

/// Resolves concentration thresholds from a time-bounded snapshot of the
/// limit configuration store.
///
/// The snapshot is replaced wholesale on refresh, never edited in place.
/// Two callers that find it stale at the same time may both fetch; the last
/// one to finish wins. That only delays how fast a threshold change is
/// picked up.
pub struct LimitProvider {
    store: LimitConfigStoreBox,
    ttl: Duration,
    cache: RwLock<LimitCache>,
}

impl LimitProvider {
    pub fn new(store: LimitConfigStoreBox) -> Self {
        Self::with_ttl(store, DEFAULT_LIMIT_TTL)
    }

    pub fn with_ttl(store: LimitConfigStoreBox, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            cache: RwLock::new(LimitCache::default()),
        }
    }

    /// Configured threshold for `jurisdiction`, if any.
    pub async fn limit_for(&self, jurisdiction: Jurisdiction) -> Result<Option<Threshold>> {
        Ok(self.snapshot().await?.limit_for(jurisdiction))
    }

    /// Configured default, or the built-in fallback when none is configured.
    pub async fn default_limit(&self) -> Result<Threshold> {
        Ok(self.snapshot().await?.default_limit())
    }

    /// Jurisdiction-specific threshold, falling back to the default.
    pub async fn resolve(&self, jurisdiction: Jurisdiction) -> Result<Threshold> {
        Ok(self.snapshot().await?.resolve(jurisdiction))
    }

    /// Re-reads the store unconditionally.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<()> {
        self.reload().await.map(|_| ())
    }

    /// When the snapshot was last loaded; `None` before the first load.
    pub async fn last_refreshed_at(&self) -> Option<Instant> {
        self.cache.read().await.last_refreshed_at
    }

    async fn snapshot(&self) -> Result<Arc<LimitSnapshot>> {
        {
            let cache = self.cache.read().await;
            if !cache.is_stale_at(Instant::now(), self.ttl) {
                return Ok(Arc::clone(&cache.snapshot));
            }
        }
        self.reload().await
    }

    async fn reload(&self) -> Result<Arc<LimitSnapshot>> {
        let configs = self.store.list_limits().await?;
        let snapshot = Arc::new(LimitSnapshot::from_configs(configs)?);

        let mut cache = self.cache.write().await;
        *cache = LimitCache {
            snapshot: Arc::clone(&snapshot),
            last_refreshed_at: Some(Instant::now()),
        };
        log::debug!("Refreshed concentration limits: {} entries", snapshot.len());

        Ok(snapshot)
    }
}
