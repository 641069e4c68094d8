//! Cache manager for the ad list
//!
//! Decides, per call, whether to serve cached ads, revalidate them in the
//! background, fetch synchronously, or fall back to the bundled list.
//!
//! The cache lives in two store entries: the JSON-encoded ad list and the
//! epoch-millisecond time of the last successful write. They are written in
//! that order and are not atomic as a pair, so a reader may find one without
//! the other:
//!
//! - payload without a readable timestamp is treated as stale
//! - timestamp without a readable payload is treated as absent

use std::sync::{Arc, RwLock};

use chrono::Utc;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use crate::config::{SdkConfig, SdkOptions};
use crate::data::{fallback_ads, transform_services, AdRecord, ContentSource};
use crate::error::AdError;
use crate::refresh::spawn_revalidation;
use crate::store::KeyValueStore;

/// Store key holding the JSON-serialized ad list
pub const ADS_CACHE_KEY: &str = "adkit.ads_cache";

/// Store key holding the decimal epoch-millisecond timestamp of the last write
pub const ADS_CACHE_TIMESTAMP_KEY: &str = "adkit.ads_cache_timestamp";

/// Freshness of the cache entry at the time it was read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No readable cache entry
    Absent,
    /// Entry exists and is within the cache duration
    Fresh,
    /// Entry exists but is older than the cache duration, or its age is unknown
    Stale,
}

/// Result of reading the cache, including freshness
#[derive(Debug, Clone)]
pub struct CachedAds {
    /// The cached ads
    pub ads: Vec<AdRecord>,
    /// When the ads were written, if the timestamp entry was readable
    pub cached_at_ms: Option<i64>,
    /// Fresh or stale; never `Absent`
    pub state: CacheState,
}

/// Computes freshness of an existing payload
///
/// Fresh when `now - cached_at <= duration`. A missing timestamp means the age
/// cannot be known, which counts as stale.
pub fn classify(cached_at_ms: Option<i64>, now_ms: i64, cache_duration_ms: u64) -> CacheState {
    match cached_at_ms {
        Some(cached_at) => {
            let age = now_ms.saturating_sub(cached_at);
            if age <= i64::try_from(cache_duration_ms).unwrap_or(i64::MAX) {
                CacheState::Fresh
            } else {
                CacheState::Stale
            }
        }
        None => CacheState::Stale,
    }
}

/// Owns the cache-and-refresh policy for the ad list
///
/// Cheap to clone; clones share the store, the source and the configuration.
#[derive(Clone)]
pub struct AdCacheManager {
    store: Arc<dyn KeyValueStore>,
    source: Arc<dyn ContentSource>,
    config: Arc<RwLock<SdkConfig>>,
}

impl std::fmt::Debug for AdCacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdCacheManager")
            .field("config", &self.config())
            .finish_non_exhaustive()
    }
}

impl AdCacheManager {
    /// Creates a manager over the given store and content source
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn ContentSource>,
        config: SdkConfig,
    ) -> Self {
        Self {
            store,
            source,
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Current configuration
    ///
    /// Every operation reads this once when it starts, so a change made by
    /// [`initialize`](Self::initialize) applies from the next operation on.
    pub fn config(&self) -> SdkConfig {
        match self.config.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Applies configuration overrides
    ///
    /// Legal at any time, including after the first query.
    pub fn initialize(&self, options: SdkOptions) {
        let mut guard = match self.config.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.apply(options);
        info!(
            api_url = %guard.api_url,
            intake_base_url = %guard.intake_base_url,
            cache_duration_ms = guard.cache_duration_ms,
            "SDK configured"
        );
    }

    /// Returns the best-known ad list without ever failing
    ///
    /// - Fresh cache: returned as-is, no network
    /// - Stale cache: returned as-is, and one background refresh is started
    /// - No cache: fetched now; on success persisted and returned (the bundled
    ///   list stands in for an empty remote list), on failure the bundled list
    ///   is returned and nothing is persisted
    pub async fn get_all(&self) -> Vec<AdRecord> {
        let config = self.config();

        match self.read_cache(&config).await {
            Some(cached) if cached.state == CacheState::Fresh => {
                debug!(count = cached.ads.len(), "Serving fresh cached ads");
                cached.ads
            }
            Some(cached) => {
                debug!(
                    count = cached.ads.len(),
                    cached_at_ms = ?cached.cached_at_ms,
                    "Serving stale cached ads, revalidating in background"
                );
                spawn_revalidation(self.clone());
                cached.ads
            }
            None => match self.fetch_remote(&config).await {
                Ok(ads) => {
                    self.persist_or_log(&ads).await;
                    if ads.is_empty() {
                        info!("Remote returned no ads, serving bundled fallback");
                        fallback_ads()
                    } else {
                        ads
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Cold fetch failed, serving bundled fallback");
                    fallback_ads()
                }
            },
        }
    }

    /// Fetches from the remote source unconditionally
    ///
    /// Fetch and parse failures are returned to the caller and leave the cache
    /// untouched. A failure to persist the fetched ads is logged only; the ads
    /// are still returned.
    pub async fn refresh(&self) -> Result<Vec<AdRecord>, AdError> {
        let config = self.config();
        let ads = self.fetch_remote(&config).await?;
        self.persist_or_log(&ads).await;
        Ok(ads)
    }

    /// Picks one ad uniformly at random, or `None` if there are none
    pub async fn get_random(&self) -> Option<AdRecord> {
        let ads = self.get_all().await;
        ads.choose(&mut rand::thread_rng()).cloned()
    }

    /// Finds the first ad with the given id, or `None`
    pub async fn get_by_id(&self, id: &str) -> Option<AdRecord> {
        self.get_all().await.into_iter().find(|ad| ad.id == id)
    }

    /// Deletes both cache entries
    ///
    /// Idempotent. Fails only if both removals fail; a partial removal is
    /// logged and reported as success.
    pub async fn clear(&self) -> Result<(), AdError> {
        let (payload, timestamp) = futures::join!(
            self.store.remove(ADS_CACHE_KEY),
            self.store.remove(ADS_CACHE_TIMESTAMP_KEY)
        );

        match (payload, timestamp) {
            (Ok(()), Ok(())) => {
                debug!("Cleared ad cache");
                Ok(())
            }
            (Err(e), Ok(())) | (Ok(()), Err(e)) => {
                warn!(error = %e, "Ad cache only partially cleared");
                Ok(())
            }
            (Err(e), Err(_)) => Err(e.into()),
        }
    }

    /// Freshness of the cache right now
    pub async fn state(&self) -> CacheState {
        let config = self.config();
        self.read_cache(&config)
            .await
            .map(|cached| cached.state)
            .unwrap_or(CacheState::Absent)
    }

    /// Reads the cache entry; store and decode failures read as absent
    pub async fn read_cache(&self, config: &SdkConfig) -> Option<CachedAds> {
        let raw = match self.store.get(ADS_CACHE_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "Failed to read ad cache");
                return None;
            }
        };

        let ads: Vec<AdRecord> = match serde_json::from_str(&raw) {
            Ok(ads) => ads,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable ad cache");
                return None;
            }
        };

        let cached_at_ms = match self.store.get(ADS_CACHE_TIMESTAMP_KEY).await {
            Ok(Some(ts)) => ts.trim().parse::<i64>().ok(),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read ad cache timestamp");
                None
            }
        };

        let state = classify(cached_at_ms, Utc::now().timestamp_millis(), config.cache_duration_ms);

        Some(CachedAds {
            ads,
            cached_at_ms,
            state,
        })
    }

    /// Fetches the remote payload and maps it to ads
    pub(crate) async fn fetch_remote(&self, config: &SdkConfig) -> Result<Vec<AdRecord>, AdError> {
        let payload = self.source.fetch(&config.api_url).await?;
        Ok(transform_services(&payload.services, &config.intake_base_url))
    }

    /// Writes the payload, then the timestamp
    pub(crate) async fn persist(&self, ads: &[AdRecord]) -> Result<(), AdError> {
        let json = serde_json::to_string(ads)?;
        self.store.set(ADS_CACHE_KEY, &json).await?;

        let now = Utc::now().timestamp_millis();
        self.store
            .set(ADS_CACHE_TIMESTAMP_KEY, &now.to_string())
            .await?;
        Ok(())
    }

    async fn persist_or_log(&self, ads: &[AdRecord]) {
        match self.persist(ads).await {
            Ok(()) => debug!(count = ads.len(), "Persisted ad cache"),
            Err(e) => warn!(error = %e, "Failed to persist ad cache"),
        }
    }
}
