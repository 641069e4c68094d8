//! Offline-first cache for the ad list
//!
//! The [`AdCacheManager`] reconciles the remote content source with the local
//! store under a time-to-live policy. Stale entries are served immediately and
//! revalidated in the background; when nothing is cached and the network is
//! down, the bundled fallback list is served instead.

mod manager;

pub use manager::{
    classify, AdCacheManager, CacheState, CachedAds, ADS_CACHE_KEY, ADS_CACHE_TIMESTAMP_KEY,
};
