//! Public query API
//!
//! [`AdSdk`] is what a host application holds. It is a thin layer over
//! [`AdCacheManager`]; the presentation layer calls these functions and never
//! sees a failed `get_all_ads`.

use std::sync::Arc;

use tracing::debug;

use crate::cache::AdCacheManager;
use crate::config::{SdkConfig, SdkOptions};
use crate::data::{AdRecord, ContentSource, HttpContentSource};
use crate::error::AdError;
use crate::store::{select_store, KeyValueStore};

/// Interaction kinds reported through [`AdSdk::track_event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdEventKind {
    Impression,
    Click,
    Dismiss,
}

impl AdEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdEventKind::Impression => "impression",
            AdEventKind::Click => "click",
            AdEventKind::Dismiss => "dismiss",
        }
    }
}

/// Entry point for host applications
#[derive(Debug, Clone)]
pub struct AdSdk {
    manager: AdCacheManager,
}

impl AdSdk {
    /// Builds an SDK with the host's default store and the HTTP content source
    pub fn new(config: SdkConfig) -> Self {
        Self::with_parts(select_store(), Arc::new(HttpContentSource::new()), config)
    }

    /// Builds an SDK over an explicit store and content source
    pub fn with_parts(
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn ContentSource>,
        config: SdkConfig,
    ) -> Self {
        Self {
            manager: AdCacheManager::new(store, source, config),
        }
    }

    /// Overrides any subset of the configuration
    ///
    /// Bad values are logged, never rejected.
    pub fn initialize(&self, options: SdkOptions) {
        self.manager.initialize(options);
    }

    pub async fn get_all_ads(&self) -> Vec<AdRecord> {
        self.manager.get_all().await
    }

    pub async fn get_random_ad(&self) -> Option<AdRecord> {
        self.manager.get_random().await
    }

    pub async fn get_ad_by_id(&self, id: &str) -> Option<AdRecord> {
        self.manager.get_by_id(id).await
    }

    /// Forces a remote fetch; network and parse failures are returned
    pub async fn refresh_ads(&self) -> Result<Vec<AdRecord>, AdError> {
        self.manager.refresh().await
    }

    pub async fn clear_ads_cache(&self) -> Result<(), AdError> {
        self.manager.clear().await
    }

    /// Observability hook; records the event in the log and nothing else
    pub fn track_event(&self, kind: AdEventKind, ad_id: &str) {
        debug!(event = kind.as_str(), ad_id, "Ad event");
    }

    /// The underlying cache manager
    pub fn manager(&self) -> &AdCacheManager {
        &self.manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ContentPayload;
    use crate::store::MemoryStore;
    use async_trait::async_trait;

    struct Offline;

    #[async_trait]
    impl ContentSource for Offline {
        async fn fetch(&self, _api_url: &str) -> Result<ContentPayload, AdError> {
            Err(AdError::Network("offline".into()))
        }
    }

    fn offline_sdk() -> AdSdk {
        AdSdk::with_parts(Arc::new(MemoryStore::new()), Arc::new(Offline), SdkConfig::default())
    }

    #[tokio::test]
    async fn test_offline_sdk_serves_fallback() {
        let sdk = offline_sdk();

        assert_eq!(sdk.get_all_ads().await.len(), 4);
        assert!(sdk.get_random_ad().await.is_some());
        assert!(sdk.get_ad_by_id("consulting").await.is_some());
        assert!(sdk.get_ad_by_id("nonexistent").await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_surfaces_network_error() {
        let err = offline_sdk().refresh_ads().await.unwrap_err();
        assert!(err.is_network());
    }

    #[test]
    fn test_initialize_updates_manager_config() {
        let sdk = offline_sdk();
        sdk.initialize(SdkOptions::default().with_cache_duration_ms(10));
        assert_eq!(sdk.manager().config().cache_duration_ms, 10);
    }

    #[test]
    fn test_new_uses_host_store_without_io() {
        let sdk = AdSdk::new(SdkConfig::default());
        assert_eq!(sdk.manager().config(), SdkConfig::default());
    }

    #[test]
    fn test_track_event_is_noop() {
        offline_sdk().track_event(AdEventKind::Click, "consulting");
        assert_eq!(AdEventKind::Impression.as_str(), "impression");
    }
}
