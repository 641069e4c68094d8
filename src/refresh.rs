//! Background revalidation of a stale cache
//!
//! A stale read starts one detached tokio task that fetches, transforms and
//! persists fresh ads. Nobody awaits it: the caller already has the stale list,
//! and the new list only shows up on a later cache read. The task cannot be
//! cancelled and applies no timeout of its own.

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::AdCacheManager;

/// How a background revalidation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New ads were fetched and written to the cache
    Updated { count: usize },
    /// The fetch failed; the stale entry was left in place
    FetchFailed(String),
    /// The fetch succeeded but the cache could not be written
    PersistFailed(String),
}

/// Starts a detached revalidation of the cache
///
/// Returns `None` without doing anything when called outside a tokio runtime.
/// The returned handle may be dropped; the task keeps running.
pub fn spawn_revalidation(manager: AdCacheManager) -> Option<JoinHandle<RefreshOutcome>> {
    let handle = match Handle::try_current() {
        Ok(handle) => handle,
        Err(_) => {
            warn!("No async runtime available, skipping background refresh");
            return None;
        }
    };

    Some(handle.spawn(async move {
        let outcome = revalidate(&manager).await;
        match &outcome {
            RefreshOutcome::Updated { count } => debug!(count, "Background refresh updated ad cache"),
            RefreshOutcome::FetchFailed(e) => warn!(error = %e, "Background refresh failed, keeping stale ads"),
            RefreshOutcome::PersistFailed(e) => warn!(error = %e, "Background refresh could not persist ads"),
        }
        outcome
    }))
}

/// Fetches and persists fresh ads, reporting how it went
pub async fn revalidate(manager: &AdCacheManager) -> RefreshOutcome {
    let config = manager.config();

    let ads = match manager.fetch_remote(&config).await {
        Ok(ads) => ads,
        Err(e) => return RefreshOutcome::FetchFailed(e.to_string()),
    };

    match manager.persist(&ads).await {
        Ok(()) => RefreshOutcome::Updated { count: ads.len() },
        Err(e) => RefreshOutcome::PersistFailed(e.to_string()),
    }
}
