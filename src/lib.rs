//! adkit library
//!
//! Offline-first promotional content for host applications. The interesting
//! part is [`cache::AdCacheManager`]; [`sdk::AdSdk`] is the surface most
//! callers use.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod refresh;
pub mod sdk;
pub mod store;

pub use cache::{AdCacheManager, CacheState};
pub use config::{SdkConfig, SdkOptions};
pub use data::{AccentColor, AdRecord};
pub use error::AdError;
pub use sdk::{AdEventKind, AdSdk};
