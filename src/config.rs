//! SDK configuration
//!
//! [`SdkConfig`] holds the values every cache operation reads: where to fetch
//! content from, which base URL call-to-action links are built on, and how
//! long cached content stays fresh. [`SdkOptions`] is a partial override
//! applied on top of the current values by `initialize`.

use reqwest::Url;
use tracing::warn;

/// Default remote content endpoint
pub const DEFAULT_API_URL: &str = "https://content.adkit.dev/v1/services.json";

/// Default base URL that relative intake paths are appended to
pub const DEFAULT_INTAKE_BASE_URL: &str = "https://adkit.dev";

/// Default time-to-live for cached content (1 hour)
pub const DEFAULT_CACHE_DURATION_MS: u64 = 3_600_000;

/// Effective configuration used by the cache manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    /// Remote content endpoint (HTTP GET, JSON body)
    pub api_url: String,
    /// Base URL prepended to each service's relative intake path
    pub intake_base_url: String,
    /// How long a cache entry is considered fresh, in milliseconds
    pub cache_duration_ms: u64,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            intake_base_url: DEFAULT_INTAKE_BASE_URL.to_string(),
            cache_duration_ms: DEFAULT_CACHE_DURATION_MS,
        }
    }
}

/// Partial configuration override
///
/// Any field left as `None` keeps its current value. The duration is signed so
/// that a negative value from a caller can be detected and rejected instead of
/// wrapping around.
#[derive(Debug, Clone, Default)]
pub struct SdkOptions {
    pub api_url: Option<String>,
    pub intake_base_url: Option<String>,
    pub cache_duration_ms: Option<i64>,
}

impl SdkOptions {
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn with_intake_base_url(mut self, url: impl Into<String>) -> Self {
        self.intake_base_url = Some(url.into());
        self
    }

    pub fn with_cache_duration_ms(mut self, ms: i64) -> Self {
        self.cache_duration_ms = Some(ms);
        self
    }
}

impl SdkConfig {
    /// Creates a config from the defaults with `options` applied on top
    pub fn from_options(options: SdkOptions) -> Self {
        let mut config = Self::default();
        config.apply(options);
        config
    }

    /// Applies an override on top of the current values
    ///
    /// Never fails. A URL that is not absolute is still applied but logged as a
    /// warning. A negative duration is logged and ignored, keeping the previous
    /// value.
    pub fn apply(&mut self, options: SdkOptions) {
        if let Some(api_url) = options.api_url {
            if !is_absolute_url(&api_url) {
                warn!(api_url = %api_url, "apiUrl is not an absolute URL");
            }
            self.api_url = api_url;
        }

        if let Some(intake_base_url) = options.intake_base_url {
            if !is_absolute_url(&intake_base_url) {
                warn!(intake_base_url = %intake_base_url, "intakeBaseUrl is not an absolute URL");
            }
            self.intake_base_url = intake_base_url;
        }

        if let Some(ms) = options.cache_duration_ms {
            match u64::try_from(ms) {
                Ok(ms) => self.cache_duration_ms = ms,
                Err(_) => warn!(
                    cache_duration_ms = ms,
                    kept = self.cache_duration_ms,
                    "Ignoring negative cacheDuration"
                ),
            }
        }
    }
}

/// Returns true when `s` parses as an absolute URL with a host
pub fn is_absolute_url(s: &str) -> bool {
    Url::parse(s).map(|u| u.has_host()).unwrap_or(false)
}
