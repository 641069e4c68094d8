//! Error types for content fetching and caching
//!
//! Only failures are modelled here. A missing ad or an empty list is a normal
//! result and is reported through `Option`, never through [`AdError`].

use thiserror::Error;

/// Errors surfaced by the content layer
#[derive(Debug, Error)]
pub enum AdError {
    /// Transport-level failure (connection refused, DNS, TLS, reset...)
    #[error("Network request failed: {0}")]
    Network(String),

    /// The remote source answered with a non-2xx status
    #[error("Remote source returned HTTP {0}")]
    Http(u16),

    /// The response body could not be decoded
    #[error("Failed to parse content payload: {0}")]
    Parse(String),

    /// The persistent store failed to read, write, or remove an entry
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AdError {
    /// Whether this error came from talking to the remote source
    ///
    /// Both transport failures and non-2xx statuses count.
    pub fn is_network(&self) -> bool {
        matches!(self, AdError::Network(_) | AdError::Http(_))
    }
}

impl From<reqwest::Error> for AdError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AdError::Parse(err.to_string())
        } else {
            AdError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AdError {
    fn from(err: serde_json::Error) -> Self {
        AdError::Parse(err.to_string())
    }
}

impl From<crate::store::StoreError> for AdError {
    fn from(err: crate::store::StoreError) -> Self {
        AdError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_is_network() {
        assert!(AdError::Http(503).is_network());
        assert!(AdError::Network("refused".into()).is_network());
        assert!(!AdError::Parse("eof".into()).is_network());
        assert!(!AdError::Storage("disk full".into()).is_network());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(AdError::Http(404).to_string(), "Remote source returned HTTP 404");
        assert!(AdError::Storage("locked".into()).to_string().contains("locked"));
    }

    #[test]
    fn test_from_serde_json_error_is_parse() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let ad_err: AdError = err.into();
        assert!(matches!(ad_err, AdError::Parse(_)));
    }
}
