//! Core data models for adkit
//!
//! This module contains the public ad record handed to the presentation layer
//! and the wire shapes returned by the remote content endpoint.

pub mod fallback;
pub mod source;
pub mod transform;

pub use fallback::fallback_ads;
pub use source::{ContentSource, HttpContentSource};
pub use transform::{accent_for_token, icon_for_service, to_ad_record, transform_services};

use serde::{Deserialize, Serialize};

/// A single promotional ad, ready to render
///
/// Instances are immutable value objects once built; clone freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdRecord {
    /// Stable identifier, unique within one fetch
    pub id: String,
    /// Headline
    pub title: String,
    /// Short one-line pitch
    pub tagline: String,
    /// Longer body copy
    pub description: String,
    /// Call-to-action button label
    pub cta_text: String,
    /// Absolute call-to-action URL
    pub cta_url: String,
    /// Symbolic icon name
    pub icon: String,
    /// Accent color from the fixed palette
    pub accent_color: AccentColor,
    /// Ordered feature bullet points
    #[serde(default)]
    pub features: Vec<String>,
}

/// Accent palette available to ads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    Blue,
    Purple,
    Green,
    Orange,
}

impl AccentColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccentColor::Blue => "blue",
            AccentColor::Purple => "purple",
            AccentColor::Green => "green",
            AccentColor::Orange => "orange",
        }
    }
}

impl std::fmt::Display for AccentColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Body returned by the remote content endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPayload {
    /// Content version string
    #[serde(default)]
    pub version: String,
    /// ISO 8601 generation time, as sent by the server
    #[serde(default)]
    pub generated_at: Option<String>,
    /// Service records; missing means empty
    #[serde(default)]
    pub services: Vec<ServiceRecord>,
}

/// One service record as published by the remote endpoint
///
/// A superset of what an [`AdRecord`] needs. Never persisted directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub primary_cta_label: String,
    #[serde(default)]
    pub primary_cta_id: Option<String>,
    /// Path relative to the configured intake base URL
    #[serde(default)]
    pub intake_url: String,
    /// Color token, mapped onto [`AccentColor`]
    #[serde(default)]
    pub accent: String,
}
