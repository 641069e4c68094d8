//! Command-line interface parsing for adkit
//!
//! This module handles parsing of CLI arguments using clap and turning them
//! into SDK options, plus plain-text rendering of ads for the terminal.

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::config::SdkOptions;
use crate::data::AdRecord;
use crate::sdk::AdEventKind;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified event kind is not recognized
    #[error("Invalid event kind: '{0}'. Valid kinds: impression, click, dismiss")]
    InvalidEventKind(String),
}

/// adkit - browse and manage cached promotional content
#[derive(Parser, Debug)]
#[command(name = "adkit")]
#[command(about = "Offline-first promotional content cache")]
#[command(version)]
pub struct Cli {
    /// Remote content endpoint
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Base URL that relative intake paths are appended to
    #[arg(long, global = true, value_name = "URL")]
    pub intake_base_url: Option<String>,

    /// How long cached content stays fresh, in milliseconds
    #[arg(long, global = true, value_name = "MS", allow_negative_numbers = true)]
    pub cache_duration_ms: Option<i64>,

    /// Keep the cache in memory for this run only
    #[arg(long, global = true)]
    pub memory: bool,

    /// Print ads as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all ads (cache first, network when needed)
    List,
    /// Show one ad picked at random
    Random,
    /// Show the ad with the given id
    Show {
        /// Ad identifier
        id: String,
    },
    /// Fetch fresh ads from the remote source
    Refresh,
    /// Delete the local cache
    Clear,
    /// Report an ad interaction
    Track {
        /// impression, click or dismiss
        kind: String,
        /// Ad identifier
        id: String,
    },
}

impl Cli {
    /// Builds SDK options from the global flags
    pub fn sdk_options(&self) -> SdkOptions {
        SdkOptions {
            api_url: self.api_url.clone(),
            intake_base_url: self.intake_base_url.clone(),
            cache_duration_ms: self.cache_duration_ms,
        }
    }
}

/// Parses an event kind argument
///
/// # Returns
/// * `Ok(AdEventKind)` if the string matches a valid kind
/// * `Err(CliError::InvalidEventKind)` if it doesn't
pub fn parse_event_kind(s: &str) -> Result<AdEventKind, CliError> {
    match s.to_ascii_lowercase().as_str() {
        "impression" | "view" => Ok(AdEventKind::Impression),
        "click" => Ok(AdEventKind::Click),
        "dismiss" | "close" => Ok(AdEventKind::Dismiss),
        _ => Err(CliError::InvalidEventKind(s.to_string())),
    }
}

/// Renders an ad as a few lines of plain text
pub fn render_ad(ad: &AdRecord) -> String {
    let mut out = format!(
        "[{}] {} ({}, {})\n  {}\n  {}\n",
        ad.id, ad.title, ad.icon, ad.accent_color, ad.tagline, ad.description
    );
    for feature in &ad.features {
        out.push_str(&format!("  - {}\n", feature));
    }
    out.push_str(&format!("  {} -> {}\n", ad.cta_text, ad.cta_url));
    out
}
