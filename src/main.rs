//! adkit - command-line front end for the promotional content cache
//!
//! Lists, picks, refreshes and clears cached ads using the same query API a
//! host application would use.

use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use adkit::cli::{parse_event_kind, render_ad, Cli, Command};
use adkit::data::HttpContentSource;
use adkit::store::{select_store, KeyValueStore, MemoryStore};
use adkit::{AdRecord, AdSdk, SdkConfig};

/// Installs the log subscriber on stderr
///
/// `RUST_LOG` wins when set; otherwise warnings only, or debug with `-v`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "adkit=debug" } else { "adkit=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn print_ads(ads: &[AdRecord], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout().lock();
    if json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(ads)?)?;
    } else {
        for ad in ads {
            writeln!(stdout, "{}", render_ad(ad))?;
        }
    }
    Ok(())
}

fn print_one(ad: Option<AdRecord>, json: bool, missing: &str) -> Result<(), Box<dyn std::error::Error>> {
    match ad {
        Some(ad) => print_ads(std::slice::from_ref(&ad), json),
        None => {
            eprintln!("{}", missing);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store: Arc<dyn KeyValueStore> = if cli.memory {
        Arc::new(MemoryStore::new())
    } else {
        select_store()
    };
    let config = SdkConfig::from_options(cli.sdk_options());
    let sdk = AdSdk::with_parts(store, Arc::new(HttpContentSource::new()), config);

    match &cli.command {
        Command::List => {
            let ads = sdk.get_all_ads().await;
            print_ads(&ads, cli.json)?;
        }
        Command::Random => {
            let ad = sdk.get_random_ad().await;
            print_one(ad, cli.json, "No ads available")?;
        }
        Command::Show { id } => {
            let ad = sdk.get_ad_by_id(id).await;
            print_one(ad, cli.json, &format!("No ad with id '{}'", id))?;
        }
        Command::Refresh => {
            let ads = sdk.refresh_ads().await?;
            print_ads(&ads, cli.json)?;
        }
        Command::Clear => {
            sdk.clear_ads_cache().await?;
            eprintln!("Cache cleared");
        }
        Command::Track { kind, id } => {
            let kind = parse_event_kind(kind)?;
            sdk.track_event(kind, id);
        }
    }

    Ok(())
}
