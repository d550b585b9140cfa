//! # IBGE News
//!
//! A personal news tracker for the IBGE public news API. Search by title,
//! keywords, or publication date; mark results as read, favorite, or saved
//! for later; flags survive across sessions in a local JSON document.
//!
//! ## Usage
//!
//! ```sh
//! ibge_news --data-dir ./dados
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetch**: [`api::NewsClient`] validates the search input, queries the
//!    remote API, and normalizes the response into [`models::Article`]s,
//!    dropping malformed items instead of failing the batch
//! 2. **Reconcile**: [`state::UserState`] merges a selected record by id,
//!    keeping stored descriptive fields and adopting only the flags
//! 3. **Persist**: [`store::UserStateStore`] rewrites the full state
//!    document after every mutation and at shutdown

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod api;
mod cli;
mod error;
mod menu;
mod models;
mod sort;
mod state;
mod store;
mod validation;

use api::NewsClient;
use cli::Cli;
use store::UserStateStore;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ibge_news starting up");

    let args = Cli::parse();
    debug!(?args.data_dir, ?args.base_url, "Parsed CLI arguments");

    let client = NewsClient::with_base_url(&args.base_url)?;
    let store = UserStateStore::new(&args.data_dir);
    info!(state_file = %store.path().display(), "Store initialized");

    menu::run(&client, &store).await?;

    let elapsed = start_time.elapsed();
    info!(?elapsed, secs = elapsed.as_secs(), "Session complete");
    Ok(())
}
