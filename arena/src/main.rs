//! Arena - head-to-head matches between the search engines
//!
//! Plays a batch of Saint Petersburg games between two configured players:
//! 1. Reads defaults from config.toml and `CARDSEARCH_*` overrides
//! 2. Runs games in parallel on the blocking pool, alternating seats
//! 3. Logs wins, draws, mean points and mean game length

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing::{error, info};

mod config;
mod match_runner;
mod players;
mod stats;

use crate::config::{Config, CENTRAL_CONFIG};
use crate::players::EngineSettings;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let settings = Arc::new(EngineSettings::from_central(&CENTRAL_CONFIG)?);

    // Stop starting new games on ctrl+c; games in progress finish
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_flag = Arc::clone(&shutdown);
    let shutdown_handle = tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received, finishing running games...");
            shutdown_flag.store(true, Ordering::Relaxed);
        }
    });

    let result = match_runner::run_match(&config, settings, shutdown).await;
    shutdown_handle.abort();

    match result {
        Ok(stats) => {
            stats.log_summary();
            Ok(())
        }
        Err(e) => {
            error!("Arena failed: {}", e);
            Err(e)
        }
    }
}
