//! Binary crate for the `skycast` terminal weather dashboard.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - The dashboard event loop and rendering

use std::{fs, sync::Arc};

use anyhow::Context;
use clap::Parser;
use skycast_core::Config;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cmd = cli::Cli::parse();
    cmd.run().await
}

/// Route logs to a file; the terminal itself is occupied by the dashboard.
fn init_logging() -> anyhow::Result<()> {
    let path = Config::log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = Arc::new(
        fs::File::create(&path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?,
    );

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(move || Arc::clone(&file))
        .init();

    Ok(())
}
