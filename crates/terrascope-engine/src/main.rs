//! # Terrascope Engine
//!
//! Headless entry point for Terrascope.
//!
//! Loads the TOML config, applies command-line overrides, then walks a
//! viewpoint across the world and logs what comes into view.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod cli;
mod config;
mod walk;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::CliArgs;
use crate::config::EngineConfig;

/// Main entry point.
fn main() -> Result<()> {
    let args = CliArgs::parse();

    let filter = EnvFilter::from_default_env().add_directive("terrascope=info".parse()?);
    if args.log_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    info!("Terrascope starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = EngineConfig::load_from(&args.config);
    config.apply_cli_overrides(&args);
    if let Some(path) = &args.save_config {
        config.save_to(path)?;
    }

    app::run(&config)?;

    info!("Terrascope shutdown complete");
    Ok(())
}
