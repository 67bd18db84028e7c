//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use terrascope_worldgen::GenerationMode;

use crate::config::{EngineConfig, CONFIG_FILE};

/// Terrascope command-line arguments.
///
/// CLI values override settings loaded from the config file.
#[derive(Parser, Debug)]
#[command(name = "terrascope", version, about = "Walk a viewpoint across a procedural terrain world")]
pub struct CliArgs {
    /// Path to the TOML config file.
    #[arg(long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// World seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Generation mode (default, flat, zenith).
    #[arg(long)]
    pub mode: Option<GenerationMode>,

    /// Render distance in chunks.
    #[arg(long)]
    pub render_distance: Option<u32>,

    /// Keep generated chunks within this many chunks of the viewpoint.
    #[arg(long)]
    pub retain_radius: Option<u32>,

    /// Walk script, e.g. `e:120,n:40:fast`.
    #[arg(long)]
    pub walk: Option<String>,

    /// Status report interval in frames (0 disables).
    #[arg(long)]
    pub report_interval: Option<u32>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,

    /// Write the effective config to this path and continue.
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

impl EngineConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = Some(seed);
        }
        if let Some(mode) = args.mode {
            self.world.generation.mode = mode;
        }
        if let Some(rd) = args.render_distance {
            self.world.render_distance = rd;
        }
        if let Some(retain) = args.retain_radius {
            self.world.retain_radius = Some(retain);
        }
        if let Some(ref walk) = args.walk {
            self.walk.clone_from(walk);
        }
        if let Some(interval) = args.report_interval {
            self.report_interval = interval;
        }
    }
}
