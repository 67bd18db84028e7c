//! Engine configuration.
//!
//! Wraps the world settings with the driver's own run settings. Loaded
//! from and saved to a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use terrascope_common::ConfigError;
use terrascope_world::WorldConfig;
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "terrascope.toml";

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Run Settings ===
    /// Viewpoint walk script, e.g. `e:120,n:40:fast`
    pub walk: String,
    /// Log a status line every this many frames (0 disables)
    pub report_interval: u32,

    // === Viewport Settings ===
    /// Viewport width in pixels, used for hit-testing
    pub viewport_width: u32,
    /// Viewport height in pixels, used for hit-testing
    pub viewport_height: u32,

    // === World ===
    /// World session settings
    pub world: WorldConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            walk: String::from("e:240,s:120,w:60:fast,in:10,n:120:slow"),
            report_interval: 60,
            viewport_width: 1280,
            viewport_height: 720,
            world: WorldConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        match fs::File::open(path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    warn!("Failed to read config file: {e}");
                    return Self::default();
                }

                match toml::from_str(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path.display());
                        config
                    },
                    Err(e) => {
                        warn!("Failed to parse config file: {e}");
                        Self::default()
                    },
                }
            },
            Err(e) => {
                warn!("Failed to open config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Viewport size as floats for screen transforms.
    #[must_use]
    pub fn viewport(&self) -> (f64, f64) {
        (f64::from(self.viewport_width), f64::from(self.viewport_height))
    }

    /// Reject values the session cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()
    }
}
