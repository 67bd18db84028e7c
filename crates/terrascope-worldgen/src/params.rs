//! World generation parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use terrascope_common::ConfigError;

use crate::field::{DEFAULT_OCTAVES, DEFAULT_PERSISTENCE};

/// Default sea level.
pub const SEA_LEVEL: f64 = 150.0;

/// Lowest generated elevation.
pub const ELEVATION_MIN: f64 = 0.0;

/// Highest generated elevation.
pub const ELEVATION_MAX: f64 = 300.0;

/// Default world-space noise scale for elevation.
pub const DEFAULT_NOISE_SCALE: f64 = 0.01;

/// Temperature and rainfall vary this many times slower than elevation.
pub const CLIMATE_SCALE_DIVISOR: f64 = 4.0;

/// Default island radius for [`GenerationMode::Zenith`].
pub const DEFAULT_ISLAND_RADIUS: f64 = 500.0;

/// Fixed world-space offset applied before sampling one noise channel.
///
/// Distinct offsets keep the channels decorrelated while sharing a seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelOffset {
    /// X offset
    pub x: f64,
    /// Z offset
    pub z: f64,
}

/// Elevation channel offset.
pub const ELEVATION_OFFSET: ChannelOffset = ChannelOffset { x: 56852.0, z: 27384.0 };
/// Temperature channel offset.
pub const TEMPERATURE_OFFSET: ChannelOffset = ChannelOffset { x: 97445.0, z: 43758.0 };
/// Rainfall channel offset.
pub const RAINFALL_OFFSET: ChannelOffset = ChannelOffset { x: 85637.0, z: 23548.0 };

/// How terrain is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Noise-driven elevation, temperature and rainfall.
    #[default]
    Default,
    /// Uniform sea-level plains.
    Flat,
    /// One circular island centered on the world origin.
    Zenith,
}

impl GenerationMode {
    /// All modes, in cycling order.
    pub const ALL: [Self; 3] = [Self::Default, Self::Flat, Self::Zenith];

    /// Lowercase name used in configuration files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Flat => "flat",
            Self::Zenith => "zenith",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown generation mode `{s}` (expected default, flat or zenith)"))
    }
}

/// Parameters controlling world generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Terrain shaping mode.
    pub mode: GenerationMode,
    /// World-space scale applied to elevation samples.
    pub noise_scale: f64,
    /// Boundary between ocean and land biomes.
    pub sea_level: f64,
    /// Lower elevation bound.
    pub elevation_min: f64,
    /// Upper elevation bound.
    pub elevation_max: f64,
    /// Island radius in world cells, zenith mode only.
    pub island_radius: f64,
    /// Noise octaves.
    pub octaves: u32,
    /// Noise amplitude falloff per octave.
    pub persistence: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            mode: GenerationMode::Default,
            noise_scale: DEFAULT_NOISE_SCALE,
            sea_level: SEA_LEVEL,
            elevation_min: ELEVATION_MIN,
            elevation_max: ELEVATION_MAX,
            island_radius: DEFAULT_ISLAND_RADIUS,
            octaves: DEFAULT_OCTAVES,
            persistence: DEFAULT_PERSISTENCE,
        }
    }
}

impl GenerationParams {
    /// Default parameters with a different mode.
    #[must_use]
    pub fn with_mode(mode: GenerationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Noise scale used for temperature and rainfall.
    #[must_use]
    pub fn climate_scale(&self) -> f64 {
        self.noise_scale / CLIMATE_SCALE_DIVISOR
    }

    /// Rejects parameter sets generation cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.noise_scale.is_finite() && self.noise_scale > 0.0) {
            return Err(ConfigError::NoiseScale(self.noise_scale));
        }
        if !(self.elevation_min.is_finite()
            && self.elevation_max.is_finite()
            && self.elevation_min < self.elevation_max)
        {
            return Err(ConfigError::ElevationRange {
                min: self.elevation_min,
                max: self.elevation_max,
            });
        }
        if !(self.elevation_min..=self.elevation_max).contains(&self.sea_level) {
            return Err(ConfigError::SeaLevel {
                sea_level: self.sea_level,
                min: self.elevation_min,
                max: self.elevation_max,
            });
        }
        if !(self.island_radius.is_finite() && self.island_radius > 0.0) {
            return Err(ConfigError::IslandRadius(self.island_radius));
        }
        if self.octaves == 0 {
            return Err(ConfigError::Octaves(self.octaves));
        }
        if !(self.persistence > 0.0 && self.persistence <= 1.0) {
            return Err(ConfigError::Persistence(self.persistence));
        }
        Ok(())
    }
}
