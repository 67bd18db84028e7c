//! Biome tags and threshold classification.
//!
//! A biome is chosen from a cell's elevation, temperature and rainfall in
//! three bands: ocean below sea level, lowland up to `elevation_max / 1.4`,
//! and mountains above that.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::params::{GenerationParams, ELEVATION_MAX, SEA_LEVEL};

/// Discrete terrain classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Biome {
    /// Hot and dry lowland.
    Desert,
    /// Hot lowland with light rain.
    Savanna,
    /// Temperate dry lowland.
    Plains,
    /// Temperate wet lowland.
    Shrubland,
    /// Hot and very wet lowland.
    Jungle,
    /// Hot lowland with moderate rain.
    Forest,
    /// Shoreline. Defined for palettes, never produced by the classifier.
    Beach,
    /// Snow-capped mountain.
    SnowyPeaks,
    /// Cold dry lowland.
    Tundra,
    /// Cold wet lowland.
    Taiga,
    /// Temperate shallow ocean.
    Ocean,
    /// Ocean below half the sea level.
    DeepOcean,
    /// Warm shallow ocean.
    WarmOcean,
    /// Cold shallow ocean.
    ColdOcean,
    /// High ground without snow.
    Mountains,
}

impl Biome {
    /// Every biome tag.
    pub const ALL: [Self; 15] = [
        Self::Desert,
        Self::Savanna,
        Self::Plains,
        Self::Shrubland,
        Self::Jungle,
        Self::Forest,
        Self::Beach,
        Self::SnowyPeaks,
        Self::Tundra,
        Self::Taiga,
        Self::Ocean,
        Self::DeepOcean,
        Self::WarmOcean,
        Self::ColdOcean,
        Self::Mountains,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Desert => "Desert",
            Self::Savanna => "Savanna",
            Self::Plains => "Plains",
            Self::Shrubland => "Shrubland",
            Self::Jungle => "Jungle",
            Self::Forest => "Forest",
            Self::Beach => "Beach",
            Self::SnowyPeaks => "Snowy Peaks",
            Self::Tundra => "Tundra",
            Self::Taiga => "Taiga",
            Self::Ocean => "Ocean",
            Self::DeepOcean => "Deep Ocean",
            Self::WarmOcean => "Warm Ocean",
            Self::ColdOcean => "Cold Ocean",
            Self::Mountains => "Mountains",
        }
    }

    /// Reference display colour as `[r, g, b]`.
    #[must_use]
    pub const fn color(self) -> [u8; 3] {
        match self {
            Self::Desert => [255, 255, 100],
            Self::Savanna => [187, 255, 120],
            Self::Plains => [100, 255, 100],
            Self::Shrubland => [141, 255, 84],
            Self::Jungle => [0, 200, 0],
            Self::Forest => [0, 120, 0],
            Self::Beach => [255, 255, 0],
            Self::SnowyPeaks => [255, 255, 255],
            Self::Tundra => [200, 200, 200],
            Self::Taiga => [120, 255, 196],
            Self::Ocean => [0, 0, 200],
            Self::DeepOcean => [0, 0, 100],
            Self::WarmOcean => [0, 151, 189],
            Self::ColdOcean => [50, 100, 255],
            Self::Mountains => [102, 102, 102],
        }
    }

    /// Returns true for the four ocean tags.
    #[must_use]
    pub const fn is_ocean(self) -> bool {
        matches!(
            self,
            Self::Ocean | Self::DeepOcean | Self::WarmOcean | Self::ColdOcean
        )
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps climate samples to a [`Biome`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeClassifier {
    sea_level: f64,
    elevation_max: f64,
}

impl Default for BiomeClassifier {
    fn default() -> Self {
        Self::new(SEA_LEVEL, ELEVATION_MAX)
    }
}

impl BiomeClassifier {
    /// Creates a classifier for the given sea level and elevation ceiling.
    #[must_use]
    pub const fn new(sea_level: f64, elevation_max: f64) -> Self {
        Self {
            sea_level,
            elevation_max,
        }
    }

    /// Creates a classifier matching generation parameters.
    #[must_use]
    pub const fn from_params(params: &GenerationParams) -> Self {
        Self::new(params.sea_level, params.elevation_max)
    }

    /// Classifies one cell. Total over all inputs, NaN included.
    #[must_use]
    pub fn classify(&self, elevation: f64, temperature: f64, rainfall: f64) -> Biome {
        if elevation < self.sea_level {
            return if elevation < self.sea_level / 2.0 {
                Biome::DeepOcean
            } else if temperature < 0.33 {
                Biome::ColdOcean
            } else if temperature < 0.66 {
                Biome::Ocean
            } else {
                Biome::WarmOcean
            };
        }

        if elevation < self.elevation_max / 1.4 {
            return if temperature < 0.25 {
                if rainfall < 0.25 {
                    Biome::Tundra
                } else {
                    Biome::Taiga
                }
            } else if temperature < 0.5 {
                if rainfall < 0.25 {
                    Biome::Plains
                } else {
                    Biome::Shrubland
                }
            } else if rainfall < 0.25 {
                Biome::Desert
            } else if rainfall < 0.5 {
                Biome::Savanna
            } else if rainfall < 0.75 {
                Biome::Forest
            } else {
                Biome::Jungle
            };
        }

        let snow_line = if temperature > 0.5 {
            self.elevation_max / 1.2
        } else {
            self.elevation_max / 1.35
        };
        if elevation > snow_line {
            Biome::SnowyPeaks
        } else {
            Biome::Mountains
        }
    }
}
