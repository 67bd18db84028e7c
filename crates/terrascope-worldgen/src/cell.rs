//! Single terrain cell.

use serde::Serialize;
use terrascope_common::WorldCoord;

use crate::biome::Biome;

/// One generated grid cell. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cell {
    world: WorldCoord,
    elevation: f64,
    temperature: f64,
    rainfall: f64,
    biome: Biome,
}

impl Cell {
    /// Creates a cell from its generated attributes.
    #[must_use]
    pub const fn new(
        world: WorldCoord,
        elevation: f64,
        temperature: f64,
        rainfall: f64,
        biome: Biome,
    ) -> Self {
        Self {
            world,
            elevation,
            temperature,
            rainfall,
            biome,
        }
    }

    /// World position.
    #[must_use]
    pub const fn world(&self) -> WorldCoord {
        self.world
    }

    /// Elevation in world height units.
    #[must_use]
    pub const fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Temperature in `[0, 1]`.
    #[must_use]
    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Rainfall in `[0, 1]`.
    #[must_use]
    pub const fn rainfall(&self) -> f64 {
        self.rainfall
    }

    /// Assigned biome.
    #[must_use]
    pub const fn biome(&self) -> Biome {
        self.biome
    }
}
