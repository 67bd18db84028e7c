//! Viewpoint (camera) for looking at the world.
//!
//! Holds position and zoom plus the movement and screen transform rules.
//! Rendering itself lives outside this crate.

use serde::{Deserialize, Serialize};
use terrascope_common::{ChunkCoord, ConfigError, CoordError, WorldCoord};

/// Minimum zoom level (zoomed out).
pub const MIN_ZOOM: f64 = 0.1;

/// Maximum zoom level (zoomed in).
pub const MAX_ZOOM: f64 = 10.0;

/// Default zoom level.
pub const DEFAULT_ZOOM: f64 = 0.3;

/// World units moved per step at zoom 1.
pub const DEFAULT_MOVE_SPEED: f64 = 2.5;

/// Screen pixels per cell at zoom 1.
pub const CELL_PIXELS: f64 = 5.0;

/// Movement speed modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    /// Base speed.
    #[default]
    Normal,
    /// Twice the base speed.
    Fast,
    /// Half the base speed.
    Slow,
}

impl Pace {
    /// Speed multiplier.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::Fast => 2.0,
            Self::Slow => 0.5,
        }
    }
}

/// Checks a zoom value against the supported range.
pub fn validate_zoom(zoom: f64) -> Result<(), ConfigError> {
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        return Err(ConfigError::Zoom {
            value: zoom,
            min: MIN_ZOOM,
            max: MAX_ZOOM,
        });
    }
    Ok(())
}

/// Camera position and zoom over the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewpoint {
    /// Position in world units (center of view).
    pub position: (f64, f64),
    zoom: f64,
    move_speed: f64,
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self {
            position: (0.0, 0.0),
            zoom: DEFAULT_ZOOM,
            move_speed: DEFAULT_MOVE_SPEED,
        }
    }
}

impl Viewpoint {
    /// Creates a viewpoint at the origin.
    pub fn new(zoom: f64, move_speed: f64) -> Result<Self, ConfigError> {
        validate_zoom(zoom)?;
        if !(move_speed.is_finite() && move_speed > 0.0) {
            return Err(ConfigError::MoveSpeed(move_speed));
        }
        Ok(Self {
            position: (0.0, 0.0),
            zoom,
            move_speed,
        })
    }

    /// Returns the zoom level.
    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set absolute zoom level (clamped).
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Returns the base move speed.
    #[must_use]
    pub const fn move_speed(&self) -> f64 {
        self.move_speed
    }

    /// Center on a world position.
    pub fn center_on(&mut self, x: f64, z: f64) {
        self.position = (x, z);
    }

    /// Moves along `(dir_x, dir_z)`.
    ///
    /// Distance per call is the move speed times the pace multiplier,
    /// divided by zoom, so a step covers the same screen distance at any
    /// zoom level.
    pub fn translate(&mut self, dir_x: f64, dir_z: f64, pace: Pace) {
        let speed = self.move_speed * pace.multiplier() / self.zoom;
        self.position.0 += dir_x * speed;
        self.position.1 += dir_z * speed;
    }

    /// Zooms by a tenth of the current zoom per unit of `direction`.
    pub fn zoom_step(&mut self, direction: f64) {
        self.set_zoom(self.zoom + self.zoom / 10.0 * direction);
    }

    /// Zooms from a mouse wheel delta. Positive deltas zoom out.
    pub fn zoom_wheel(&mut self, delta: f64) {
        self.set_zoom(self.zoom - delta * (self.zoom / 10.0) * 0.01);
    }

    /// World cell under the viewpoint.
    pub fn cell(&self) -> Result<WorldCoord, CoordError> {
        WorldCoord::from_position(self.position.0, self.position.1)
    }

    /// Chunk under the viewpoint.
    pub fn chunk_coord(&self) -> Result<ChunkCoord, CoordError> {
        self.cell()?.chunk()
    }

    /// Convert screen coordinates to world coordinates.
    ///
    /// The viewpoint position sits at the center of a viewport of
    /// `viewport` pixels.
    #[must_use]
    pub fn screen_to_world(&self, screen: (f64, f64), viewport: (f64, f64)) -> (f64, f64) {
        let scale = self.zoom * CELL_PIXELS;
        (
            (screen.0 - viewport.0 / 2.0) / scale + self.position.0,
            (screen.1 - viewport.1 / 2.0) / scale + self.position.1,
        )
    }

    /// Convert world coordinates to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: (f64, f64), viewport: (f64, f64)) -> (f64, f64) {
        let scale = self.zoom * CELL_PIXELS;
        (
            (world.0 - self.position.0) * scale + viewport.0 / 2.0,
            (world.1 - self.position.1) * scale + viewport.1 / 2.0,
        )
    }

    /// Returns to the origin at the given zoom.
    pub fn reset(&mut self, zoom: f64) {
        self.position = (0.0, 0.0);
        self.set_zoom(zoom);
    }
}
