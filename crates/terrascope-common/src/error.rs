//! Error types for Terrascope.

use thiserror::Error;

/// Top-level error type for Terrascope operations.
#[derive(Debug, Error)]
pub enum TerrascopeError {
    /// Configuration rejected at construction time
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Coordinate math left the representable range
    #[error("Coordinate error: {0}")]
    Coord(#[from] CoordError),
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Render distance outside the supported range
    #[error("render distance must be in 1..=100, got {0}")]
    RenderDistance(u32),

    /// Chunk size must be positive and fit a local coordinate
    #[error("chunk size must be in 1..=65536, got {0}")]
    ChunkSize(u32),

    /// Noise scale must be finite and positive
    #[error("noise scale must be finite and positive, got {0}")]
    NoiseScale(f64),

    /// Octave count must be at least one
    #[error("noise octaves must be at least 1, got {0}")]
    Octaves(u32),

    /// Persistence must lie in (0, 1]
    #[error("noise persistence must be in (0, 1], got {0}")]
    Persistence(f64),

    /// Elevation bounds are empty or not finite
    #[error("elevation range [{min}, {max}] is empty")]
    ElevationRange {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Sea level outside the elevation bounds
    #[error("sea level {sea_level} lies outside [{min}, {max}]")]
    SeaLevel {
        /// Configured sea level
        sea_level: f64,
        /// Lower elevation bound
        min: f64,
        /// Upper elevation bound
        max: f64,
    },

    /// Island radius for zenith generation must be finite and positive
    #[error("island radius must be finite and positive, got {0}")]
    IslandRadius(f64),

    /// Zoom outside the supported range
    #[error("zoom {value} is outside [{min}, {max}]")]
    Zoom {
        /// Requested zoom
        value: f64,
        /// Minimum zoom
        min: f64,
        /// Maximum zoom
        max: f64,
    },

    /// Move speed must be finite and positive
    #[error("move speed must be finite and positive, got {0}")]
    MoveSpeed(f64),

    /// Retained chunks must cover at least the visible window
    #[error("retain radius {retain} is smaller than render distance {render}")]
    RetainRadius {
        /// Requested retain radius
        retain: u32,
        /// Active render distance
        render: u32,
    },
}

/// Coordinate conversion errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Result does not fit the chunk coordinate width
    #[error("coordinate ({x}, {z}) is outside the representable range")]
    OutOfRange {
        /// X coordinate that failed
        x: i64,
        /// Z coordinate that failed
        z: i64,
    },

    /// NaN or infinite real position
    #[error("position ({x}, {z}) is not finite")]
    NonFinite {
        /// X position
        x: f64,
        /// Z position
        z: f64,
    },
}

/// Result type alias for Terrascope operations.
pub type TerrascopeResult<T> = Result<T, TerrascopeError>;
