//! # Terrascope Common
//!
//! Shared types for the Terrascope terrain crates.
//!
//! This crate provides:
//! - Coordinate types (world, chunk, local) and floor-based conversion
//! - The chunk size constant
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_coords_conversion() {
        let world = WorldCoord::new(100, 200);
        let chunk = world.to_chunk_coord(32).ok();
        let local = world.to_local_coord(32).ok();

        assert_eq!(chunk, Some(ChunkCoord::new(3, 6)));
        assert_eq!(local, Some(LocalCoord::new(4, 8)));
    }

    #[test]
    fn test_error_conversion() {
        let err: TerrascopeError = ConfigError::RenderDistance(0).into();
        assert!(err.to_string().contains("render distance"));

        let err: TerrascopeError = CoordError::OutOfRange { x: 1, z: 2 }.into();
        assert!(matches!(err, TerrascopeError::Coord(_)));
    }
}
