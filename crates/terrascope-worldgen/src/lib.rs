//! # Terrascope Worldgen
//!
//! Deterministic terrain generation for Terrascope.
//!
//! This crate handles:
//! - Seeded multi-octave noise ([`NoiseField`])
//! - Biome classification from elevation, temperature and rainfall
//! - Chunk generation in default, flat and zenith (island) modes

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod biome;
pub mod cell;
pub mod chunk;
pub mod field;
pub mod generator;
pub mod params;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::biome::*;
    pub use crate::cell::*;
    pub use crate::chunk::*;
    pub use crate::field::*;
    pub use crate::generator::*;
    pub use crate::params::*;
}

pub use prelude::*;
