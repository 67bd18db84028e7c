//! # Terrascope World
//!
//! Runtime world management for Terrascope.
//!
//! This crate handles:
//! - Chunk storage with lazy, at-most-once generation
//! - The visible chunk window and its incremental migration
//! - Viewpoint movement, zoom and screen hit-testing
//! - The [`WorldSession`] that ties them together

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod session;
pub mod store;
pub mod viewpoint;
pub mod visible;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::session::*;
    pub use crate::store::*;
    pub use crate::viewpoint::*;
    pub use crate::visible::*;
}

pub use prelude::*;
