//! Visible chunk window around a moving center.
//!
//! The window is the square of chunks within `render_distance`
//! (Chebyshev) of the center chunk. When the center moves, the window is
//! migrated one chunk at a time: x steps first, then z steps. Each unit
//! step evicts the trailing column (or row) and admits the leading one,
//! so the window is an exact square after every step and only the edge
//! chunks ever touch the store.

use std::sync::Arc;

use ahash::AHashMap;
use terrascope_common::{ChunkCoord, ConfigError, CoordError};
use terrascope_worldgen::Chunk;
use tracing::{debug, info};

use crate::config::{MAX_RENDER_DISTANCE, MIN_RENDER_DISTANCE};
use crate::store::ChunkStore;

/// Default render distance in chunks.
pub const DEFAULT_RENDER_DISTANCE: u32 = 20;

/// Checks a render distance against `1..=MAX_RENDER_DISTANCE`.
pub fn validate_render_distance(render_distance: u32) -> Result<(), ConfigError> {
    if !(MIN_RENDER_DISTANCE..=MAX_RENDER_DISTANCE).contains(&render_distance) {
        return Err(ConfigError::RenderDistance(render_distance));
    }
    Ok(())
}

/// Outcome of one window update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowUpdate {
    /// Chunks removed from the window
    pub evicted: usize,
    /// Chunks added to the window
    pub admitted: usize,
    /// Unit steps taken by the center
    pub steps: u64,
    /// Whether the window was rebuilt from scratch
    pub reinitialized: bool,
}

/// Axis a unit step moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Z,
}

/// Tracks the chunks in view.
pub struct VisibleSetManager {
    /// Chunks in the window, shared with the store.
    chunks: AHashMap<ChunkCoord, Arc<Chunk>>,
    /// Chebyshev radius of the window.
    render_distance: u32,
    /// Center the window was last built around. `None` until initialized.
    center: Option<ChunkCoord>,
}

impl VisibleSetManager {
    /// Creates an empty window.
    pub fn new(render_distance: u32) -> Result<Self, ConfigError> {
        validate_render_distance(render_distance)?;
        info!("Creating visible set with render_distance={}", render_distance);
        Ok(Self {
            chunks: AHashMap::new(),
            render_distance,
            center: None,
        })
    }

    /// Returns the render distance.
    #[must_use]
    pub const fn render_distance(&self) -> u32 {
        self.render_distance
    }

    /// Returns the tracked center chunk.
    #[must_use]
    pub const fn center(&self) -> Option<ChunkCoord> {
        self.center
    }

    /// Side length of a full window in chunks.
    #[must_use]
    pub const fn side(&self) -> u64 {
        2 * self.render_distance as u64 + 1
    }

    /// Returns the number of chunks in view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if the window has not been built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Checks if a chunk is in view.
    #[must_use]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Gets a visible chunk by coordinate.
    #[must_use]
    pub fn get(&self, coord: ChunkCoord) -> Option<&Arc<Chunk>> {
        self.chunks.get(&coord)
    }

    /// Gets all visible chunks for rendering, in no particular order.
    pub fn current_visible_chunks(&self) -> impl Iterator<Item = &Arc<Chunk>> {
        self.chunks.values()
    }

    /// Returns iterator over chunk positions the window should hold.
    ///
    /// Empty until the window has a center. Positions whose coordinates
    /// would leave the `i32` range are skipped.
    pub fn required_chunk_positions(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        let distance = i64::from(self.render_distance);
        self.center.into_iter().flat_map(move |center| {
            (-distance..=distance).flat_map(move |dz| {
                (-distance..=distance).filter_map(move |dx| center.offset(dx, dz).ok())
            })
        })
    }

    /// Checks that the window holds exactly the required square.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let Some(center) = self.center else {
            return self.chunks.is_empty();
        };
        self.chunks.len() as u64 == self.side() * self.side()
            && self
                .chunks
                .keys()
                .all(|coord| coord.chebyshev_distance(center) <= self.render_distance)
    }

    /// Builds the full window around `center`, replacing any previous one.
    pub fn initialize(
        &mut self,
        center: ChunkCoord,
        store: &mut ChunkStore,
    ) -> Result<WindowUpdate, CoordError> {
        let distance = i64::from(self.render_distance);
        let min = center.offset(-distance, -distance)?;
        let max = center.offset(distance, distance)?;

        let evicted = self.chunks.len();
        let capacity = (self.side() * self.side()) as usize;
        self.chunks.clear();
        self.chunks.reserve(capacity);

        for z in min.z..=max.z {
            for x in min.x..=max.x {
                let coord = ChunkCoord::new(x, z);
                self.chunks.insert(coord, store.get_or_generate(coord));
            }
        }
        self.center = Some(center);

        debug!(
            "Initialized visible set at {} ({} chunks)",
            center,
            self.chunks.len()
        );
        Ok(WindowUpdate {
            evicted,
            admitted: self.chunks.len(),
            steps: 0,
            reinitialized: true,
        })
    }

    /// Migrates the window to `new_center` one unit step at a time.
    ///
    /// An empty window is initialized at `new_center` instead. The target
    /// window is range-checked before anything changes, so on error the
    /// window is left as it was.
    ///
    /// Every chunk the window sweeps over is generated, including those
    /// never shown after a long jump: a move of `d` chunks generates up to
    /// `d * side()` chunks, and the store keeps them all unless a retain
    /// radius prunes it.
    pub fn on_center_moved(
        &mut self,
        new_center: ChunkCoord,
        store: &mut ChunkStore,
    ) -> Result<WindowUpdate, CoordError> {
        let current = match self.center {
            Some(center) if !self.chunks.is_empty() => center,
            _ => return self.initialize(new_center, store),
        };
        if current == new_center {
            return Ok(WindowUpdate::default());
        }

        let distance = i64::from(self.render_distance);
        new_center.offset(-distance, -distance)?;
        new_center.offset(distance, distance)?;

        let mut update = WindowUpdate::default();
        let mut center = current;
        while center.x != new_center.x {
            let step = if new_center.x > center.x { 1 } else { -1 };
            center = self.step(center, Axis::X, step, store, &mut update)?;
        }
        while center.z != new_center.z {
            let step = if new_center.z > center.z { 1 } else { -1 };
            center = self.step(center, Axis::Z, step, store, &mut update)?;
        }
        self.center = Some(center);

        debug!(
            "Visible set moved {} -> {}: {} steps, -{} +{}",
            current, new_center, update.steps, update.evicted, update.admitted
        );
        Ok(update)
    }

    /// Moves the window one chunk along `axis` and returns the new center.
    fn step(
        &mut self,
        center: ChunkCoord,
        axis: Axis,
        step: i64,
        store: &mut ChunkStore,
        update: &mut WindowUpdate,
    ) -> Result<ChunkCoord, CoordError> {
        let distance = i64::from(self.render_distance);
        let trailing = -distance * step;
        let leading = (distance + 1) * step;

        for across in -distance..=distance {
            let (evict, admit) = match axis {
                Axis::X => (
                    center.offset(trailing, across)?,
                    center.offset(leading, across)?,
                ),
                Axis::Z => (
                    center.offset(across, trailing)?,
                    center.offset(across, leading)?,
                ),
            };
            if self.chunks.remove(&evict).is_some() {
                update.evicted += 1;
            }
            self.chunks.insert(admit, store.get_or_generate(admit));
            update.admitted += 1;
        }
        update.steps += 1;

        match axis {
            Axis::X => center.offset(step, 0),
            Axis::Z => center.offset(0, step),
        }
    }

    /// Changes the render distance and drops the window.
    ///
    /// The next [`Self::on_center_moved`] or [`Self::initialize`] call
    /// rebuilds it from scratch.
    pub fn resize(&mut self, render_distance: u32) -> Result<(), ConfigError> {
        validate_render_distance(render_distance)?;
        info!(
            "Render distance {} -> {}, visible set cleared",
            self.render_distance, render_distance
        );
        self.render_distance = render_distance;
        self.clear();
        Ok(())
    }

    /// Drops every visible chunk and forgets the center.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.center = None;
    }
}

impl std::fmt::Debug for VisibleSetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibleSetManager")
            .field("render_distance", &self.render_distance)
            .field("center", &self.center)
            .field("visible_chunks", &self.chunks.len())
            .finish()
    }
}
