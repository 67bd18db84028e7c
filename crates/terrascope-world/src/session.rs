//! World session: store, visible window and viewpoint together.
//!
//! The session is the only owner of world state. A frontend drives it by
//! moving the viewpoint and calling [`WorldSession::tick`] once per frame,
//! then reads [`WorldSession::visible`] to draw.

use std::sync::Arc;

use serde::Serialize;
use terrascope_common::{ChunkCoord, ConfigError, TerrascopeResult, WorldCoord};
use terrascope_worldgen::{Cell, Chunk, GenerationMode, TerrainGenerator};
use tracing::{debug, info};

use crate::config::{WorldConfig, MAX_RENDER_DISTANCE, MIN_RENDER_DISTANCE};
use crate::store::{ChunkStore, StoreStats};
use crate::viewpoint::{Pace, Viewpoint};
use crate::visible::{VisibleSetManager, WindowUpdate};

/// Upper bound (exclusive) for randomly drawn seeds.
pub const RANDOM_SEED_LIMIT: u32 = 100_000;

/// Snapshot of session state for status displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStats {
    /// Chunks in the store
    pub generated_chunks: usize,
    /// Chunks in the visible window
    pub visible_chunks: usize,
    /// Viewpoint position
    pub position: (f64, f64),
    /// Viewpoint zoom
    pub zoom: f64,
    /// Visible window radius
    pub render_distance: u32,
    /// Chunk the window is centered on
    pub center: Option<ChunkCoord>,
    /// Active seed
    pub seed: u32,
    /// Active generation mode
    pub mode: GenerationMode,
    /// Store counters
    pub store: StoreStats,
}

/// One running world.
#[derive(Debug)]
pub struct WorldSession {
    config: WorldConfig,
    store: ChunkStore,
    visible: VisibleSetManager,
    viewpoint: Viewpoint,
}

impl WorldSession {
    /// Creates a session from a validated configuration.
    pub fn new(config: WorldConfig) -> TerrascopeResult<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(random_seed);
        let generator = TerrainGenerator::new(seed, config.generation.clone())?;
        let visible = VisibleSetManager::new(config.render_distance)?;
        let viewpoint = Viewpoint::new(config.zoom, config.move_speed)?;

        info!(
            "World session created: seed={}, mode={}, render_distance={}",
            seed, config.generation.mode, config.render_distance
        );
        Ok(Self {
            store: ChunkStore::new(generator),
            visible,
            viewpoint,
            config,
        })
    }

    /// Returns the configuration the session was created with.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Returns the chunk store.
    #[must_use]
    pub const fn store(&self) -> &ChunkStore {
        &self.store
    }

    /// Returns the visible window.
    #[must_use]
    pub const fn visible(&self) -> &VisibleSetManager {
        &self.visible
    }

    /// Returns the viewpoint.
    #[must_use]
    pub const fn viewpoint(&self) -> &Viewpoint {
        &self.viewpoint
    }

    /// Returns the active seed.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.store.generator().seed()
    }

    /// Returns the active generation mode.
    #[must_use]
    pub const fn mode(&self) -> GenerationMode {
        self.store.generator().mode()
    }

    /// Per-frame update.
    ///
    /// Builds the window if it is empty, or migrates it when the viewpoint
    /// has crossed into another chunk. Returns `None` when nothing changed.
    pub fn tick(&mut self) -> TerrascopeResult<Option<WindowUpdate>> {
        let target = self.viewpoint.chunk_coord()?;
        if !self.visible.is_empty() && self.visible.center() == Some(target) {
            return Ok(None);
        }

        let update = self.visible.on_center_moved(target, &mut self.store)?;
        if let Some(retain) = self.config.retain_radius {
            let radius = retain.max(self.visible.render_distance());
            self.store.evict_outside(target, radius);
        }
        Ok(Some(update))
    }

    /// Moves the viewpoint. Takes effect on the next [`Self::tick`].
    pub fn move_viewpoint(&mut self, dir_x: f64, dir_z: f64, pace: Pace) {
        self.viewpoint.translate(dir_x, dir_z, pace);
    }

    /// Places the viewpoint at a world position.
    pub fn set_viewpoint_position(&mut self, x: f64, z: f64) {
        self.viewpoint.center_on(x, z);
    }

    /// Zooms in (positive) or out (negative) by a tenth per unit.
    pub fn change_zoom(&mut self, direction: f64) {
        self.viewpoint.zoom_step(direction);
    }

    /// Zooms from a mouse wheel delta.
    pub fn zoom_wheel(&mut self, delta: f64) {
        self.viewpoint.zoom_wheel(delta);
    }

    /// Adjusts the render distance by `delta`, clamped to `1..=100`.
    ///
    /// The window is dropped and rebuilt on the next tick. Returns the new
    /// render distance.
    pub fn change_render_distance(&mut self, delta: i32) -> u32 {
        let current = i64::from(self.visible.render_distance());
        let target = (current + i64::from(delta))
            .clamp(i64::from(MIN_RENDER_DISTANCE), i64::from(MAX_RENDER_DISTANCE))
            as u32;
        if target != self.visible.render_distance() {
            self.apply_render_distance(target);
        }
        target
    }

    /// Sets the render distance. Values outside `1..=100` are rejected.
    pub fn set_render_distance(&mut self, render_distance: u32) -> Result<(), ConfigError> {
        self.visible.resize(render_distance)
    }

    fn apply_render_distance(&mut self, render_distance: u32) {
        // Callers only pass values clamped to at least 1.
        if let Err(err) = self.visible.resize(render_distance) {
            debug!("Render distance change ignored: {}", err);
        }
    }

    /// Starts a new world with the current mode.
    ///
    /// See [`Self::recreate_world_with_mode`].
    pub fn recreate_world(&mut self, seed: Option<u32>) -> u32 {
        self.recreate_world_with_mode(self.mode(), seed)
    }

    /// Starts a new world.
    ///
    /// The viewpoint returns to the origin at the configured zoom, the render
    /// distance returns to its configured value, and both the store and the
    /// window are emptied. Without an explicit seed a random one below
    /// [`RANDOM_SEED_LIMIT`] is drawn. Returns the seed in use.
    pub fn recreate_world_with_mode(&mut self, mode: GenerationMode, seed: Option<u32>) -> u32 {
        let seed = seed.unwrap_or_else(random_seed);
        info!("Recreating world: seed={}, mode={}", seed, mode);

        self.viewpoint.reset(self.config.zoom);
        self.store.clear_and_reconfigure(seed, mode);
        self.apply_render_distance(self.config.render_distance);
        seed
    }

    /// Chunk under a world position, without generating.
    #[must_use]
    pub fn chunk_at_world(&self, x: f64, z: f64) -> Option<&Arc<Chunk>> {
        self.store
            .chunk_at_world(WorldCoord::from_position(x, z).ok()?)
    }

    /// Cell under a world position, without generating.
    #[must_use]
    pub fn cell_at_world(&self, x: f64, z: f64) -> Option<&Cell> {
        self.store
            .cell_at_world(WorldCoord::from_position(x, z).ok()?)
    }

    /// Chunk under a screen point, without generating.
    #[must_use]
    pub fn chunk_at_screen(&self, screen: (f64, f64), viewport: (f64, f64)) -> Option<&Arc<Chunk>> {
        let (x, z) = self.viewpoint.screen_to_world(screen, viewport);
        self.chunk_at_world(x, z)
    }

    /// Cell under a screen point, without generating.
    #[must_use]
    pub fn cell_at_screen(&self, screen: (f64, f64), viewport: (f64, f64)) -> Option<&Cell> {
        let (x, z) = self.viewpoint.screen_to_world(screen, viewport);
        self.cell_at_world(x, z)
    }

    /// Returns a snapshot for status displays.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            generated_chunks: self.store.len(),
            visible_chunks: self.visible.len(),
            position: self.viewpoint.position,
            zoom: self.viewpoint.zoom(),
            render_distance: self.visible.render_distance(),
            center: self.visible.center(),
            seed: self.seed(),
            mode: self.mode(),
            store: self.store.stats(),
        }
    }
}

fn random_seed() -> u32 {
    fastrand::u32(..RANDOM_SEED_LIMIT)
}
