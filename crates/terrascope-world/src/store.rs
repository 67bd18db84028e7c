//! Session-wide chunk storage.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use ahash::AHashMap;
use serde::Serialize;
use terrascope_common::{ChunkCoord, WorldCoord};
use terrascope_worldgen::{Cell, Chunk, GenerationMode, TerrainGenerator};
use tracing::{debug, info};

/// Store counters since the last clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Lookups answered from the store
    pub hits: u64,
    /// Chunks generated on a miss
    pub generated: u64,
    /// Chunks dropped by retention pruning
    pub evicted: u64,
}

/// Owns every chunk generated for the current world.
///
/// At most one chunk exists per coordinate. Chunks are handed out as
/// [`Arc`]s so the visible window can share them without copying.
pub struct ChunkStore {
    chunks: AHashMap<ChunkCoord, Arc<Chunk>>,
    generator: TerrainGenerator,
    stats: StoreStats,
}

impl ChunkStore {
    /// Creates an empty store around a generator.
    #[must_use]
    pub fn new(generator: TerrainGenerator) -> Self {
        info!(
            "Creating chunk store: seed={}, mode={}",
            generator.seed(),
            generator.mode()
        );
        Self {
            chunks: AHashMap::new(),
            generator,
            stats: StoreStats::default(),
        }
    }

    /// Returns the generator backing this store.
    #[must_use]
    pub const fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Returns the stored chunk at `coord`, generating it on first request.
    pub fn get_or_generate(&mut self, coord: ChunkCoord) -> Arc<Chunk> {
        match self.chunks.entry(coord) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Arc::clone(entry.get())
            },
            Entry::Vacant(entry) => {
                debug!("Generating chunk {}", coord);
                self.stats.generated += 1;
                let chunk = Arc::new(self.generator.generate(coord));
                Arc::clone(entry.insert(chunk))
            },
        }
    }

    /// Returns the chunk at `coord` without generating it.
    #[must_use]
    pub fn get(&self, coord: ChunkCoord) -> Option<&Arc<Chunk>> {
        self.chunks.get(&coord)
    }

    /// Checks if a chunk has been generated.
    #[must_use]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Returns the generated chunk holding a world cell.
    #[must_use]
    pub fn chunk_at_world(&self, world: WorldCoord) -> Option<&Arc<Chunk>> {
        self.get(world.chunk().ok()?)
    }

    /// Returns a generated cell by world coordinate.
    #[must_use]
    pub fn cell_at_world(&self, world: WorldCoord) -> Option<&Cell> {
        self.chunk_at_world(world)?.cell(world.local())
    }

    /// Returns the number of generated chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if nothing has been generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Returns the store counters.
    #[must_use]
    pub const fn stats(&self) -> StoreStats {
        self.stats
    }

    /// Drops every chunk and resets the counters.
    pub fn clear(&mut self) {
        info!("Clearing chunk store ({} chunks)", self.chunks.len());
        self.chunks.clear();
        self.stats = StoreStats::default();
    }

    /// Clears the store and switches the generator to a new world.
    pub fn clear_and_reconfigure(&mut self, seed: u32, mode: GenerationMode) {
        self.clear();
        self.generator.reseed(seed);
        self.generator.set_mode(mode);
    }

    /// Drops chunks farther than `retain_radius` (Chebyshev) from `center`.
    ///
    /// Returns how many chunks were dropped.
    pub fn evict_outside(&mut self, center: ChunkCoord, retain_radius: u32) -> usize {
        let before = self.chunks.len();
        self.chunks
            .retain(|coord, _| coord.chebyshev_distance(center) <= retain_radius);
        let evicted = before - self.chunks.len();
        if evicted > 0 {
            debug!(
                "Evicted {} chunks beyond radius {} of {}",
                evicted, retain_radius, center
            );
            self.stats.evicted += evicted as u64;
        }
        evicted
    }
}

impl std::fmt::Debug for ChunkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkStore")
            .field("seed", &self.generator.seed())
            .field("mode", &self.generator.mode())
            .field("chunks", &self.chunks.len())
            .field("stats", &self.stats)
            .finish()
    }
}
