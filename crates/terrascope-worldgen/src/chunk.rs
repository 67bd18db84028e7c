//! Chunk of generated cells.

use terrascope_common::{ChunkCoord, LocalCoord, WorldCoord, CHUNK_SIZE};

use crate::cell::Cell;
use crate::params::GenerationMode;

/// Cells in one chunk.
pub const CELLS_PER_CHUNK: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

/// A fully generated square of `CHUNK_SIZE` x `CHUNK_SIZE` cells.
///
/// Chunks are only built by [`crate::TerrainGenerator`], with every cell
/// populated, and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    coord: ChunkCoord,
    seed: u32,
    mode: GenerationMode,
    cells: Box<[Cell]>,
}

impl Chunk {
    pub(crate) fn from_cells(
        coord: ChunkCoord,
        seed: u32,
        mode: GenerationMode,
        cells: Vec<Cell>,
    ) -> Self {
        debug_assert_eq!(cells.len(), CELLS_PER_CHUNK);
        Self {
            coord,
            seed,
            mode,
            cells: cells.into_boxed_slice(),
        }
    }

    /// Returns the chunk coordinate.
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Seed this chunk was generated with.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Mode this chunk was generated with.
    #[must_use]
    pub const fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// World coordinate of the minimum corner cell.
    #[must_use]
    pub const fn origin(&self) -> WorldCoord {
        self.coord.origin()
    }

    /// All cells, row-major in z.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at a local offset.
    #[must_use]
    pub fn cell(&self, local: LocalCoord) -> Option<&Cell> {
        if u32::from(local.x) >= CHUNK_SIZE || u32::from(local.z) >= CHUNK_SIZE {
            return None;
        }
        self.cells.get(local.to_index(CHUNK_SIZE))
    }

    /// Cell at a world position, if that position lies in this chunk.
    #[must_use]
    pub fn cell_at_world(&self, world: WorldCoord) -> Option<&Cell> {
        if world.chunk().ok()? != self.coord {
            return None;
        }
        self.cell(world.local())
    }
}
