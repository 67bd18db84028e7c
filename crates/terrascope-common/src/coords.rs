//! Coordinate types for world, chunk, and local positions.
//!
//! World coordinates address single cells on the infinite grid. Chunk
//! coordinates address square tiles of `chunk_size` cells, and local
//! coordinates address a cell inside one tile. Conversion always floors
//! toward negative infinity, so world `-1` lives in chunk `-1` at local
//! offset `chunk_size - 1`.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoordError, TerrascopeResult};

/// Side length of a chunk in cells.
pub const CHUNK_SIZE: u32 = 16;

/// Largest chunk size a [`LocalCoord`] can address.
pub const MAX_CHUNK_SIZE: u32 = u16::MAX as u32 + 1;

const _: () = assert!(CHUNK_SIZE > 0 && CHUNK_SIZE <= MAX_CHUNK_SIZE);

/// Checks that `chunk_size` can be used for coordinate conversion.
pub fn validate_chunk_size(chunk_size: u32) -> Result<(), ConfigError> {
    if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
        return Err(ConfigError::ChunkSize(chunk_size));
    }
    Ok(())
}

/// Converts one world axis value to its chunk axis value.
pub fn world_to_chunk(world: i64, chunk_size: u32) -> TerrascopeResult<i32> {
    validate_chunk_size(chunk_size)?;
    let chunk = world.div_euclid(i64::from(chunk_size));
    i32::try_from(chunk).map_err(|_| CoordError::OutOfRange { x: chunk, z: 0 }.into())
}

/// Converts one world axis value to its offset inside the owning chunk.
pub fn world_to_local(world: i64, chunk_size: u32) -> TerrascopeResult<u16> {
    validate_chunk_size(chunk_size)?;
    Ok(world.rem_euclid(i64::from(chunk_size)) as u16)
}

/// World coordinate of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldCoord {
    /// X coordinate in world space
    pub x: i64,
    /// Z coordinate in world space
    pub z: i64,
}

impl WorldCoord {
    /// Creates a new world coordinate.
    #[must_use]
    pub const fn new(x: i64, z: i64) -> Self {
        Self { x, z }
    }

    /// Returns the cell containing a real-valued world position.
    pub fn from_position(x: f64, z: f64) -> Result<Self, CoordError> {
        if !x.is_finite() || !z.is_finite() {
            return Err(CoordError::NonFinite { x, z });
        }
        let (fx, fz) = (x.floor(), z.floor());
        // i64::MAX as f64 rounds up to 2^63, hence the strict bound.
        let fits = |v: f64| v >= i64::MIN as f64 && v < i64::MAX as f64;
        if !fits(fx) || !fits(fz) {
            return Err(CoordError::OutOfRange {
                x: fx as i64,
                z: fz as i64,
            });
        }
        Ok(Self::new(fx as i64, fz as i64))
    }

    /// Converts to chunk coordinate given chunk size.
    pub fn to_chunk_coord(self, chunk_size: u32) -> TerrascopeResult<ChunkCoord> {
        validate_chunk_size(chunk_size)?;
        let size = i64::from(chunk_size);
        let (cx, cz) = (self.x.div_euclid(size), self.z.div_euclid(size));
        match (i32::try_from(cx), i32::try_from(cz)) {
            (Ok(x), Ok(z)) => Ok(ChunkCoord::new(x, z)),
            _ => Err(CoordError::OutOfRange { x: cx, z: cz }.into()),
        }
    }

    /// Converts to local coordinate within a chunk.
    pub fn to_local_coord(self, chunk_size: u32) -> TerrascopeResult<LocalCoord> {
        Ok(LocalCoord::new(
            world_to_local(self.x, chunk_size)?,
            world_to_local(self.z, chunk_size)?,
        ))
    }

    /// Chunk holding this cell at the standard [`CHUNK_SIZE`].
    pub fn chunk(self) -> Result<ChunkCoord, CoordError> {
        let size = i64::from(CHUNK_SIZE);
        let (cx, cz) = (self.x.div_euclid(size), self.z.div_euclid(size));
        match (i32::try_from(cx), i32::try_from(cz)) {
            (Ok(x), Ok(z)) => Ok(ChunkCoord::new(x, z)),
            _ => Err(CoordError::OutOfRange { x: cx, z: cz }),
        }
    }

    /// Offset of this cell inside its chunk at the standard [`CHUNK_SIZE`].
    #[must_use]
    pub const fn local(self) -> LocalCoord {
        let size = CHUNK_SIZE as i64;
        LocalCoord {
            x: self.x.rem_euclid(size) as u16,
            z: self.z.rem_euclid(size) as u16,
        }
    }
}

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// X coordinate in chunk space
    pub x: i32,
    /// Z coordinate in chunk space
    pub z: i32,
}

impl ChunkCoord {
    /// The chunk at the world origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a new chunk coordinate.
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Converts to world coordinate (minimum corner of chunk).
    #[must_use]
    pub const fn to_world_coord(self, chunk_size: u32) -> WorldCoord {
        WorldCoord {
            x: (self.x as i64) * (chunk_size as i64),
            z: (self.z as i64) * (chunk_size as i64),
        }
    }

    /// Minimum corner of this chunk at the standard [`CHUNK_SIZE`].
    #[must_use]
    pub const fn origin(self) -> WorldCoord {
        self.to_world_coord(CHUNK_SIZE)
    }

    /// Returns the chunk `(dx, dz)` away, failing instead of wrapping.
    pub fn offset(self, dx: i64, dz: i64) -> Result<Self, CoordError> {
        let x = i64::from(self.x).saturating_add(dx);
        let z = i64::from(self.z).saturating_add(dz);
        match (i32::try_from(x), i32::try_from(z)) {
            (Ok(x), Ok(z)) => Ok(Self::new(x, z)),
            _ => Err(CoordError::OutOfRange { x, z }),
        }
    }

    /// Chebyshev (chessboard) distance in chunks.
    #[must_use]
    pub const fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dz = self.z.abs_diff(other.z);
        if dx > dz {
            dx
        } else {
            dz
        }
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Local coordinate within a chunk (0 to chunk_size-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalCoord {
    /// X coordinate within chunk
    pub x: u16,
    /// Z coordinate within chunk
    pub z: u16,
}

impl LocalCoord {
    /// Creates a new local coordinate.
    #[must_use]
    pub const fn new(x: u16, z: u16) -> Self {
        Self { x, z }
    }

    /// Converts to linear index for array access (row-major in z).
    #[must_use]
    pub const fn to_index(self, chunk_size: u32) -> usize {
        (self.z as usize) * (chunk_size as usize) + (self.x as usize)
    }

    /// Creates from linear index.
    #[must_use]
    pub const fn from_index(index: usize, chunk_size: u32) -> Self {
        let size = chunk_size as usize;
        Self {
            x: (index % size) as u16,
            z: (index / size) as u16,
        }
    }
}
