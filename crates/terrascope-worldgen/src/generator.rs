//! Procedural terrain generation.
//!
//! Every cell is a pure function of its world coordinate, the seed and the
//! generation parameters, so a chunk can be regenerated at any time and
//! come out bit-identical.

use terrascope_common::{ChunkCoord, ConfigError, LocalCoord, WorldCoord, CHUNK_SIZE};
use tracing::info;

use crate::biome::{Biome, BiomeClassifier};
use crate::cell::Cell;
use crate::chunk::{Chunk, CELLS_PER_CHUNK};
use crate::field::NoiseField;
use crate::params::{
    ChannelOffset, GenerationMode, GenerationParams, ELEVATION_OFFSET, RAINFALL_OFFSET,
    TEMPERATURE_OFFSET,
};

/// Climate used for every cell in flat mode.
const FLAT_CLIMATE: f64 = 0.5;

/// Offset of the unit circle sampled for the island's edge wobble.
const EDGE_NOISE_OFFSET: f64 = 1000.0;

/// Builds chunks from a seeded noise field and a fixed parameter set.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    params: GenerationParams,
    classifier: BiomeClassifier,
    field: NoiseField,
}

impl TerrainGenerator {
    /// Creates a generator after validating `params`.
    pub fn new(seed: u32, params: GenerationParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let field = NoiseField::with_detail(seed, params.octaves, params.persistence)?;
        info!(
            "TerrainGenerator initialized: seed={}, mode={}, scale={}",
            seed, params.mode, params.noise_scale
        );
        Ok(Self {
            classifier: BiomeClassifier::from_params(&params),
            params,
            field,
        })
    }

    /// Returns the world seed.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.field.seed()
    }

    /// Returns the generation mode.
    #[must_use]
    pub const fn mode(&self) -> GenerationMode {
        self.params.mode
    }

    /// Returns the generation parameters.
    #[must_use]
    pub const fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Returns the biome classifier.
    #[must_use]
    pub const fn classifier(&self) -> &BiomeClassifier {
        &self.classifier
    }

    /// Switches to a new seed. Chunks built earlier keep their data.
    pub fn reseed(&mut self, seed: u32) {
        info!("TerrainGenerator reseeded: {} -> {}", self.field.seed(), seed);
        self.field.reseed(seed);
    }

    /// Switches the generation mode.
    pub fn set_mode(&mut self, mode: GenerationMode) {
        self.params.mode = mode;
    }

    /// Generates the chunk at `coord`.
    #[must_use]
    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        let origin = coord.origin();
        let mut cells = Vec::with_capacity(CELLS_PER_CHUNK);

        for index in 0..CELLS_PER_CHUNK {
            let local = LocalCoord::from_index(index, CHUNK_SIZE);
            let world = WorldCoord::new(
                origin.x + i64::from(local.x),
                origin.z + i64::from(local.z),
            );
            cells.push(self.sample_cell(world));
        }

        Chunk::from_cells(coord, self.seed(), self.params.mode, cells)
    }

    /// Generates a single cell at world coordinates.
    #[must_use]
    pub fn sample_cell(&self, world: WorldCoord) -> Cell {
        let (wx, wz) = (world.x as f64, world.z as f64);

        match self.params.mode {
            GenerationMode::Flat => Cell::new(
                world,
                self.params.sea_level,
                FLAT_CLIMATE,
                FLAT_CLIMATE,
                Biome::Plains,
            ),
            GenerationMode::Default => {
                let elevation = self.elevation(wx, wz);
                self.classified(world, elevation, wx, wz)
            },
            GenerationMode::Zenith => {
                let elevation = self.island_elevation(wx, wz);
                self.classified(world, elevation, wx, wz)
            },
        }
    }

    fn classified(&self, world: WorldCoord, elevation: f64, wx: f64, wz: f64) -> Cell {
        let climate_scale = self.params.climate_scale();
        let temperature = self.channel(wx, wz, TEMPERATURE_OFFSET, climate_scale);
        let rainfall = self.channel(wx, wz, RAINFALL_OFFSET, climate_scale);
        let biome = self.classifier.classify(elevation, temperature, rainfall);
        Cell::new(world, elevation, temperature, rainfall, biome)
    }

    fn channel(&self, wx: f64, wz: f64, offset: ChannelOffset, scale: f64) -> f64 {
        self.field
            .sample((wx + offset.x) * scale, (wz + offset.z) * scale)
    }

    /// Elevation sample remapped to `[elevation_min, elevation_max]`.
    fn elevation(&self, wx: f64, wz: f64) -> f64 {
        let n = self.channel(wx, wz, ELEVATION_OFFSET, self.params.noise_scale);
        lerp(self.params.elevation_min, self.params.elevation_max, n)
    }

    /// Island interior sits at sea level and blends down to a noisy ocean
    /// floor over a quarter of the (wobbled) radius. Past three radii the
    /// floor drops to the minimum elevation.
    fn island_elevation(&self, wx: f64, wz: f64) -> f64 {
        let p = &self.params;
        let ocean_floor = self.ocean_floor(wx, wz);
        let radius = self.island_radius(wz.atan2(wx));
        let from_edge = wx.hypot(wz) - radius;
        let blend = radius / 4.0;
        let clamped = from_edge.clamp(0.0, blend);

        if clamped < blend {
            p.sea_level - (p.sea_level - ocean_floor) * (clamped / blend)
        } else if from_edge - blend < radius * 3.0 {
            ocean_floor
        } else {
            p.elevation_min
        }
    }

    /// Island ocean floor, between the minimum elevation and half the sea level.
    fn ocean_floor(&self, wx: f64, wz: f64) -> f64 {
        let p = &self.params;
        let n = self.channel(wx, wz, ELEVATION_OFFSET, p.noise_scale);
        lerp(p.elevation_min, p.sea_level / 2.0, n)
    }

    /// Island radius along `angle`, within a quarter radius of the nominal one.
    fn island_radius(&self, angle: f64) -> f64 {
        let edge = self.field.sample(
            angle.cos() + EDGE_NOISE_OFFSET,
            angle.sin() + EDGE_NOISE_OFFSET,
        );
        let r = self.params.island_radius;
        r + (2.0 * edge - 1.0) * r / 4.0
    }
}

fn lerp(min: f64, max: f64, t: f64) -> f64 {
    min + (max - min) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ELEVATION_MAX, ELEVATION_MIN, SEA_LEVEL};

    fn generator(seed: u32, mode: GenerationMode) -> TerrainGenerator {
        TerrainGenerator::new(seed, GenerationParams::with_mode(mode)).expect("valid params")
    }

    #[test]
    fn test_generator_creation() {
        let gen = generator(42, GenerationMode::Default);
        assert_eq!(gen.seed(), 42);
        assert_eq!(gen.mode(), GenerationMode::Default);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = GenerationParams {
            noise_scale: f64::NAN,
            ..GenerationParams::default()
        };
        assert!(TerrainGenerator::new(1, params).is_err());
    }

    #[test]
    fn test_chunk_deterministic() {
        let a = generator(42, GenerationMode::Default);
        let b = generator(42, GenerationMode::Default);
        let coord = ChunkCoord::new(-3, 7);
        assert_eq!(a.generate(coord), b.generate(coord));
    }

    #[test]
    fn test_different_chunks_differ() {
        let gen = generator(42, GenerationMode::Default);
        let c1 = gen.generate(ChunkCoord::new(0, 0));
        let c2 = gen.generate(ChunkCoord::new(40, 40));
        assert_ne!(c1.cells(), c2.cells());
    }

    #[test]
    fn test_different_seeds_different_terrain() {
        let c1 = generator(42, GenerationMode::Default).generate(ChunkCoord::new(0, 0));
        let c2 = generator(999, GenerationMode::Default).generate(ChunkCoord::new(0, 0));
        assert_ne!(c1.cells(), c2.cells());
    }

    #[test]
    fn test_chunk_cells_cover_world_square() {
        let gen = generator(7, GenerationMode::Default);
        let chunk = gen.generate(ChunkCoord::new(-1, 2));
        assert_eq!(chunk.cells().len(), CELLS_PER_CHUNK);
        assert_eq!(chunk.origin(), WorldCoord::new(-16, 32));

        let corner = chunk.cell(LocalCoord::new(15, 0)).expect("in chunk");
        assert_eq!(corner.world(), WorldCoord::new(-1, 32));
        assert_eq!(*corner, gen.sample_cell(WorldCoord::new(-1, 32)));

        assert!(chunk.cell_at_world(WorldCoord::new(-16, 47)).is_some());
        assert!(chunk.cell_at_world(WorldCoord::new(0, 32)).is_none());
        assert!(chunk.cell(LocalCoord::new(16, 0)).is_none());
    }

    #[test]
    fn test_default_ranges() {
        let gen = generator(3, GenerationMode::Default);
        let classifier = BiomeClassifier::default();
        for coord in [ChunkCoord::new(0, 0), ChunkCoord::new(-9, 4)] {
            for cell in gen.generate(coord).cells() {
                assert!((ELEVATION_MIN..=ELEVATION_MAX).contains(&cell.elevation()));
                assert!((0.0..=1.0).contains(&cell.temperature()));
                assert!((0.0..=1.0).contains(&cell.rainfall()));
                assert_eq!(
                    cell.biome(),
                    classifier.classify(cell.elevation(), cell.temperature(), cell.rainfall())
                );
            }
        }
    }

    #[test]
    fn test_flat_mode_uniform_plains() {
        let gen = generator(5, GenerationMode::Flat);
        for coord in [ChunkCoord::new(0, 0), ChunkCoord::new(123, -456)] {
            let chunk = gen.generate(coord);
            assert_eq!(chunk.mode(), GenerationMode::Flat);
            for cell in chunk.cells() {
                assert_eq!(cell.elevation(), SEA_LEVEL);
                assert_eq!(cell.temperature(), 0.5);
                assert_eq!(cell.rainfall(), 0.5);
                assert_eq!(cell.biome(), Biome::Plains);
            }
        }
    }

    #[test]
    fn test_zenith_island_shape() {
        let gen = generator(11, GenerationMode::Zenith);

        let center = gen.sample_cell(WorldCoord::new(0, 0));
        assert_eq!(center.elevation(), SEA_LEVEL);
        assert!(!center.biome().is_ocean());

        // Between the blend ring and three radii out: ocean floor only.
        let ring = gen.sample_cell(WorldCoord::new(1200, 0));
        assert!(ring.elevation() <= SEA_LEVEL / 2.0);
        assert!(ring.biome().is_ocean());

        let far = gen.sample_cell(WorldCoord::new(0, -10_000));
        assert_eq!(far.elevation(), ELEVATION_MIN);
        assert_eq!(far.biome(), Biome::DeepOcean);
    }

    #[test]
    fn test_zenith_shore_blends_down_to_floor() {
        let gen = generator(11, GenerationMode::Zenith);
        // Walk east along z = 0, where the edge angle is exactly zero.
        let radius = gen.island_radius(0.0);
        let blend = radius / 4.0;
        let start = radius.ceil() as i64;
        let end = (radius + blend).floor() as i64;
        assert!(end - start > 50);

        let mut last_fraction = 0.0;
        for x in start..=end {
            let elevation = gen.sample_cell(WorldCoord::new(x, 0)).elevation();
            let floor = gen.ocean_floor(x as f64, 0.0);
            assert!(
                (floor..=SEA_LEVEL).contains(&elevation),
                "elevation {elevation} at x={x} outside [{floor}, {SEA_LEVEL}]"
            );

            // Share of the drop from sea level to the floor already taken.
            let fraction = (SEA_LEVEL - elevation) / (SEA_LEVEL - floor);
            let expected = ((x as f64 - radius) / blend).min(1.0);
            assert!((fraction - expected).abs() < 1e-9, "x={x}");
            assert!(fraction >= last_fraction);
            last_fraction = fraction;
        }
    }

    #[test]
    fn test_zenith_floor_drops_past_three_radii() {
        let gen = generator(11, GenerationMode::Zenith);
        let radius = gen.island_radius(0.0);
        // Floor holds while distance - radius - blend < 3 * radius.
        let cutover = 4.0 * radius + radius / 4.0;

        let inside = cutover.floor() as i64 - 1;
        let cell = gen.sample_cell(WorldCoord::new(inside, 0));
        assert_eq!(cell.elevation(), gen.ocean_floor(inside as f64, 0.0));

        let outside = cutover.ceil() as i64 + 1;
        let cell = gen.sample_cell(WorldCoord::new(outside, 0));
        assert_eq!(cell.elevation(), ELEVATION_MIN);
        assert_eq!(cell.biome(), Biome::DeepOcean);
    }

    #[test]
    fn test_reseed_and_mode_switch() {
        let mut gen = generator(1, GenerationMode::Default);
        let before = gen.generate(ChunkCoord::new(2, 2));
        gen.reseed(2);
        assert_eq!(gen.seed(), 2);
        let after = gen.generate(ChunkCoord::new(2, 2));
        assert_eq!(before.seed(), 1);
        assert_eq!(after.seed(), 2);
        assert_ne!(before.cells(), after.cells());

        gen.set_mode(GenerationMode::Flat);
        assert_eq!(gen.generate(ChunkCoord::new(2, 2)).mode(), GenerationMode::Flat);
    }
}
