use proptest::prelude::*;
use terrascope_common::{ChunkCoord, WorldCoord};
use terrascope_worldgen::prelude::*;

fn unit() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

fn elevation() -> impl Strategy<Value = f64> {
    ELEVATION_MIN..=ELEVATION_MAX
}

proptest! {
    // Ocean tags appear exactly below sea level
    #[test]
    fn ocean_iff_below_sea_level(e in elevation(), t in unit(), r in unit()) {
        let biome = BiomeClassifier::default().classify(e, t, r);
        prop_assert_eq!(biome.is_ocean(), e < SEA_LEVEL);
        prop_assert_ne!(biome, Biome::Beach);
    }

    // Lowland tags are driven by climate only, mountains by altitude only
    #[test]
    fn bands_are_disjoint(e in elevation(), t in unit(), r in unit()) {
        let biome = BiomeClassifier::default().classify(e, t, r);
        let mountain = matches!(biome, Biome::Mountains | Biome::SnowyPeaks);
        prop_assert_eq!(mountain, e >= ELEVATION_MAX / 1.4);
        if biome == Biome::DeepOcean {
            prop_assert!(e < SEA_LEVEL / 2.0);
        }
    }

    // Arbitrary floats never panic
    #[test]
    fn classify_is_total(e in any::<f64>(), t in any::<f64>(), r in any::<f64>()) {
        let biome = BiomeClassifier::default().classify(e, t, r);
        prop_assert!(Biome::ALL.contains(&biome));
    }

    // Chunk cells agree with single-cell sampling
    #[test]
    fn chunk_matches_sample_cell(
        seed in any::<u32>(),
        cx in -100_000i32..=100_000,
        cz in -100_000i32..=100_000,
        index in 0usize..CELLS_PER_CHUNK,
    ) {
        let gen = TerrainGenerator::new(seed, GenerationParams::default()).expect("defaults");
        let chunk = gen.generate(ChunkCoord::new(cx, cz));
        let cell = chunk.cells()[index];
        let world: WorldCoord = cell.world();
        prop_assert_eq!(world.chunk().ok(), Some(chunk.coord()));
        prop_assert_eq!(cell, gen.sample_cell(world));
    }
}
