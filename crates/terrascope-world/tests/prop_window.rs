use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use terrascope_common::ChunkCoord;
use terrascope_world::prelude::*;
use terrascope_worldgen::{GenerationMode, GenerationParams, TerrainGenerator};

fn flat_store() -> ChunkStore {
    let generator = TerrainGenerator::new(3, GenerationParams::with_mode(GenerationMode::Flat))
        .expect("valid params");
    ChunkStore::new(generator)
}

fn visible_coords(manager: &VisibleSetManager) -> BTreeSet<ChunkCoord> {
    manager.current_visible_chunks().map(|c| c.coord()).collect()
}

fn center() -> impl Strategy<Value = ChunkCoord> {
    (-15i32..=15, -15i32..=15).prop_map(|(x, z)| ChunkCoord::new(x, z))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // The window is an exact square around the center after every move
    #[test]
    fn window_stays_square(
        radius in 1u32..=4,
        start in center(),
        moves in prop::collection::vec(center(), 1..12),
    ) {
        let mut store = flat_store();
        let mut manager = VisibleSetManager::new(radius).expect("valid radius");
        manager.initialize(start, &mut store).expect("in range");

        for target in moves {
            manager.on_center_moved(target, &mut store).expect("in range");
            prop_assert_eq!(manager.center(), Some(target));
            prop_assert!(manager.is_consistent());
            let required: BTreeSet<_> = manager.required_chunk_positions().collect();
            prop_assert_eq!(visible_coords(&manager), required);
        }
    }

    // Incremental migration lands on the same set as a fresh build,
    // and shares the same chunk instances with the store
    #[test]
    fn incremental_matches_fresh_initialize(
        radius in 1u32..=3,
        start in center(),
        moves in prop::collection::vec(center(), 1..8),
    ) {
        let mut store = flat_store();
        let mut walked = VisibleSetManager::new(radius).expect("valid radius");
        walked.initialize(start, &mut store).expect("in range");
        for &target in &moves {
            walked.on_center_moved(target, &mut store).expect("in range");
        }

        let last = *moves.last().expect("non-empty");
        let generated = store.stats().generated;
        let mut fresh = VisibleSetManager::new(radius).expect("valid radius");
        fresh.initialize(last, &mut store).expect("in range");

        prop_assert_eq!(visible_coords(&walked), visible_coords(&fresh));
        prop_assert_eq!(store.stats().generated, generated);
        for chunk in walked.current_visible_chunks() {
            let other = fresh.get(chunk.coord()).expect("same window");
            prop_assert!(Arc::ptr_eq(chunk, other));
        }
    }

    // Each unit step touches exactly one edge of the window
    #[test]
    fn update_counts_follow_steps(
        radius in 1u32..=4,
        dx in -10i32..=10,
        dz in -10i32..=10,
    ) {
        let mut store = flat_store();
        let mut manager = VisibleSetManager::new(radius).expect("valid radius");
        manager.initialize(ChunkCoord::ORIGIN, &mut store).expect("in range");

        let update = manager
            .on_center_moved(ChunkCoord::new(dx, dz), &mut store)
            .expect("in range");
        let steps = u64::from(dx.unsigned_abs() + dz.unsigned_abs());
        let side = manager.side() as usize;
        prop_assert_eq!(update.steps, steps);
        prop_assert_eq!(update.admitted, steps as usize * side);
        prop_assert_eq!(update.evicted, steps as usize * side);
        prop_assert!(!update.reinitialized);
    }

    // Repeated lookups never regenerate
    #[test]
    fn store_lookups_are_idempotent(coords in prop::collection::vec(center(), 1..30)) {
        let mut store = flat_store();
        for &coord in &coords {
            let first = store.get_or_generate(coord);
            let second = store.get_or_generate(coord);
            prop_assert!(Arc::ptr_eq(&first, &second));
        }
        let distinct: BTreeSet<_> = coords.iter().copied().collect();
        prop_assert_eq!(store.len(), distinct.len());
        prop_assert_eq!(store.stats().generated, distinct.len() as u64);
    }
}
