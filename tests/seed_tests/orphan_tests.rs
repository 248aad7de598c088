//! Orphan Distribution Tests
//!
//! Tests verify:
//! - Exact orphan counts for every count/anchor combination
//! - The even spread of the remainder
//! - Orphan entries' attributes and anchor back-writes
//! - Empty-universe and zero-count handling

use std::collections::BTreeSet;

use vaultsim::seed::{distribute_orphans, generate_blocks, SeedProfile, SimRng};
use vaultsim::universe::{BlockUniverse, Namespace};
use vaultsim::{BlockType, SimError};

// =============================================================================
// Helper Functions
// =============================================================================

fn seeded_universe(blocks: usize) -> (BlockUniverse, SimRng, SeedProfile) {
    let mut universe = BlockUniverse::new("proj", "vault");
    let mut rng = SimRng::seeded(1234);
    let profile = SeedProfile::default().with_base_time(1_700_000_000);
    generate_blocks(&mut universe, blocks, &mut rng, &profile).unwrap();
    (universe, rng, profile)
}

// =============================================================================
// Exactness Tests
// =============================================================================

#[test]
fn test_twenty_orphans_over_twenty_blocks() {
    let (mut universe, mut rng, profile) = seeded_universe(20);

    let report = distribute_orphans(&mut universe, 20, &mut rng, &profile).unwrap();

    assert_eq!(report.created, 20);
    assert_eq!(report.anchors_with(1), 20);
    assert_eq!(universe.orphan_count(), 20);
    assert_eq!(universe.len(Namespace::Storage), 40);
}

#[test]
fn test_fifteen_orphans_over_twenty_blocks() {
    let (mut universe, mut rng, profile) = seeded_universe(20);

    let report = distribute_orphans(&mut universe, 15, &mut rng, &profile).unwrap();

    assert_eq!(report.created, 15);
    assert_eq!(report.anchors_with(1), 15);
    assert_eq!(report.anchors_with(0), 5);
    assert_eq!(universe.orphan_count(), 15);
}

#[test]
fn test_thirty_orphans_over_twenty_blocks() {
    let (mut universe, mut rng, profile) = seeded_universe(20);

    let report = distribute_orphans(&mut universe, 30, &mut rng, &profile).unwrap();

    assert_eq!(report.created, 30);
    assert_eq!(report.anchors_with(2), 10);
    assert_eq!(report.anchors_with(1), 10);
    assert_eq!(universe.orphan_count(), 30);
}

#[test]
fn test_exact_count_sweep() {
    for blocks in [1, 3, 7, 20] {
        for count in 0..=45 {
            let (mut universe, mut rng, profile) = seeded_universe(blocks);

            let report = distribute_orphans(&mut universe, count, &mut rng, &profile).unwrap();

            assert_eq!(report.created, count, "blocks={} count={}", blocks, count);
            assert_eq!(universe.orphan_count(), count);
            assert_eq!(universe.len(Namespace::Storage), blocks + count);

            let max = report.per_anchor.values().max().copied().unwrap_or(0);
            let min = report.per_anchor.values().min().copied().unwrap_or(0);
            assert!(max - min <= 1, "uneven spread: min={} max={}", min, max);
        }
    }
}

#[test]
fn test_remainder_goes_to_first_anchors_in_key_order() {
    let (mut universe, mut rng, profile) = seeded_universe(5);

    let report = distribute_orphans(&mut universe, 7, &mut rng, &profile).unwrap();

    let counts: Vec<usize> = report.per_anchor.values().copied().collect();
    assert_eq!(counts, vec![2, 2, 1, 1, 1]);
}

// =============================================================================
// Orphan Entry Tests
// =============================================================================

#[test]
fn test_orphan_entries_copy_anchor_payload() {
    let (mut universe, mut rng, profile) = seeded_universe(4);
    let before: BTreeSet<String> = universe
        .sorted_ids(Namespace::Storage)
        .into_iter()
        .map(str::to_string)
        .collect();

    distribute_orphans(&mut universe, 4, &mut rng, &profile).unwrap();

    for block in universe.blocks(Namespace::Storage) {
        let storage_id = block.storage_id.clone().unwrap();
        if before.contains(&storage_id) {
            continue;
        }

        assert!(block.block_orphaned);
        assert_eq!(block.block_id, None);
        assert_eq!(block.block_type, BlockType::Storage);
        assert!(block.ref_count <= 4);
        assert!(block.ref_modified <= 1_700_000_000);

        let (anchor_id, suffix) = storage_id.split_once('_').unwrap();
        assert_eq!(suffix.len(), 36);
        let anchor = universe.get(Namespace::Metadata, anchor_id).unwrap();
        assert_eq!(anchor.data, block.data);
        assert_eq!(anchor.block_size, block.block_size);
    }
}

#[test]
fn test_anchor_points_at_latest_orphan() {
    let (mut universe, mut rng, profile) = seeded_universe(2);

    distribute_orphans(&mut universe, 4, &mut rng, &profile).unwrap();

    for block_id in universe.sorted_ids(Namespace::Metadata) {
        let anchor = universe.get(Namespace::Metadata, block_id).unwrap();
        let storage_id = anchor.storage_id.as_deref().unwrap();
        let stored = universe.get(Namespace::Storage, storage_id).unwrap();
        assert!(stored.block_orphaned);
        assert!(storage_id.starts_with(block_id));
    }
    universe.check_invariants().unwrap();
}

// =============================================================================
// Edge Case Tests
// =============================================================================

#[test]
fn test_empty_universe_is_invalid_state() {
    let mut universe = BlockUniverse::new("proj", "vault");
    let mut rng = SimRng::seeded(1);

    let result = distribute_orphans(&mut universe, 5, &mut rng, &SeedProfile::default());

    assert!(matches!(result, Err(SimError::InvalidState(_))));
    assert!(universe.is_empty());
}

#[test]
fn test_zero_count_is_noop() {
    let (mut universe, mut rng, profile) = seeded_universe(3);

    let report = distribute_orphans(&mut universe, 0, &mut rng, &profile).unwrap();

    assert_eq!(report.created, 0);
    assert_eq!(report.anchors_with(0), 3);
    assert_eq!(universe.len(Namespace::Storage), 3);
}

#[test]
fn test_zero_count_on_empty_universe_is_noop() {
    let mut universe = BlockUniverse::new("proj", "vault");
    let mut rng = SimRng::seeded(1);

    let report = distribute_orphans(&mut universe, 0, &mut rng, &SeedProfile::default()).unwrap();
    assert_eq!(report.created, 0);
}
