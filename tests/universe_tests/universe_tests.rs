//! BlockUniverse Tests
//!
//! Tests verify:
//! - Insertion into both namespaces
//! - Duplicate and wrong-view rejection
//! - Sorted id order
//! - Cross-map invariant checking

use bytes::Bytes;
use vaultsim::block::{Block, BlockType};
use vaultsim::listing::PageFraction;
use vaultsim::universe::{BlockUniverse, Namespace};
use vaultsim::SimError;

// =============================================================================
// Helper Functions
// =============================================================================

fn metadata_block(id: &str) -> Block {
    Block::metadata("proj", "vault", id, Bytes::from(id.as_bytes().to_vec()))
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_universe_is_empty() {
    let universe = BlockUniverse::new("proj", "vault");

    assert!(universe.is_empty());
    assert_eq!(universe.len(Namespace::Metadata), 0);
    assert_eq!(universe.len(Namespace::Storage), 0);
    assert_eq!(universe.vault_id(), "vault");
    assert_eq!(universe.project_id(), "proj");
}

#[test]
fn test_insert_and_get_both_namespaces() {
    let mut universe = BlockUniverse::new("proj", "vault");
    let meta = metadata_block("b1");
    let storage = Block::storage_from(&meta, "b1_s", false);

    universe.insert_metadata(meta).unwrap();
    universe.insert_storage(storage).unwrap();
    universe.set_storage_id("b1", "b1_s").unwrap();

    let meta = universe.get(Namespace::Metadata, "b1").unwrap();
    assert_eq!(meta.storage_id.as_deref(), Some("b1_s"));
    assert_eq!(meta.block_type, BlockType::Metadata);

    let storage = universe.get(Namespace::Storage, "b1_s").unwrap();
    assert_eq!(storage.block_id.as_deref(), Some("b1"));
    assert!(!storage.block_orphaned);

    assert!(universe.contains(Namespace::Storage, "b1_s"));
    assert!(!universe.contains(Namespace::Metadata, "b1_s"));
    universe.check_invariants().unwrap();
}

#[test]
fn test_sorted_ids_are_ascending() {
    let mut universe = BlockUniverse::new("proj", "vault");
    for id in ["ccc", "aaa", "bbb"] {
        universe.insert_metadata(metadata_block(id)).unwrap();
    }

    assert_eq!(universe.sorted_ids(Namespace::Metadata), vec!["aaa", "bbb", "ccc"]);
}

#[test]
fn test_page_len_tracks_current_size() {
    let mut universe = BlockUniverse::new("proj", "vault");
    for i in 0..10 {
        universe.insert_metadata(metadata_block(&format!("id{}", i))).unwrap();
    }

    let fraction = PageFraction::new(3).unwrap();
    assert_eq!(universe.page_len(Namespace::Metadata, fraction), 3);
    assert_eq!(universe.page_len(Namespace::Storage, fraction), 0);
}

// =============================================================================
// Rejection Tests
// =============================================================================

#[test]
fn test_duplicate_block_id_rejected() {
    let mut universe = BlockUniverse::new("proj", "vault");
    universe.insert_metadata(metadata_block("dup")).unwrap();

    let result = universe.insert_metadata(metadata_block("dup"));
    assert!(matches!(result, Err(SimError::InvalidState(_))));
    assert_eq!(universe.len(Namespace::Metadata), 1);
}

#[test]
fn test_duplicate_storage_id_rejected() {
    let mut universe = BlockUniverse::new("proj", "vault");
    let meta = metadata_block("b1");

    universe.insert_storage(Block::storage_from(&meta, "s1", false)).unwrap();
    let result = universe.insert_storage(Block::storage_from(&meta, "s1", true));

    assert!(matches!(result, Err(SimError::InvalidState(_))));
}

fn paired(block_id: &str, storage_id: &str) -> (Block, Block) {
    let mut meta = metadata_block(block_id);
    meta.storage_id = Some(storage_id.to_string());
    let storage = Block::storage_from(&meta, storage_id, false);
    (meta, storage)
}

#[test]
fn test_insert_pair_storage_collision_leaves_universe_untouched() {
    let mut universe = BlockUniverse::new("proj", "vault");
    let (meta, storage) = paired("b0", "b0_s");
    universe.insert_pair(meta, storage).unwrap();

    let (meta, storage) = paired("b1", "b0_s");
    let result = universe.insert_pair(meta, storage);

    assert!(matches!(result, Err(SimError::InvalidState(_))));
    assert!(!universe.contains(Namespace::Metadata, "b1"));
    assert_eq!(universe.len(Namespace::Metadata), 1);
    assert_eq!(universe.len(Namespace::Storage), 1);
    universe.check_invariants().unwrap();
}

#[test]
fn test_insert_pair_block_id_collision_leaves_universe_untouched() {
    let mut universe = BlockUniverse::new("proj", "vault");
    let (meta, storage) = paired("b0", "b0_s");
    universe.insert_pair(meta, storage).unwrap();

    let (meta, storage) = paired("b0", "b0_t");
    let result = universe.insert_pair(meta, storage);

    assert!(matches!(result, Err(SimError::InvalidState(_))));
    assert!(!universe.contains(Namespace::Storage, "b0_t"));
    universe.check_invariants().unwrap();
}

#[test]
fn test_insert_pair_rejects_mismatched_storage_id() {
    let mut universe = BlockUniverse::new("proj", "vault");
    let (meta, _) = paired("b0", "b0_s");
    let storage = Block::storage_from(&meta, "other", false);

    assert!(matches!(
        universe.insert_pair(meta, storage),
        Err(SimError::InvalidState(_))
    ));
    assert!(universe.is_empty());
}

#[test]
fn test_wrong_view_rejected() {
    let mut universe = BlockUniverse::new("proj", "vault");
    let meta = metadata_block("b1");
    let storage = Block::storage_from(&meta, "s1", false);

    assert!(matches!(
        universe.insert_metadata(storage),
        Err(SimError::InvalidState(_))
    ));
    assert!(matches!(
        universe.insert_storage(meta),
        Err(SimError::InvalidState(_))
    ));
}

#[test]
fn test_set_storage_id_unknown_block() {
    let mut universe = BlockUniverse::new("proj", "vault");
    let result = universe.set_storage_id("missing", "s1");
    assert!(matches!(result, Err(SimError::InvalidState(_))));
}

// =============================================================================
// Invariant Tests
// =============================================================================

#[test]
fn test_invariants_detect_dangling_storage_id() {
    let mut universe = BlockUniverse::new("proj", "vault");
    universe.insert_metadata(metadata_block("b1")).unwrap();
    universe.set_storage_id("b1", "nowhere").unwrap();

    assert!(universe.check_invariants().is_err());
}

#[test]
fn test_invariants_detect_unflagged_orphan() {
    let mut universe = BlockUniverse::new("proj", "vault");
    let meta = metadata_block("b1");
    let mut storage = Block::storage_from(&meta, "s1", true);
    storage.block_orphaned = false;
    universe.insert_storage(storage).unwrap();

    assert!(universe.check_invariants().is_err());
}

#[test]
fn test_invariants_detect_foreign_storage_entry() {
    let mut universe = BlockUniverse::new("proj", "vault");
    let b1 = metadata_block("b1");
    let b2 = metadata_block("b2");
    universe.insert_storage(Block::storage_from(&b2, "s2", false)).unwrap();
    universe.insert_metadata(b1).unwrap();
    universe.insert_metadata(b2).unwrap();
    universe.set_storage_id("b1", "s2").unwrap();

    assert!(universe.check_invariants().is_err());
}
