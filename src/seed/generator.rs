//! Initial universe generation
//!
//! Every logical block is materialized once: it gets a storage block under
//! a fresh storage id, and the metadata block records that id.

use tracing::{debug, info};

use crate::block::{Block, SeedBlock};
use crate::error::Result;
use crate::universe::{BlockUniverse, Namespace};

use super::{SeedProfile, SimRng};

/// Length of synthetic block ids (hex characters)
pub const BLOCK_ID_LEN: usize = 40;

/// Fresh storage id for a materialization of `block_id`
///
/// Format: `{block_id}_{uuid}`.
pub fn storage_id_for(block_id: &str, rng: &mut SimRng) -> String {
    format!("{}_{}", block_id, rng.uuid())
}

/// Make `count` logical blocks with random ids and payloads
///
/// Ids are random hex strings; they are not derived from the payload.
pub fn synthetic_blocks(rng: &mut SimRng, count: usize, profile: &SeedProfile) -> Vec<SeedBlock> {
    (0..count)
        .map(|_| {
            let block_id = rng.hex_id(BLOCK_ID_LEN);
            let size = rng.range_inclusive(profile.block_size_range.clone());
            SeedBlock::new(block_id, rng.payload(size))
        })
        .collect()
}

/// Insert caller-supplied logical blocks, each with a paired storage block
///
/// Returns the number of logical blocks added.
pub fn seed_blocks<I>(
    universe: &mut BlockUniverse,
    blocks: I,
    rng: &mut SimRng,
    profile: &SeedProfile,
) -> Result<usize>
where
    I: IntoIterator<Item = SeedBlock>,
{
    let mut added = 0;

    for seed in blocks {
        let storage_id = storage_id_for(&seed.block_id, rng);
        let mut metadata = Block::metadata(
            universe.project_id(),
            universe.vault_id(),
            seed.block_id,
            seed.data,
        )
        .with_ref_count(profile.ref_count(rng))
        .with_ref_modified(profile.ref_modified(rng));

        let storage = Block::storage_from(&metadata, storage_id.clone(), false)
            .with_ref_count(profile.ref_count(rng))
            .with_ref_modified(profile.ref_modified(rng));

        metadata.storage_id = Some(storage_id);

        universe.insert_pair(metadata, storage)?;
        added += 1;
    }

    debug!(
        added,
        metadata = universe.len(Namespace::Metadata),
        storage = universe.len(Namespace::Storage),
        "Seeded logical blocks"
    );

    Ok(added)
}

/// Generate `count` synthetic logical blocks and their storage blocks
pub fn generate_blocks(
    universe: &mut BlockUniverse,
    count: usize,
    rng: &mut SimRng,
    profile: &SeedProfile,
) -> Result<usize> {
    let blocks = synthetic_blocks(rng, count, profile);
    let added = seed_blocks(universe, blocks, rng, profile)?;
    info!(count = added, vault = universe.vault_id(), "Generated blocks");
    Ok(added)
}
