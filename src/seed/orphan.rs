//! Orphan distribution
//!
//! Adds storage blocks that no logical block references, spread as evenly as
//! integer arithmetic allows over the existing logical blocks:
//!
//! ```text
//! 20 blocks + 20 orphans -> 1 each
//! 20 blocks + 15 orphans -> 15 get 1, 5 get 0
//! 20 blocks + 30 orphans -> 10 get 2, 10 get 1
//! ```
//!
//! Each orphan copies its anchor's payload. The anchor's `storage_id` is
//! moved to the newest orphan (latest materialization wins).

use std::collections::BTreeMap;

use tracing::{info, trace};

use crate::block::Block;
use crate::error::{Result, SimError};
use crate::universe::{BlockUniverse, Namespace};

use super::{storage_id_for, SeedProfile, SimRng};

/// What a distribution run created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrphanReport {
    /// Total orphaned storage blocks added
    pub created: usize,

    /// Orphans per anchor block id (every logical block is listed, zeros included)
    pub per_anchor: BTreeMap<String, usize>,
}

impl OrphanReport {
    /// Number of anchors that received exactly `n` orphans
    pub fn anchors_with(&self, n: usize) -> usize {
        self.per_anchor.values().filter(|&&c| c == n).count()
    }
}

/// Add exactly `count` orphaned storage blocks to `universe`
///
/// Each logical block (in key order) receives `count / L` orphans, and the
/// first `count % L` of them one more, where `L` is the number of logical
/// blocks. `count == 0` is a no-op; otherwise an empty universe is an
/// `InvalidState` error.
pub fn distribute_orphans(
    universe: &mut BlockUniverse,
    count: usize,
    rng: &mut SimRng,
    profile: &SeedProfile,
) -> Result<OrphanReport> {
    let anchors = universe.logical_ids();
    let mut report = OrphanReport {
        created: 0,
        per_anchor: anchors.iter().map(|id| (id.clone(), 0)).collect(),
    };

    if count == 0 {
        return Ok(report);
    }

    if anchors.is_empty() {
        return Err(SimError::InvalidState(format!(
            "cannot distribute {} orphaned blocks: universe has no logical blocks",
            count
        )));
    }

    let base = count / anchors.len();
    let mut remainder = count % anchors.len();

    'anchors: for block_id in &anchors {
        let mut quota = base;
        if remainder > 0 {
            quota += 1;
            remainder -= 1;
        }

        for _ in 0..quota {
            if report.created == count {
                break 'anchors;
            }
            make_orphan(universe, block_id, rng, profile)?;
            report.created += 1;
            *report.per_anchor.entry(block_id.clone()).or_default() += 1;
        }
    }

    info!(
        created = report.created,
        anchors = anchors.len(),
        base,
        storage = universe.len(Namespace::Storage),
        "Distributed orphaned blocks"
    );

    Ok(report)
}

/// Materialize one orphan from `block_id` and point the anchor at it
fn make_orphan(
    universe: &mut BlockUniverse,
    block_id: &str,
    rng: &mut SimRng,
    profile: &SeedProfile,
) -> Result<()> {
    let storage_id = storage_id_for(block_id, rng);

    let orphan = {
        let anchor = universe.get(Namespace::Metadata, block_id).ok_or_else(|| {
            SimError::InvalidState(format!("anchor block vanished: {}", block_id))
        })?;
        Block::storage_from(anchor, storage_id.clone(), true)
    }
    .with_ref_count(profile.ref_count(rng))
    .with_ref_modified(profile.ref_modified(rng));

    universe.insert_storage(orphan)?;
    universe.set_storage_id(block_id, storage_id.as_str())?;

    trace!(block_id, storage_id = storage_id.as_str(), "Created orphaned block");
    Ok(())
}
