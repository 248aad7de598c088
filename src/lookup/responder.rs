//! Lookup responder

use tracing::debug;

use crate::universe::{BlockUniverse, Namespace};

use super::{BlockAttributes, LookupOutcome, NotFoundReason};

/// Look up `id` in one namespace of `universe`, scoped to `vault_id`
///
/// The vault is checked first, so a foreign vault always yields
/// `InvalidVaultId` whether or not the id exists.
pub fn lookup(universe: &BlockUniverse, namespace: Namespace, vault_id: &str, id: &str) -> LookupOutcome {
    if vault_id != universe.vault_id() {
        debug!(%namespace, vault_id, id, "Lookup against foreign vault");
        return LookupOutcome::NotFound(NotFoundReason::InvalidVaultId);
    }

    let Some(block) = universe.get(namespace, id) else {
        debug!(%namespace, id, "Lookup miss");
        return LookupOutcome::NotFound(NotFoundReason::InvalidBlockId);
    };

    LookupOutcome::Found(BlockAttributes {
        ref_count: block.ref_count,
        ref_modified: block.ref_modified,
        storage_id: block.storage_id.clone(),
        block_id: block.block_id.clone(),
        block_size: block.block_size,
        block_orphaned: match namespace {
            Namespace::Metadata => None,
            Namespace::Storage => Some(block.block_orphaned),
        },
    })
}
