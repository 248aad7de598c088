//! BlockUniverse implementation
//!
//! Two ordered maps plus the vault scope they belong to.

use std::collections::BTreeMap;

use crate::block::{Block, BlockType};
use crate::error::{Result, SimError};
use crate::listing::PageFraction;

use super::Namespace;

/// In-memory universe of metadata and storage blocks for one vault
///
/// Seeding methods take `&mut self`; everything else is a read. Callers
/// must finish seeding before issuing listings or lookups.
#[derive(Debug, Clone)]
pub struct BlockUniverse {
    project_id: String,
    vault_id: String,

    /// Logical view: block_id -> Block
    metadata: BTreeMap<String, Block>,

    /// Physical view: storage_id -> Block
    storage: BTreeMap<String, Block>,
}

impl BlockUniverse {
    /// Create an empty universe scoped to a project and vault
    pub fn new(project_id: impl Into<String>, vault_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            vault_id: vault_id.into(),
            metadata: BTreeMap::new(),
            storage: BTreeMap::new(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn vault_id(&self) -> &str {
        &self.vault_id
    }

    /// Get a block from one namespace
    pub fn get(&self, namespace: Namespace, id: &str) -> Option<&Block> {
        self.map(namespace).get(id)
    }

    pub fn contains(&self, namespace: Namespace, id: &str) -> bool {
        self.map(namespace).contains_key(id)
    }

    /// Number of entries in one namespace
    pub fn len(&self, namespace: Namespace) -> usize {
        self.map(namespace).len()
    }

    /// True when neither namespace holds anything
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty() && self.storage.is_empty()
    }

    /// All keys of one namespace, ascending
    pub fn sorted_ids(&self, namespace: Namespace) -> Vec<&str> {
        self.map(namespace).keys().map(String::as_str).collect()
    }

    /// Iterate the blocks of one namespace in key order
    pub fn blocks(&self, namespace: Namespace) -> impl Iterator<Item = &Block> + '_ {
        self.map(namespace).values()
    }

    /// Page length a listing of `namespace` would use right now
    pub fn page_len(&self, namespace: Namespace, fraction: PageFraction) -> usize {
        fraction.page_len(self.len(namespace))
    }

    /// Count storage entries with no logical reference
    pub fn orphan_count(&self) -> usize {
        self.storage.values().filter(|b| b.block_orphaned).count()
    }

    // =========================================================================
    // Seeding (mutating) operations
    // =========================================================================

    /// Add a metadata block; its `block_id` becomes the key
    pub fn insert_metadata(&mut self, block: Block) -> Result<()> {
        if block.block_type != BlockType::Metadata {
            return Err(SimError::InvalidState(format!(
                "expected a metadata block, got {}",
                block.block_type.as_str()
            )));
        }
        let key = block
            .block_id
            .clone()
            .ok_or_else(|| SimError::InvalidState("metadata block without block id".to_string()))?;
        if self.metadata.contains_key(&key) {
            return Err(SimError::InvalidState(format!("duplicate block id: {}", key)));
        }
        self.metadata.insert(key, block);
        Ok(())
    }

    /// Add a storage block; its `storage_id` becomes the key
    pub fn insert_storage(&mut self, block: Block) -> Result<()> {
        if block.block_type != BlockType::Storage {
            return Err(SimError::InvalidState(format!(
                "expected a storage block, got {}",
                block.block_type.as_str()
            )));
        }
        let key = block
            .storage_id
            .clone()
            .ok_or_else(|| SimError::InvalidState("storage block without storage id".to_string()))?;
        if self.storage.contains_key(&key) {
            return Err(SimError::InvalidState(format!("duplicate storage id: {}", key)));
        }
        self.storage.insert(key, block);
        Ok(())
    }

    /// Add a logical block together with its paired storage block
    ///
    /// Both keys are checked before either insert, so a collision leaves
    /// the universe untouched.
    pub fn insert_pair(&mut self, metadata: Block, storage: Block) -> Result<()> {
        if metadata.block_type != BlockType::Metadata || storage.block_type != BlockType::Storage {
            return Err(SimError::InvalidState("block pair has the wrong block types".to_string()));
        }
        let block_id = metadata
            .block_id
            .as_deref()
            .ok_or_else(|| SimError::InvalidState("metadata block without block id".to_string()))?;
        let storage_id = storage
            .storage_id
            .as_deref()
            .ok_or_else(|| SimError::InvalidState("storage block without storage id".to_string()))?;

        if metadata.storage_id.as_deref() != Some(storage_id) {
            return Err(SimError::InvalidState(format!(
                "block {} does not point at storage id {}",
                block_id, storage_id
            )));
        }
        if self.metadata.contains_key(block_id) {
            return Err(SimError::InvalidState(format!("duplicate block id: {}", block_id)));
        }
        if self.storage.contains_key(storage_id) {
            return Err(SimError::InvalidState(format!("duplicate storage id: {}", storage_id)));
        }

        self.insert_storage(storage)?;
        self.insert_metadata(metadata)
    }

    /// Point a metadata block at its latest materialization
    pub fn set_storage_id(&mut self, block_id: &str, storage_id: impl Into<String>) -> Result<()> {
        let block = self
            .metadata
            .get_mut(block_id)
            .ok_or_else(|| SimError::InvalidState(format!("unknown block id: {}", block_id)))?;
        block.storage_id = Some(storage_id.into());
        Ok(())
    }

    /// Verify the cross-map invariants
    ///
    /// - a metadata `storage_id` resolves to exactly one storage entry, which
    ///   is either an orphan or carries the same `block_id`
    /// - storage entries without a `block_id` are orphaned, and vice versa
    pub fn check_invariants(&self) -> Result<()> {
        for (block_id, block) in &self.metadata {
            let Some(storage_id) = block.storage_id.as_deref() else {
                continue;
            };
            let stored = self.storage.get(storage_id).ok_or_else(|| {
                SimError::InvalidState(format!(
                    "block {} points at missing storage id {}",
                    block_id, storage_id
                ))
            })?;
            if !stored.block_orphaned && stored.block_id.as_deref() != Some(block_id.as_str()) {
                return Err(SimError::InvalidState(format!(
                    "storage id {} belongs to {:?}, not {}",
                    storage_id, stored.block_id, block_id
                )));
            }
        }

        for (storage_id, block) in &self.storage {
            if block.block_id.is_none() != block.block_orphaned {
                return Err(SimError::InvalidState(format!(
                    "storage id {} has block id {:?} but orphaned={}",
                    storage_id, block.block_id, block.block_orphaned
                )));
            }
        }

        Ok(())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn map(&self, namespace: Namespace) -> &BTreeMap<String, Block> {
        match namespace {
            Namespace::Metadata => &self.metadata,
            Namespace::Storage => &self.storage,
        }
    }

    /// Owned snapshot of the logical ids, for loops that mutate the maps
    pub(crate) fn logical_ids(&self) -> Vec<String> {
        self.metadata.keys().cloned().collect()
    }
}
