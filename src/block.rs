//! Block definitions
//!
//! One struct covers both views of a block. The metadata view is addressed
//! by `block_id`, the storage view by `storage_id`; `block_type` says which
//! view a value represents.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Which view of a block a [`Block`] value represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Logical block, keyed by `block_id`
    Metadata,

    /// Physical block, keyed by `storage_id`
    Storage,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Metadata => "metadata",
            BlockType::Storage => "storage",
        }
    }
}

/// A content block in either namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub project_id: String,
    pub vault_id: String,

    /// Logical id; `None` for an orphaned storage block
    pub block_id: Option<String>,

    /// Physical id; set once the block has been materialized
    pub storage_id: Option<String>,

    /// Opaque payload
    pub data: Bytes,

    /// Payload length in bytes (authoritative)
    pub block_size: usize,

    /// Number of logical references to the physical block
    pub ref_count: u32,

    /// Unix seconds of the last reference count change
    pub ref_modified: i64,

    /// True iff no logical block references this storage entry
    pub block_orphaned: bool,

    pub block_type: BlockType,
}

impl Block {
    /// Create a metadata block that has not been materialized yet
    pub fn metadata(
        project_id: impl Into<String>,
        vault_id: impl Into<String>,
        block_id: impl Into<String>,
        data: Bytes,
    ) -> Self {
        let block_size = data.len();
        Self {
            project_id: project_id.into(),
            vault_id: vault_id.into(),
            block_id: Some(block_id.into()),
            storage_id: None,
            data,
            block_size,
            ref_count: 0,
            ref_modified: 0,
            block_orphaned: false,
            block_type: BlockType::Metadata,
        }
    }

    /// Create the storage view of `anchor` under a new storage id
    ///
    /// Payload and size are shared with the anchor. With `orphaned` set the
    /// entry carries no logical id.
    pub fn storage_from(anchor: &Block, storage_id: impl Into<String>, orphaned: bool) -> Self {
        Self {
            project_id: anchor.project_id.clone(),
            vault_id: anchor.vault_id.clone(),
            block_id: if orphaned { None } else { anchor.block_id.clone() },
            storage_id: Some(storage_id.into()),
            data: anchor.data.clone(),
            block_size: anchor.block_size,
            ref_count: 0,
            ref_modified: 0,
            block_orphaned: orphaned,
            block_type: BlockType::Storage,
        }
    }

    pub fn with_ref_count(mut self, ref_count: u32) -> Self {
        self.ref_count = ref_count;
        self
    }

    pub fn with_ref_modified(mut self, ref_modified: i64) -> Self {
        self.ref_modified = ref_modified;
        self
    }

    /// The key this block is stored under in its namespace
    pub fn key(&self) -> Option<&str> {
        match self.block_type {
            BlockType::Metadata => self.block_id.as_deref(),
            BlockType::Storage => self.storage_id.as_deref(),
        }
    }
}

/// A caller-supplied logical block used to seed a universe
#[derive(Debug, Clone, PartialEq)]
pub struct SeedBlock {
    pub block_id: String,
    pub data: Bytes,
}

impl SeedBlock {
    pub fn new(block_id: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            block_id: block_id.into(),
            data: data.into(),
        }
    }
}
