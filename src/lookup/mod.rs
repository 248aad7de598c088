//! Lookup Module
//!
//! Point queries against a universe: does a block exist in a namespace, and
//! what are its attributes. Misses are ordinary outcomes, not errors.

mod responder;

use std::fmt;

pub use responder::lookup;

/// Why a lookup found nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The request was scoped to another vault
    InvalidVaultId,

    /// The id is not a key of the namespace
    InvalidBlockId,
}

impl NotFoundReason {
    /// The reason string served as the 404 body
    pub fn as_str(&self) -> &'static str {
        match self {
            NotFoundReason::InvalidVaultId => "invalid vault id",
            NotFoundReason::InvalidBlockId => "invalid block id",
        }
    }
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes needed to rebuild a block header view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockAttributes {
    pub ref_count: u32,
    pub ref_modified: i64,
    pub storage_id: Option<String>,
    pub block_id: Option<String>,
    pub block_size: usize,

    /// Only reported for the storage namespace
    pub block_orphaned: Option<bool>,
}

/// Result of a point lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(BlockAttributes),
    NotFound(NotFoundReason),
}

impl LookupOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }

    pub fn attributes(&self) -> Option<&BlockAttributes> {
        match self {
            LookupOutcome::Found(attrs) => Some(attrs),
            LookupOutcome::NotFound(_) => None,
        }
    }
}
