//! Universe Module
//!
//! The canonical in-memory record set for one simulated vault.
//!
//! ## Responsibilities
//! - Hold the metadata map (`block_id -> Block`) and the storage map
//!   (`storage_id -> Block`)
//! - Keep both key sets ordered so listings never re-sort
//! - Enforce the cross-map invariants during seeding
//!
//! ## Data Structure Choice
//! BTreeMap for both namespaces:
//! - Ascending key order doubles as the sorted index for listings
//! - Deterministic iteration order for the orphan distributor

mod table;

use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

pub use table::BlockUniverse;

/// The two parallel keyspaces of a vault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Logical blocks, keyed by `block_id`
    Metadata,

    /// Physical blocks, keyed by `storage_id`
    Storage,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Metadata => "metadata",
            Namespace::Storage => "storage",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metadata" => Ok(Namespace::Metadata),
            "storage" => Ok(Namespace::Storage),
            other => Err(SimError::Config(format!("unknown namespace: {}", other))),
        }
    }
}
