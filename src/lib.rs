//! # vaultsim
//!
//! A deterministic simulator of a paginated block-listing API, for testing
//! clients that crawl a vault's blocks:
//! - Metadata (logical) and storage (physical) namespaces
//! - Marker-based pagination with an `x-next-batch` cursor
//! - Orphaned storage blocks spread evenly over logical blocks
//! - Reproducible universes from a single RNG seed
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Simulated HTTP Requests                     │
//! │            (GET listings / HEAD point lookups)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Simulator                               │
//! │            (Seed once / Read many, RwLock)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Listing   │          │   Lookup    │
//!   │  (Cursor)   │          │ (Responder) │
//!   └──────┬──────┘          └──────┬──────┘
//!          └────────────┬────────────┘
//!                       ▼
//!               ┌──────────────┐        ┌─────────────┐
//!               │   Universe   │◄───────│    Seed     │
//!               │  (BTreeMaps) │        │  (Orphans)  │
//!               └──────────────┘        └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod block;
pub mod universe;
pub mod seed;
pub mod listing;
pub mod lookup;
pub mod protocol;
pub mod simulator;
pub mod crawl;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SimError, Result};
pub use config::Config;
pub use block::{Block, BlockType, SeedBlock};
pub use universe::{BlockUniverse, Namespace};
pub use simulator::Simulator;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of vaultsim
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
