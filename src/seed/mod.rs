//! Seed Module
//!
//! Populates a [`BlockUniverse`](crate::universe::BlockUniverse) before any
//! listing or lookup is served.
//!
//! ## Responsibilities
//! - Generate logical blocks with a paired storage block each
//! - Distribute orphaned storage blocks evenly over the logical blocks
//! - Draw reference counts and backdated timestamps from one seeded RNG
//!
//! Seeding is the only phase that mutates a universe. It must finish before
//! readers start; nothing here takes a lock.

mod generator;
mod orphan;
mod rng;
mod timestamp;

use std::ops::RangeInclusive;

use crate::config::Config;

pub use generator::{generate_blocks, seed_blocks, storage_id_for, synthetic_blocks, BLOCK_ID_LEN};
pub use orphan::{distribute_orphans, OrphanReport};
pub use rng::SimRng;
pub use timestamp::{calculate_ref_modified, random_past_timestamp, unix_now, TimestampRange};

/// Knobs shared by all seeding operations
#[derive(Debug, Clone)]
pub struct SeedProfile {
    /// Upper bound (inclusive) of generated reference counts
    pub ref_count_max: u32,

    /// Backdating bounds for `ref_modified`
    pub timestamps: TimestampRange,

    /// Base for backdating; `None` means "now" at draw time
    pub base_time: Option<i64>,

    /// Payload sizes for synthetic blocks
    pub block_size_range: RangeInclusive<usize>,
}

impl Default for SeedProfile {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl SeedProfile {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ref_count_max: config.ref_count_max,
            timestamps: config.timestamps,
            base_time: None,
            block_size_range: config.block_size_range.clone(),
        }
    }

    /// Pin the backdating base so timestamps are reproducible
    pub fn with_base_time(mut self, base_time: i64) -> Self {
        self.base_time = Some(base_time);
        self
    }

    pub(crate) fn ref_count(&self, rng: &mut SimRng) -> u32 {
        rng.range_inclusive(0..=self.ref_count_max)
    }

    pub(crate) fn ref_modified(&self, rng: &mut SimRng) -> i64 {
        random_past_timestamp(rng, self.base_time, self.timestamps)
    }
}
