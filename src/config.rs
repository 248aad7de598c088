//! Configuration for vaultsim
//!
//! Centralized configuration with defaults matching the reference fixture.

use std::ops::RangeInclusive;

use crate::error::{Result, SimError};
use crate::listing::PageFraction;
use crate::seed::TimestampRange;

/// Main configuration for a simulated vault
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Scope Configuration
    // -------------------------------------------------------------------------
    /// Host used when building listing URLs (`https://{api_host}/v1.0/...`)
    pub api_host: String,

    /// Project the simulated vault belongs to
    pub project_id: String,

    /// The only vault id the responder accepts
    pub vault_id: String,

    // -------------------------------------------------------------------------
    // Listing Configuration
    // -------------------------------------------------------------------------
    /// Page length divisor: each page holds `floor(N / page_fraction)` ids
    pub page_fraction: usize,

    // -------------------------------------------------------------------------
    // Seeding Configuration
    // -------------------------------------------------------------------------
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,

    /// Upper bound (inclusive) of generated reference counts
    pub ref_count_max: u32,

    /// Bounds for backdating `ref_modified`
    pub timestamps: TimestampRange,

    /// Payload size range (bytes) for synthetic blocks
    pub block_size_range: RangeInclusive<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: "neo.the.one".to_string(),
            project_id: "project_0".to_string(),
            vault_id: "vault_0".to_string(),
            page_fraction: PageFraction::DEFAULT,
            seed: None,
            ref_count_max: 4,
            timestamps: TimestampRange::default(),
            block_size_range: 1..=1024,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the values the simulator relies on
    pub fn validate(&self) -> Result<()> {
        if self.vault_id.is_empty() {
            return Err(SimError::Config("vault id must not be empty".to_string()));
        }
        if self.vault_id.contains('/') {
            return Err(SimError::Config(format!(
                "vault id must be a single path segment: {}",
                self.vault_id
            )));
        }
        if self.api_host.is_empty() {
            return Err(SimError::Config("api host must not be empty".to_string()));
        }
        PageFraction::new(self.page_fraction)?;
        if self.block_size_range.is_empty() {
            return Err(SimError::Config(format!(
                "empty block size range: {:?}",
                self.block_size_range
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the API host used in generated URLs
    pub fn api_host(mut self, host: impl Into<String>) -> Self {
        self.config.api_host = host.into();
        self
    }

    /// Set the project id
    pub fn project_id(mut self, id: impl Into<String>) -> Self {
        self.config.project_id = id.into();
        self
    }

    /// Set the vault id
    pub fn vault_id(mut self, id: impl Into<String>) -> Self {
        self.config.vault_id = id.into();
        self
    }

    /// Set the page length divisor
    pub fn page_fraction(mut self, divisor: usize) -> Self {
        self.config.page_fraction = divisor;
        self
    }

    /// Fix the RNG seed for reproducible universes
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the maximum generated reference count
    pub fn ref_count_max(mut self, max: u32) -> Self {
        self.config.ref_count_max = max;
        self
    }

    /// Set the timestamp backdating bounds
    pub fn timestamps(mut self, range: TimestampRange) -> Self {
        self.config.timestamps = range;
        self
    }

    /// Set the synthetic payload size range (bytes)
    pub fn block_size_range(mut self, range: RangeInclusive<usize>) -> Self {
        self.config.block_size_range = range;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
