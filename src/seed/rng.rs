//! Seeded randomness for universe generation
//!
//! Every random draw made while seeding goes through one [`SimRng`], so a
//! universe built from the same seed and the same sequence of seeding calls
//! is identical, storage id suffixes included.

use std::ops::RangeInclusive;

use bytes::Bytes;
use rand::distributions::uniform::SampleUniform;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

/// Deterministic RNG used by all seeding operations
#[derive(Debug, Clone)]
pub struct SimRng {
    inner: ChaCha8Rng,

    /// Seed this generator was created from (for reproducing a failure)
    seed: u64,
}

impl SimRng {
    /// Create a generator from a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a generator from OS entropy, remembering the drawn seed
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw from an inclusive range
    pub fn range_inclusive<T>(&mut self, range: RangeInclusive<T>) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        self.inner.gen_range(range)
    }

    /// Random v4-shaped UUID built from this generator's stream
    pub fn uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.inner.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    /// Random lowercase hex string of `len` characters
    pub fn hex_id(&mut self, len: usize) -> String {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        (0..len)
            .map(|_| HEX[self.inner.gen_range(0..HEX.len())] as char)
            .collect()
    }

    /// Random payload of exactly `len` bytes
    pub fn payload(&mut self, len: usize) -> Bytes {
        let mut buf = vec![0u8; len];
        self.inner.fill_bytes(&mut buf);
        Bytes::from(buf)
    }
}
