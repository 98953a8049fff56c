//! # Level Seeds
//!
//! All generation derives from one `u64` seed. The seed is the whole
//! reproducibility contract: the same seed must replay the same sequence of
//! random draws and therefore the same level, on any platform.
//!
//! `ChaCha8` backs the generator because its output stream is specified and
//! portable; the standard library and `StdRng` make no such promise across
//! versions.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed for one episode's level generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LevelSeed(u64);

impl LevelSeed {
    /// Creates a new level seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose (e.g., a retry attempt).
    ///
    /// Hash mixing keeps the derived streams independent of each other and
    /// of the parent stream.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        // FNV-1a style mixing
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }

    /// Materializes the deterministic generator for this seed.
    #[inline]
    #[must_use]
    pub fn rng(self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.0)
    }
}

impl Default for LevelSeed {
    fn default() -> Self {
        Self(0xC0FF_EE00_DEAD_1337)
    }
}
