//! Deterministic Random Number Generator
//!
//! Linear congruential stream shared by every component that needs
//! repeatable randomness. Given the same seed, produces the identical
//! sequence on every platform.

use serde::{Serialize, Deserialize};

use super::hash::hash_with_domain;

/// LCG multiplier (Numerical Recipes).
pub const LCG_MULTIPLIER: u32 = 1_664_525;

/// LCG increment (Numerical Recipes).
pub const LCG_INCREMENT: u32 = 1_013_904_223;

/// Seed used by the default stream of a freshly injected kit.
pub const DEFAULT_SEED: u32 = 1_234_567;

const TWO_POW_32: f64 = 4_294_967_296.0;

/// Seeded linear-congruential random stream.
///
/// # Determinism Guarantee
///
/// The stream is a pure function of its 32-bit state. There is no hidden
/// entropy source; re-seeding is always explicit.
///
/// # Example
///
/// ```
/// use gamekit::core::rng::Rng;
///
/// let mut rng = Rng::new(0);
/// assert_eq!(rng.next(), 1013904223.0 / 4294967296.0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rng {
    seed: u32,
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Rng {
    /// Create a new stream from a 32-bit seed.
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Create a stream whose seed is derived from a text label.
    ///
    /// Lets a game name its streams ("level-3", "loot") and still get the
    /// same content on every run.
    pub fn from_label(label: &str) -> Self {
        Self::new(derive_seed(label))
    }

    /// Replace the state.
    pub fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }

    /// Current state (for checkpointing/debugging).
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Advance the stream and return the raw 32-bit state.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.seed = self
            .seed
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.seed
    }

    /// Advance the stream and return a value in [0, 1).
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        self.next_u32() as f64 / TWO_POW_32
    }

    /// Value in [min, max).
    #[inline]
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        self.next() * (max - min) + min
    }

    /// `f32` value in [min, max).
    #[inline]
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        self.range(min as f64, max as f64) as f32
    }

    /// Integer in [0, max). Returns 0 when `max` is 0.
    #[inline]
    pub fn next_int(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        ((self.next() * max as f64) as usize).min(max - 1)
    }

    /// True with the given probability.
    #[inline]
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next() < probability
    }

    /// Select a random element from a slice.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            let idx = self.next_int(slice.len());
            Some(&slice[idx])
        }
    }

    /// Shuffle a slice in place using Fisher-Yates algorithm.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_int(i + 1);
            slice.swap(i, j);
        }
    }
}

/// Derive a stream seed from a label.
///
/// SHA-256 over a domain separator and the label; the first four bytes
/// (little-endian) become the seed.
pub fn derive_seed(label: &str) -> u32 {
    let digest = hash_with_domain(b"GAMEKIT_SEED_V1", label.as_bytes());
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

// =============================================================================
// TESTS
// =============================================================================
