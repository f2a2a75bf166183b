//! Core deterministic primitives.
//!
//! Everything here is a pure function of its inputs (and, for the RNG, of
//! its explicit seed). Every other module builds on these.

pub mod rng;
pub mod math;
pub mod vec2;
pub mod hash;

// Re-export core types
pub use rng::{Rng, DEFAULT_SEED};
pub use math::{clamp, lerp, map_range, Easing};
pub use vec2::Vec2;
pub use hash::{ContentHash, ContentHasher};
