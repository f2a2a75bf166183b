//! Toolkit Configuration
//!
//! Defaults for the bundle's convenience singletons. Every field has a
//! default, so a host may pass a partial JSON object (or nothing at all).

use serde::{Serialize, Deserialize};

use crate::core::rng::DEFAULT_SEED;
use crate::error::{KitError, KitResult};

/// Particle burst defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particles per `spawn` when the caller gives no count.
    pub count: usize,
    /// Shortest particle life (seconds).
    pub life_min: f32,
    /// Longest particle life, exclusive (seconds).
    pub life_max: f32,
    /// Velocity component bound, per-60fps-frame units.
    pub speed: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 20,
            life_min: 0.4,
            life_max: 1.0,
            speed: 1.0,
        }
    }
}

/// Camera shake defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    /// Initial offset bound.
    pub strength: f32,
    /// Multiplier applied to strength after every frame.
    pub decay: f32,
    /// Strength below which the shake is cleared.
    pub floor: f32,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            strength: 6.0,
            decay: 0.9,
            floor: 0.3,
        }
    }
}

/// Audio sequencer defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerDefaults {
    /// Tempo used when none (or a non-positive one) is given.
    pub bpm: f64,
}

impl Default for SequencerDefaults {
    fn default() -> Self {
        Self { bpm: 120.0 }
    }
}

/// Configuration for one game document's kit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    /// Seed of the default RNG stream.
    pub rng_seed: u32,
    /// Key prefix for save slots.
    pub slot_prefix: String,
    /// Entries kept by the in-game logger.
    pub logger_capacity: usize,
    /// Rewrite depth used when a grammar caller does not choose one.
    pub grammar_depth: usize,
    /// Particle defaults.
    pub particles: ParticleConfig,
    /// Camera shake defaults.
    pub shake: ShakeConfig,
    /// Sequencer defaults.
    pub sequencer: SequencerDefaults,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            rng_seed: DEFAULT_SEED,
            slot_prefix: "gf_slot_".to_string(),
            logger_capacity: 20,
            grammar_depth: 3,
            particles: ParticleConfig::default(),
            shake: ShakeConfig::default(),
            sequencer: SequencerDefaults::default(),
        }
    }
}

impl KitConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json(json: &str) -> KitResult<Self> {
        serde_json::from_str(json).map_err(KitError::Config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> String {
        // A struct of plain numbers and strings always serializes.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
