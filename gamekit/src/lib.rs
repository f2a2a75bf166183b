//! # GameKit
//!
//! Simulation primitives for small single-document games: the runtime a
//! generated game builds on instead of shipping its own.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          GAMEKIT                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - Seeded LCG stream                         │
//! │  ├── math.rs     - clamp / lerp / map, easing curves         │
//! │  ├── vec2.rs     - 2D vector                                 │
//! │  └── hash.rs     - SHA-256 fingerprints and seed labels      │
//! │                                                              │
//! │  motion/         - Time-driven state                         │
//! │  ├── tween.rs    - Stepped property tweens                   │
//! │  ├── timers.rs   - Cooldowns, one-shot timers, timeline      │
//! │  ├── physics2d.rs- Bodies and overlap tests                  │
//! │  └── metrics.rs  - Frame rate from the clock                 │
//! │                                                              │
//! │  state/          - Game state plumbing                       │
//! │  ├── ecs.rs      - Entities, component stores, systems       │
//! │  ├── events.rs   - Event bus                                 │
//! │  ├── fsm.rs      - State machine                             │
//! │  ├── storage.rs  - Save slots over the host store            │
//! │  ├── input.rs    - Keyboard, pointer, gamepad state          │
//! │  └── dialogue.rs - Dialogue queue and on-screen log          │
//! │                                                              │
//! │  world/          - Space and procedural content              │
//! │  ├── grid.rs     - Occupancy grid                            │
//! │  ├── pathfinding.rs - A* search                              │
//! │  ├── navmesh.rs  - Line of sight, path smoothing             │
//! │  ├── grammar.rs  - Level grammar and turtle carving          │
//! │  └── terrain.rs  - Height maps                               │
//! │                                                              │
//! │  audio/          - Tone scheduling and sequencing            │
//! │  fx/             - Particles, camera, colour, text, sprites  │
//! │  ui.rs           - Immediate-mode widgets                    │
//! │  host.rs         - Capability traits the host implements     │
//! │  kit.rs          - Per-document bundle of default singletons │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Every random draw comes from an explicitly seeded [`Rng`]; there is no
//! hidden entropy. Collections that are iterated use `BTreeMap`/`BTreeSet`
//! or insertion-ordered `Vec`s, and A* breaks ties by open-list order, so
//! given the same seed a game regenerates identical levels, paths and
//! particle bursts.
//!
//! ## Host Boundary
//!
//! The toolkit never draws, plays sound or reads the wall clock itself. It
//! calls the traits in [`host`], which a browser shell, a native window or a
//! test recorder implements.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod motion;
pub mod state;
pub mod world;
pub mod audio;
pub mod fx;
pub mod ui;
pub mod host;
pub mod kit;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use core::rng::{Rng, DEFAULT_SEED};
pub use core::math::Easing;
pub use config::KitConfig;
pub use error::{AssetError, KitError, KitResult};
pub use kit::{install, GameKit};
pub use state::ecs::{Entity, World};
pub use world::grid::{Grid, GridPos};
pub use world::navmesh::NavMesh;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
