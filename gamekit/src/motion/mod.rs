//! Frame-driven motion: tweens, timers, kinematics.
//!
//! - `tween`: property interpolation advanced by explicit steps
//! - `timers`: cooldowns, one-shot timers, timelines
//! - `physics2d`: point bodies and overlap tests
//! - `metrics`: frame rate from clock readings

pub mod tween;
pub mod timers;
pub mod physics2d;
pub mod metrics;

pub use tween::{Animatable, Tween, TweenSet, TweenStatus};
pub use timers::{Cooldowns, Timeline, Timers};
pub use physics2d::{Aabb, Body, Circle};
pub use metrics::Metrics;
