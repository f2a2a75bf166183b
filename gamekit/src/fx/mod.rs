//! Visual effects over a host drawing surface.
//!
//! ## Module Structure
//!
//! - `particles`: spark bursts
//! - `camera`: screen shake, 2D camera, perspective projection
//! - `color`: RGB parsing and blending
//! - `text`: word wrapping
//! - `sprites`: frame-strip blits

pub mod particles;
pub mod camera;
pub mod color;
pub mod text;
pub mod sprites;

pub use particles::{Particle, Particles};
pub use camera::{apply_shake, project, shake, Camera2d, Camera3d, CameraShake, Projected, Shake};
pub use color::Rgb;
pub use text::{draw_wrapped, wrap};
pub use sprites::SpriteSheet;
