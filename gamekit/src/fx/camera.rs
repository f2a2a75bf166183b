//! Camera Effects
//!
//! Screen shake, a translating 2D camera, and a flat perspective
//! projection for fake-3D scenes.

use serde::{Serialize, Deserialize};

use crate::config::ShakeConfig;
use crate::core::rng::Rng;
use crate::core::vec2::Vec2;
use crate::host::Surface;

/// Live shake.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shake {
    /// Current offset bound
    pub strength: f32,
    /// Per-frame multiplier
    pub decay: f32,
    /// Last applied offset
    pub x: f32,
    /// Last applied offset
    pub y: f32,
}

/// Start (or restart) a shake.
pub fn shake(state: &mut Option<Shake>, strength: f32, decay: f32) {
    *state = Some(Shake {
        strength,
        decay,
        x: 0.0,
        y: 0.0,
    });
}

/// Apply one frame of shake to `surface`.
///
/// Draws x then y uniformly in `[-strength, strength)`, translates, decays
/// the strength and clears the shake once it drops below `floor`. Returns
/// the offset applied, or `None` when no shake is active.
pub fn apply_shake<S: Surface + ?Sized>(
    state: &mut Option<Shake>,
    rng: &mut Rng,
    surface: &mut S,
    floor: f32,
) -> Option<(f32, f32)> {
    let active = state.as_mut()?;
    active.x = rng.range_f32(-active.strength, active.strength);
    active.y = rng.range_f32(-active.strength, active.strength);
    surface.translate(active.x, active.y);
    let offset = (active.x, active.y);

    active.strength *= active.decay;
    if active.strength < floor {
        *state = None;
    }
    Some(offset)
}

/// Shake state plus its configured defaults.
#[derive(Clone, Debug, Default)]
pub struct CameraShake {
    state: Option<Shake>,
    config: ShakeConfig,
}

impl CameraShake {
    /// Idle shake using `config` for defaults.
    pub fn new(config: ShakeConfig) -> Self {
        Self { state: None, config }
    }

    /// Start a shake with the configured strength and decay.
    pub fn start(&mut self) {
        shake(&mut self.state, self.config.strength, self.config.decay);
    }

    /// Start a shake with explicit parameters.
    pub fn start_with(&mut self, strength: f32, decay: f32) {
        shake(&mut self.state, strength, decay);
    }

    /// Apply one frame; see [`apply_shake`].
    pub fn apply<S: Surface + ?Sized>(&mut self, rng: &mut Rng, surface: &mut S) -> Option<(f32, f32)> {
        apply_shake(&mut self.state, rng, surface, self.config.floor)
    }

    /// Active shake, if any.
    pub fn state(&self) -> Option<&Shake> {
        self.state.as_ref()
    }

    /// True while shaking.
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }
}

/// Translating 2D camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera2d {
    /// World x at the screen origin
    pub x: f32,
    /// World y at the screen origin
    pub y: f32,
}

impl Camera2d {
    /// Camera at (x, y).
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// World point to screen point.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x - self.x, world.y - self.y)
    }

    /// Screen point to world point.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x + self.x, screen.y + self.y)
    }

    /// Move the camera toward `target` by fraction `t`.
    pub fn follow(&mut self, target: Vec2, t: f32) {
        let pos = Vec2::new(self.x, self.y).lerp(target, t);
        self.x = pos.x;
        self.y = pos.y;
    }
}

/// Viewer for [`project`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera3d {
    /// Eye position
    pub x: f32,
    /// Eye position
    pub y: f32,
    /// Eye position
    pub z: f32,
    /// Focal length in pixels
    pub fov: f32,
    /// Screen centre
    pub cx: f32,
    /// Screen centre
    pub cy: f32,
}

impl Default for Camera3d {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            fov: 400.0,
            cx: 0.0,
            cy: 0.0,
        }
    }
}

/// Projected point and its perspective scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    /// Screen x
    pub x: f32,
    /// Screen y
    pub y: f32,
    /// `fov / depth`
    pub scale: f32,
}

/// Perspective-project (x, y, z). A point at the eye's depth is treated as
/// depth 1.
pub fn project(point: [f32; 3], camera: &Camera3d) -> Projected {
    let [x, y, z] = point;
    let depth = z - camera.z;
    let depth = if depth == 0.0 { 1.0 } else { depth };
    let scale = camera.fov / depth;
    Projected {
        x: (x - camera.x) * scale + camera.cx,
        y: (y - camera.y) * scale + camera.cy,
        scale,
    }
}

// =============================================================================
// TESTS
// =============================================================================
