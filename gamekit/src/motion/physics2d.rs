//! Minimal 2D Kinematics and Overlap Tests

use serde::{Serialize, Deserialize};

/// Point body with velocity and acceleration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Position X
    pub x: f32,
    /// Position Y
    pub y: f32,
    /// Velocity X
    pub vx: f32,
    /// Velocity Y
    pub vy: f32,
    /// Acceleration X
    pub ax: f32,
    /// Acceleration Y
    pub ay: f32,
}

impl Body {
    /// Body at rest at (x, y).
    pub fn at(x: f32, y: f32) -> Self {
        Self { x, y, ..Self::default() }
    }

    /// Semi-implicit Euler step: velocity first, then position.
    pub fn step(&mut self, dt: f32) {
        self.vx += self.ax * dt;
        self.vy += self.ay * dt;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
    }
}

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Left
    pub x: f32,
    /// Top
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Aabb {
    /// Create a rectangle.
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive point containment.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

/// Circle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center X
    pub x: f32,
    /// Center Y
    pub y: f32,
    /// Radius
    pub r: f32,
}

/// Strict rectangle overlap (touching edges do not count).
pub fn aabb(a: &Aabb, b: &Aabb) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Strict circle overlap.
pub fn circles(a: &Circle, b: &Circle) -> bool {
    (a.x - b.x).hypot(a.y - b.y) < a.r + b.r
}
