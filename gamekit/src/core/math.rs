//! Scalar Helpers and Easing Curves

use serde::{Serialize, Deserialize};

/// Clamp `v` into [min, max].
#[inline]
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    v.min(max).max(min)
}

/// Linear interpolation from `a` to `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Re-map `v` from [in_min, in_max] onto [out_min, out_max].
///
/// Not clamped; values outside the input range extrapolate.
#[inline]
pub fn map_range(v: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (out_max - out_min) * ((v - in_min) / (in_max - in_min))
}

/// Easing curve applied to normalized time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// `t`
    Linear,
    /// `t²`
    InQuad,
    /// `t(2 - t)`
    OutQuad,
    /// Quadratic ease in, then out.
    #[default]
    InOutQuad,
}

impl Easing {
    /// All curves, in declaration order.
    pub const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
    ];

    /// Evaluate the curve at `t` (expected in [0, 1]).
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::InQuad => t * t,
            Easing::OutQuad => t * (2.0 - t),
            Easing::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
