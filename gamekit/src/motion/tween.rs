//! Tweens
//!
//! A tween interpolates one named property of a target from the value it had
//! when the tween started to a goal value. It only advances when the
//! caller's frame loop calls `step`; there is no background scheduling.

use std::collections::BTreeMap;

use crate::core::math::Easing;

/// Something whose named scalar properties can be animated.
pub trait Animatable {
    /// Current value of `name`, or `None` if the property does not exist.
    fn property(&self, name: &str) -> Option<f32>;
    /// Write `name`.
    fn set_property(&mut self, name: &str, value: f32);
}

impl Animatable for BTreeMap<String, f32> {
    fn property(&self, name: &str) -> Option<f32> {
        self.get(name).copied()
    }

    fn set_property(&mut self, name: &str, value: f32) {
        self.insert(name.to_string(), value);
    }
}

/// Result of driving a tween one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenStatus {
    /// More steps needed.
    Running,
    /// The property holds the goal value; further steps do nothing.
    Complete,
}

/// A single property tween.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    property: String,
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
    complete: bool,
}

impl Tween {
    /// Start a tween, capturing the property's current value.
    ///
    /// Returns `None` if the target has no such property.
    pub fn start(
        target: &impl Animatable,
        property: &str,
        to: f32,
        duration: f32,
        easing: Easing,
    ) -> Option<Self> {
        let from = target.property(property)?;
        Some(Self {
            property: property.to_string(),
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
            complete: false,
        })
    }

    /// Animated property name.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Value captured at start.
    pub fn from(&self) -> f32 {
        self.from
    }

    /// Goal value.
    pub fn to(&self) -> f32 {
        self.to
    }

    /// Normalized progress in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// True once the goal value has been written.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Advance by `dt` and write the interpolated value into `target`.
    ///
    /// The step that reaches `t == 1` writes the goal exactly.
    pub fn step(&mut self, dt: f32, target: &mut impl Animatable) -> TweenStatus {
        if self.complete {
            return TweenStatus::Complete;
        }

        self.elapsed += dt.max(0.0);
        let t = self.progress();

        if t >= 1.0 {
            target.set_property(&self.property, self.to);
            self.complete = true;
            return TweenStatus::Complete;
        }

        let value = self.from + (self.to - self.from) * self.easing.apply(t);
        target.set_property(&self.property, value);
        TweenStatus::Running
    }
}

/// All running tweens for one target.
///
/// At most one tween per property: starting another on the same property
/// replaces the old one.
#[derive(Clone, Debug, Default)]
pub struct TweenSet {
    tweens: Vec<Tween>,
}

impl TweenSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tweening `property` on `target`.
    ///
    /// Returns false if the target has no such property.
    pub fn start(
        &mut self,
        target: &impl Animatable,
        property: &str,
        to: f32,
        duration: f32,
        easing: Easing,
    ) -> bool {
        let Some(tween) = Tween::start(target, property, to, duration, easing) else {
            return false;
        };
        self.tweens.retain(|t| t.property != property);
        self.tweens.push(tween);
        true
    }

    /// Step every tween once; completed tweens are dropped.
    ///
    /// Returns the number still running.
    pub fn step(&mut self, dt: f32, target: &mut impl Animatable) -> usize {
        self.tweens
            .retain_mut(|tween| tween.step(dt, target) == TweenStatus::Running);
        self.tweens.len()
    }

    /// Abandon the tween on `property`, leaving the current value in place.
    pub fn cancel(&mut self, property: &str) {
        self.tweens.retain(|t| t.property != property);
    }

    /// Number of running tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// True if nothing is running.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
