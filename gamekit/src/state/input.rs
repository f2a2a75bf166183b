//! Polled Input State
//!
//! The host pushes pointer/keyboard events; games poll the resulting state
//! once per frame.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};

use crate::host::InputSource;

/// Raw input event from the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Key pressed (DOM-style key name, e.g. `"ArrowUp"`).
    KeyDown(String),
    /// Key released.
    KeyUp(String),
    /// Pointer moved to (x, y).
    PointerMove(f32, f32),
    /// Pointer button pressed.
    PointerDown,
    /// Pointer button released.
    PointerUp,
}

/// Pointer state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mouse {
    /// X position
    pub x: f32,
    /// Y position
    pub y: f32,
    /// Button held
    pub down: bool,
}

/// Keyboard and pointer state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    keys: BTreeSet<String>,
    /// Pointer
    pub mouse: Mouse,
}

impl InputState {
    /// Create an idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the state.
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.keys.insert(key.clone());
            }
            InputEvent::KeyUp(key) => {
                self.keys.remove(key);
            }
            InputEvent::PointerMove(x, y) => {
                self.mouse.x = *x;
                self.mouse.y = *y;
            }
            InputEvent::PointerDown => self.mouse.down = true,
            InputEvent::PointerUp => self.mouse.down = false,
        }
    }

    /// Drain `source` and apply everything it reported.
    pub fn poll(&mut self, source: &mut impl InputSource) {
        for event in source.poll_events() {
            self.apply(&event);
        }
    }

    /// True while `key` is held.
    pub fn is_down(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Keys currently held, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

/// Snapshot of the first connected gamepad.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GamepadState {
    /// Stick axes in [-1, 1].
    pub axes: Vec<f32>,
    /// Button pressed flags.
    pub buttons: Vec<bool>,
}

impl GamepadState {
    /// Axis value, 0 when absent.
    pub fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    /// Button state, false when absent.
    pub fn pressed(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }
}
