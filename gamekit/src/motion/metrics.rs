//! Frame Rate
//!
//! Instantaneous frames-per-second from successive clock readings.

/// Last frame time and the rate it implied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Metrics {
    last: f64,
    fps: f64,
}

impl Metrics {
    /// Start measuring from `now` (ms).
    pub fn new(now: f64) -> Self {
        Self { last: now, fps: 0.0 }
    }

    /// Record a frame at `now` and return `1000 / (now - last)`.
    ///
    /// A frame that arrives at or before the previous one keeps the last
    /// rate but still moves the reference time.
    pub fn tick(&mut self, now: f64) -> f64 {
        let dt = now - self.last;
        if dt > 0.0 {
            self.fps = 1000.0 / dt;
        }
        self.last = now;
        self.fps
    }

    /// Rate measured by the latest `tick`; 0 before the first.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Time of the latest `tick` (ms).
    pub fn last(&self) -> f64 {
        self.last
    }
}

// =============================================================================
// TESTS
// =============================================================================
