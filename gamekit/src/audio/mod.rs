//! Audio Scheduling
//!
//! The toolkit never produces samples. It computes [`Tone`] descriptions
//! (waveform, pitch, gain, start/stop on the device clock) and hands them to
//! a host [`ToneDevice`], which owns synthesis.
//!
//! ## Module Structure
//!
//! - `mod`: tone model and the one-shot `beep`
//! - `sequencer`: note naming, beat-timed patterns and step tracks

pub mod sequencer;

use serde::{Serialize, Deserialize};

use crate::host::ToneDevice;

pub use sequencer::{note_to_freq, play, track, Note, Pitch, Sequencer};

/// Lowest gain an exponential ramp may touch.
pub const SILENCE: f64 = 0.0001;

/// Tail added after a beep's envelope so the ramp finishes before stop.
pub const BEEP_TAIL: f64 = 0.02;

/// Oscillator shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    /// Pure tone
    #[default]
    Sine,
    /// Square wave
    Square,
    /// Sawtooth wave
    Sawtooth,
    /// Triangle wave
    Triangle,
}

/// Gain shape over a tone's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Envelope {
    /// Constant gain from start to stop.
    #[default]
    Flat,
    /// Exponential ramp from [`SILENCE`] to the tone volume over `attack`
    /// seconds, then back down to [`SILENCE`] at `release` seconds after
    /// start.
    Exponential {
        /// Rise time
        attack: f64,
        /// Offset of the end of the decay
        release: f64,
    },
}

/// One scheduled oscillator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Oscillator shape
    pub waveform: Waveform,
    /// Frequency in Hz
    pub frequency: f64,
    /// Peak gain
    pub volume: f64,
    /// Device time the oscillator starts (seconds)
    pub start: f64,
    /// Device time the oscillator stops (seconds)
    pub stop: f64,
    /// Gain shape
    pub envelope: Envelope,
}

impl Tone {
    /// `stop - start`.
    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }
}

/// Schedule a short blip now.
///
/// Durations above 5 are taken as milliseconds (callers mix units). The
/// oscillator stops [`BEEP_TAIL`] seconds after the envelope has decayed.
pub fn beep<D: ToneDevice + ?Sized>(
    device: &mut D,
    frequency: f64,
    duration: f64,
    waveform: Waveform,
    volume: f64,
) -> Tone {
    let duration = if duration > 5.0 { duration / 1000.0 } else { duration };
    let start = device.current_time();
    let tone = Tone {
        waveform,
        frequency,
        volume: volume.max(SILENCE),
        start,
        stop: start + duration + BEEP_TAIL,
        envelope: Envelope::Exponential {
            attack: 0.01,
            release: duration,
        },
    };
    device.schedule(tone.clone());
    tone
}

// =============================================================================
// TESTS
// =============================================================================
