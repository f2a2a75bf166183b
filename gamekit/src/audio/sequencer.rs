//! Note Sequencer
//!
//! Turns note names and beat counts into tones on the device clock.
//!
//! - `play` is legato-style: each note starts where the previous note's
//!   beats ended.
//! - `track` is a step grid: slot `i` starts at `i` beats, empty slots are
//!   rests.
//!
//! Unknown note names degrade to A4 (440 Hz) instead of failing, so a typo
//! in a generated melody is audible but harmless.

use serde::{Serialize, Deserialize};
use tracing::{trace, warn};

use super::{Envelope, Tone, Waveform};
use crate::host::ToneDevice;

/// Reference pitch (A4).
pub const A4_HZ: f64 = 440.0;

/// Tempo used when the caller's tempo is unusable.
pub const DEFAULT_BPM: f64 = 120.0;

/// Semitone offset of a note letter (with optional sharp) from A.
fn semitone(letter: u8, sharp: bool) -> i32 {
    let natural = match letter {
        b'C' => -9,
        b'D' => -7,
        b'E' => -5,
        b'F' => -4,
        b'G' => -2,
        b'A' => 0,
        _ => 2, // B
    };
    // E# and B# read as their naturals.
    if sharp && letter != b'B' && letter != b'E' {
        natural + 1
    } else {
        natural
    }
}

/// Frequency of a note name such as `"A4"`, `"C#5"` or `"lead G3"`.
///
/// The first `[A-G]#?<digit>` found anywhere in the name is used; names
/// without one give [`A4_HZ`].
pub fn note_to_freq(name: &str) -> f64 {
    let bytes = name.as_bytes();
    for (i, &letter) in bytes.iter().enumerate() {
        if !(b'A'..=b'G').contains(&letter) {
            continue;
        }
        let sharp = bytes.get(i + 1) == Some(&b'#');
        let digit_at = if sharp { i + 2 } else { i + 1 };
        if let Some(octave) = bytes.get(digit_at).filter(|b| b.is_ascii_digit()) {
            let octave = i32::from(octave - b'0');
            let semis = semitone(letter, sharp) + (octave - 4) * 12;
            return A4_HZ * 2f64.powf(f64::from(semis) / 12.0);
        }
    }
    trace!(name, "unparseable note name");
    A4_HZ
}

/// Pitch given either directly or by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pitch {
    /// Frequency in Hz
    Freq(f64),
    /// Note name, see [`note_to_freq`]
    Name(String),
}

impl Pitch {
    /// Resolve to Hz.
    pub fn frequency(&self) -> f64 {
        match self {
            Pitch::Freq(hz) => *hz,
            Pitch::Name(name) => note_to_freq(name),
        }
    }
}

impl From<&str> for Pitch {
    fn from(name: &str) -> Self {
        Pitch::Name(name.to_string())
    }
}

impl From<f64> for Pitch {
    fn from(hz: f64) -> Self {
        Pitch::Freq(hz)
    }
}

/// One entry of a pattern or track. Missing fields take the defaults of the
/// function that schedules it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    /// Pitch; A4 when absent
    pub pitch: Option<Pitch>,
    /// Sounding time in seconds
    pub duration: Option<f64>,
    /// Oscillator shape
    pub waveform: Option<Waveform>,
    /// Gain
    pub volume: Option<f64>,
    /// Beats until the next note (`play` only)
    pub beats: Option<f64>,
}

impl Note {
    /// Note with just a pitch.
    pub fn new(pitch: impl Into<Pitch>) -> Self {
        Self {
            pitch: Some(pitch.into()),
            ..Self::default()
        }
    }

    /// Set the beat count.
    pub fn beats(mut self, beats: f64) -> Self {
        self.beats = Some(beats);
        self
    }

    /// Set the sounding time.
    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Set the waveform.
    pub fn waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = Some(waveform);
        self
    }

    /// Set the gain.
    pub fn volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    fn frequency(&self) -> f64 {
        self.pitch.as_ref().map_or(A4_HZ, Pitch::frequency)
    }
}

/// Scheduling defaults for one call style.
struct Voice {
    waveform: Waveform,
    volume: f64,
    duration: f64,
}

const PLAY_VOICE: Voice = Voice { waveform: Waveform::Sine, volume: 0.15, duration: 0.2 };
const TRACK_VOICE: Voice = Voice { waveform: Waveform::Square, volume: 0.1, duration: 0.2 };

impl Voice {
    fn tone(&self, note: &Note, start: f64) -> Tone {
        Tone {
            waveform: note.waveform.unwrap_or(self.waveform),
            frequency: note.frequency(),
            volume: note.volume.unwrap_or(self.volume),
            start,
            stop: start + note.duration.unwrap_or(self.duration),
            envelope: Envelope::Flat,
        }
    }
}

/// Sequencer with a fallback tempo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sequencer {
    fallback_bpm: f64,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self { fallback_bpm: DEFAULT_BPM }
    }
}

impl Sequencer {
    /// Sequencer that uses `fallback_bpm` when a caller's tempo is
    /// non-positive or not finite. An unusable fallback is itself replaced
    /// by [`DEFAULT_BPM`].
    pub fn new(fallback_bpm: f64) -> Self {
        let fallback_bpm = if usable(fallback_bpm) { fallback_bpm } else { DEFAULT_BPM };
        Self { fallback_bpm }
    }

    /// Tempo actually used for `bpm`.
    pub fn tempo(&self, bpm: f64) -> f64 {
        if usable(bpm) {
            bpm
        } else {
            warn!(bpm, fallback = self.fallback_bpm, "unusable tempo, using fallback");
            self.fallback_bpm
        }
    }

    /// Schedule `pattern` back to back from the device's current time.
    ///
    /// Each note starts `60 / bpm * beats` seconds after the previous one.
    pub fn play<D: ToneDevice + ?Sized>(&self, device: &mut D, pattern: &[Note], bpm: f64) -> Vec<Tone> {
        let beat = 60.0 / self.tempo(bpm);
        let mut t = device.current_time();
        let mut tones = Vec::with_capacity(pattern.len());
        for note in pattern {
            let tone = PLAY_VOICE.tone(note, t);
            device.schedule(tone.clone());
            tones.push(tone);
            t += beat * note.beats.unwrap_or(1.0);
        }
        tones
    }

    /// Schedule a step track; slot `i` starts `i` beats after now and
    /// `None` slots are rests.
    pub fn track<D: ToneDevice + ?Sized>(&self, device: &mut D, steps: &[Option<Note>], bpm: f64) -> Vec<Tone> {
        let beat = 60.0 / self.tempo(bpm);
        let start = device.current_time();
        let mut tones = Vec::new();
        for (i, step) in steps.iter().enumerate() {
            let Some(note) = step else { continue };
            let tone = TRACK_VOICE.tone(note, start + i as f64 * beat);
            device.schedule(tone.clone());
            tones.push(tone);
        }
        tones
    }
}

#[inline]
fn usable(bpm: f64) -> bool {
    bpm.is_finite() && bpm > 0.0
}

/// [`Sequencer::play`] with the default fallback tempo.
pub fn play<D: ToneDevice + ?Sized>(device: &mut D, pattern: &[Note], bpm: f64) -> Vec<Tone> {
    Sequencer::default().play(device, pattern, bpm)
}

/// [`Sequencer::track`] with the default fallback tempo.
pub fn track<D: ToneDevice + ?Sized>(device: &mut D, steps: &[Option<Note>], bpm: f64) -> Vec<Tone> {
    Sequencer::default().track(device, steps, bpm)
}

// =============================================================================
// TESTS
// =============================================================================
