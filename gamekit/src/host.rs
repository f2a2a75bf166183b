//! Host Capabilities
//!
//! The toolkit never owns a render target, an audio device or a clock.
//! The hosting game document hands it these capabilities, and everything
//! in the toolkit drives them through the traits below.
//!
//! In-memory implementations are provided for headless runs and tests.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use futures_util::future::{self, FutureExt, LocalBoxFuture};

use crate::audio::Tone;
use crate::error::AssetError;
use crate::state::input::InputEvent;

// =============================================================================
// DRAWING SURFACE
// =============================================================================

/// Abstract 2D immediate-mode drawing surface.
pub trait Surface {
    /// Translate subsequent drawing.
    fn translate(&mut self, dx: f32, dy: f32);
    /// Set global alpha in [0, 1].
    fn set_alpha(&mut self, alpha: f32);
    /// Set the fill style (CSS-like color string).
    fn set_fill(&mut self, style: &str);
    /// Set the stroke style.
    fn set_stroke(&mut self, style: &str);
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    /// Outline an axis-aligned rectangle.
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    /// Draw text with its baseline at (x, y).
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
    /// Width of `text` in the current font.
    fn measure_text(&self, text: &str) -> f32;
    /// Copy a region of a preloaded image, named by its asset source, onto
    /// the surface.
    fn draw_image(&mut self, image: &str, blit: Blit);
}

/// Source region of an image and where it lands on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Blit {
    /// Source x
    pub sx: f32,
    /// Source y
    pub sy: f32,
    /// Source width
    pub sw: f32,
    /// Source height
    pub sh: f32,
    /// Destination x
    pub dx: f32,
    /// Destination y
    pub dy: f32,
    /// Destination width
    pub dw: f32,
    /// Destination height
    pub dh: f32,
}

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// `translate`
    Translate(f32, f32),
    /// `set_alpha`
    Alpha(f32),
    /// `set_fill`
    Fill(String),
    /// `set_stroke`
    Stroke(String),
    /// `fill_rect`
    FillRect(f32, f32, f32, f32),
    /// `stroke_rect`
    StrokeRect(f32, f32, f32, f32),
    /// `fill_text`
    Text(String, f32, f32),
    /// `draw_image`
    Image(String, Blit),
}

/// Surface that records every call instead of drawing.
///
/// Text is measured as a fixed width per character.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    /// Calls in order.
    pub commands: Vec<DrawCommand>,
    /// Width of one character for `measure_text`.
    pub char_width: f32,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            char_width: 8.0,
        }
    }
}

impl RecordingSurface {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of filled rectangles recorded.
    pub fn fill_rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect(..)))
            .count()
    }

    /// Sum of all translations recorded.
    pub fn total_translation(&self) -> (f32, f32) {
        self.commands.iter().fold((0.0, 0.0), |(x, y), c| match c {
            DrawCommand::Translate(dx, dy) => (x + dx, y + dy),
            _ => (x, y),
        })
    }
}

impl Surface for RecordingSurface {
    fn translate(&mut self, dx: f32, dy: f32) {
        self.commands.push(DrawCommand::Translate(dx, dy));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::Alpha(alpha));
    }

    fn set_fill(&mut self, style: &str) {
        self.commands.push(DrawCommand::Fill(style.to_string()));
    }

    fn set_stroke(&mut self, style: &str) {
        self.commands.push(DrawCommand::Stroke(style.to_string()));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::FillRect(x, y, w, h));
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::StrokeRect(x, y, w, h));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::Text(text.to_string(), x, y));
    }

    fn measure_text(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    fn draw_image(&mut self, image: &str, blit: Blit) {
        self.commands.push(DrawCommand::Image(image.to_string(), blit));
    }
}

// =============================================================================
// TONE DEVICE
// =============================================================================

/// Abstract tone-generation device.
pub trait ToneDevice {
    /// Device time in seconds.
    fn current_time(&self) -> f64;
    /// Schedule one tone.
    fn schedule(&mut self, tone: Tone);
}

/// Device that records scheduled tones.
#[derive(Clone, Debug, Default)]
pub struct RecordingDevice {
    /// Device time (seconds).
    pub time: f64,
    /// Tones in scheduling order.
    pub tones: Vec<Tone>,
}

impl RecordingDevice {
    /// Create a device whose clock starts at `time`.
    pub fn at(time: f64) -> Self {
        Self { time, tones: Vec::new() }
    }

    /// Advance device time.
    pub fn advance(&mut self, seconds: f64) {
        self.time += seconds;
    }
}

impl ToneDevice for RecordingDevice {
    fn current_time(&self) -> f64 {
        self.time
    }

    fn schedule(&mut self, tone: Tone) {
        self.tones.push(tone);
    }
}

// =============================================================================
// CLOCK
// =============================================================================

/// Monotonic clock in milliseconds.
pub trait Clock {
    /// Current time (ms).
    fn now_ms(&self) -> f64;
}

/// Clock advanced by hand.
///
/// Clones share the same time, so a test can keep one handle while the
/// kit owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Clock starting at 0 ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the absolute time.
    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    /// Advance by `ms`.
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

// =============================================================================
// KEY/VALUE STORE
// =============================================================================

/// Host-provided persistent string store.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value.
    fn set(&mut self, key: &str, value: String);
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        (**self).set(key, value);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

// =============================================================================
// INPUT SOURCE
// =============================================================================

/// Pointer/keyboard event source.
pub trait InputSource {
    /// Drain events received since the last poll.
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

/// Input source fed by hand.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    pending: Vec<InputEvent>,
}

impl ScriptedInput {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next poll.
    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }
}

// =============================================================================
// ASSET LOADER
// =============================================================================

/// Image/audio loader returning futures that resolve once loaded.
pub trait AssetLoader {
    /// Loaded image handle.
    type Image;
    /// Loaded audio handle.
    type Audio;

    /// Load an image.
    fn load_image(&self, src: &str) -> LocalBoxFuture<'_, Result<Self::Image, AssetError>>;
    /// Load an audio clip.
    fn load_audio(&self, src: &str) -> LocalBoxFuture<'_, Result<Self::Audio, AssetError>>;
}

/// Load every image in `sources`, failing on the first error.
pub async fn preload_images<L: AssetLoader>(
    loader: &L,
    sources: &[&str],
) -> Result<Vec<L::Image>, AssetError> {
    future::try_join_all(sources.iter().map(|src| loader.load_image(src))).await
}

/// Loader serving assets from memory as raw bytes.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssets {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryAssets {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset.
    pub fn insert(&mut self, src: &str, bytes: Vec<u8>) {
        self.files.insert(src.to_string(), bytes);
    }

    fn fetch(&self, src: &str) -> Result<Vec<u8>, AssetError> {
        match self.files.get(src) {
            Some(bytes) if bytes.is_empty() => Err(AssetError::Decode {
                src: src.to_string(),
                reason: "empty file".to_string(),
            }),
            Some(bytes) => Ok(bytes.clone()),
            None => Err(AssetError::NotFound(src.to_string())),
        }
    }
}

impl AssetLoader for MemoryAssets {
    type Image = Vec<u8>;
    type Audio = Vec<u8>;

    fn load_image(&self, src: &str) -> LocalBoxFuture<'_, Result<Vec<u8>, AssetError>> {
        future::ready(self.fetch(src)).boxed_local()
    }

    fn load_audio(&self, src: &str) -> LocalBoxFuture<'_, Result<Vec<u8>, AssetError>> {
        future::ready(self.fetch(src)).boxed_local()
    }
}

// =============================================================================
// TESTS
// =============================================================================
