//! Game Kit Bundle
//!
//! One [`GameKit`] per game document. It owns the default singletons that
//! generated game code reaches for (random stream, cooldowns, timers,
//! particles, shake, logger, dialogue, timeline, sequencer, save storage,
//! input state, frame metrics) plus the host clock, and wraps the common calls so a game can write
//! `kit.cooldown_ready("fire", 200.0)` instead of threading the time around.
//!
//! ## Installation
//!
//! A document may run its setup code more than once (hot reload, repeated
//! script tags). [`install`] only builds a kit when the slot is empty, so
//! state such as the RNG stream survives a second install.

use std::fmt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::audio::{self, Note, Sequencer, Tone, Waveform};
use crate::config::KitConfig;
use crate::core::rng::Rng;
use crate::error::KitResult;
use crate::fx::camera::CameraShake;
use crate::fx::particles::Particles;
use crate::host::{Clock, InputSource, KeyValueStore, MemoryStore, Surface, ToneDevice};
use crate::motion::metrics::Metrics;
use crate::motion::timers::{Cooldowns, Timeline, Timers};
use crate::state::dialogue::{Dialogue, Logger};
use crate::state::input::{GamepadState, InputState};
use crate::state::storage::Storage;

/// `update_particles` reads any `dt` above this as milliseconds.
pub const MS_HEURISTIC_THRESHOLD: f32 = 10.0;

/// Save storage over whichever store the host supplied.
pub type KitStorage = Storage<Box<dyn KeyValueStore>>;

/// Default singletons for one game document.
pub struct GameKit {
    config: KitConfig,
    clock: Box<dyn Clock>,
    /// Shared random stream
    pub rng: Rng,
    /// Named rate limiters
    pub cooldowns: Cooldowns,
    /// One-shot timers
    pub timers: Timers,
    /// Scripted steps by time
    pub timeline: Timeline,
    /// Spark bursts
    pub particles: Particles,
    /// Screen shake
    pub shake: CameraShake,
    /// On-screen log
    pub logger: Logger,
    /// Dialogue queue
    pub dialogue: Dialogue,
    /// Tone scheduling with the configured fallback tempo
    pub sequencer: Sequencer,
    /// Save/load under the configured slot prefix
    pub storage: KitStorage,
    /// Keyboard and pointer state
    pub input: InputState,
    /// First gamepad, as last reported by the host
    pub gamepad: GamepadState,
    /// Frame rate
    pub metrics: Metrics,
}

impl GameKit {
    /// Build a kit from `config`, reading time from `clock`.
    ///
    /// Saves go to an in-memory store until [`GameKit::with_store`] hands
    /// the kit the host's persistent one.
    pub fn new(config: KitConfig, clock: impl Clock + 'static) -> Self {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        let storage = Storage::new(store, config.slot_prefix.clone());
        let metrics = Metrics::new(clock.now_ms());
        Self {
            rng: Rng::new(config.rng_seed),
            cooldowns: Cooldowns::new(),
            timers: Timers::new(),
            timeline: Timeline::new(),
            particles: Particles::with_config(config.particles.clone()),
            shake: CameraShake::new(config.shake.clone()),
            logger: Logger::new(config.logger_capacity),
            dialogue: Dialogue::new(),
            sequencer: Sequencer::new(config.sequencer.bpm),
            storage,
            input: InputState::new(),
            gamepad: GamepadState::default(),
            metrics,
            clock: Box::new(clock),
            config,
        }
    }

    /// Persist saves through `store`, keeping the configured slot prefix.
    pub fn with_store(mut self, store: impl KeyValueStore + 'static) -> Self {
        let store: Box<dyn KeyValueStore> = Box::new(store);
        self.storage = Storage::new(store, self.config.slot_prefix.clone());
        self
    }

    /// Configuration the kit was built with.
    pub fn config(&self) -> &KitConfig {
        &self.config
    }

    /// Host time in milliseconds.
    pub fn now(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Value in [min, max) from the shared stream.
    pub fn rand(&mut self, min: f64, max: f64) -> f64 {
        self.rng.range(min, max)
    }

    /// Uniform pick from the shared stream.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.rng.choose(items)
    }

    /// [`Cooldowns::ready`] at the current time.
    pub fn cooldown_ready(&mut self, key: &str, ms: f64) -> bool {
        let now = self.now();
        self.cooldowns.ready(key, ms, now)
    }

    /// Run `callback` on the first `tick` at least `ms` from now.
    pub fn after(&mut self, ms: f64, callback: impl FnMut() + 'static) {
        let now = self.now();
        self.timers.after(ms, now, callback);
    }

    /// Fire due timers and timeline steps. Returns how many ran.
    pub fn tick(&mut self) -> usize {
        let now = self.now();
        self.timers.tick(now) + self.timeline.run(now)
    }

    /// Burst at (x, y); `None` uses the configured count.
    pub fn spawn_particles(&mut self, x: f32, y: f32, count: Option<usize>) {
        let count = count.unwrap_or(self.particles.config().count);
        self.particles.spawn(&mut self.rng, x, y, count);
    }

    /// Advance and prune particles.
    ///
    /// Game loops pass either seconds or milliseconds; any `dt` above
    /// [`MS_HEURISTIC_THRESHOLD`] is taken as milliseconds.
    pub fn update_particles(&mut self, dt: f32) {
        let dt = if dt > MS_HEURISTIC_THRESHOLD { dt / 1000.0 } else { dt };
        self.particles.update(dt);
        self.particles.prune();
    }

    /// Draw live particles.
    pub fn draw_particles<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.particles.draw(surface);
    }

    /// Start a shake with the configured strength and decay.
    pub fn shake(&mut self) {
        self.shake.start();
    }

    /// Apply one frame of shake using the shared stream.
    pub fn apply_shake<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<(f32, f32)> {
        self.shake.apply(&mut self.rng, surface)
    }

    /// Push a timestamped line onto the on-screen log.
    pub fn log(&mut self, msg: impl Into<String>) {
        let now = self.now();
        self.logger.push(msg, now);
    }

    /// See [`Storage::save`].
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> KitResult<()> {
        self.storage.save(key, value)
    }

    /// See [`Storage::load`].
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.storage.load(key, default)
    }

    /// See [`Storage::slot_save`].
    pub fn slot_save<T: Serialize + ?Sized>(&mut self, slot: &str, value: &T) -> KitResult<()> {
        self.storage.slot_save(slot, value)
    }

    /// See [`Storage::slot_load`].
    pub fn slot_load<T: DeserializeOwned>(&self, slot: &str, default: T) -> T {
        self.storage.slot_load(slot, default)
    }

    /// Fold everything `source` reported since the last poll into
    /// [`GameKit::input`].
    pub fn poll_input(&mut self, source: &mut impl InputSource) {
        self.input.poll(source);
    }

    /// True while `key` is held.
    pub fn is_down(&self, key: &str) -> bool {
        self.input.is_down(key)
    }

    /// Record a frame at the current time and return the frame rate.
    pub fn frame(&mut self) -> f64 {
        let now = self.now();
        self.metrics.tick(now)
    }

    /// Rate from the latest [`GameKit::frame`].
    pub fn fps(&self) -> f64 {
        self.metrics.fps()
    }

    /// See [`Sequencer::play`].
    pub fn play<D: ToneDevice + ?Sized>(&self, device: &mut D, pattern: &[Note], bpm: f64) -> Vec<Tone> {
        self.sequencer.play(device, pattern, bpm)
    }

    /// See [`Sequencer::track`].
    pub fn track<D: ToneDevice + ?Sized>(&self, device: &mut D, steps: &[Option<Note>], bpm: f64) -> Vec<Tone> {
        self.sequencer.track(device, steps, bpm)
    }

    /// See [`audio::beep`].
    pub fn beep<D: ToneDevice + ?Sized>(
        &self,
        device: &mut D,
        frequency: f64,
        duration: f64,
        waveform: Waveform,
        volume: f64,
    ) -> Tone {
        audio::beep(device, frequency, duration, waveform, volume)
    }
}

impl fmt::Debug for GameKit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameKit")
            .field("seed", &self.rng.seed())
            .field("timers", &self.timers.len())
            .field("particles", &self.particles.len())
            .field("shaking", &self.shake.is_active())
            .field("log_lines", &self.logger.len())
            .field("keys_down", &self.input.keys().count())
            .field("fps", &self.metrics.fps())
            .finish()
    }
}

/// Build the kit into `slot` unless one is already there.
///
/// Returns the kit in the slot either way; a second call leaves the
/// existing kit (and its RNG position, timers and log) untouched.
pub fn install(slot: &mut Option<GameKit>, config: KitConfig, clock: impl Clock + 'static) -> &mut GameKit {
    if slot.is_some() {
        debug!("kit already installed, keeping existing instance");
    }
    slot.get_or_insert_with(|| {
        info!(seed = config.rng_seed, slot_prefix = %config.slot_prefix, "installing game kit");
        GameKit::new(config, clock)
    })
}

/// Flat names for game code written before the namespaced API.
pub mod legacy {
    use super::{GameKit, KitStorage};
    use crate::core::rng::Rng;
    use crate::fx::camera::CameraShake;
    use crate::fx::particles::Particles;
    use crate::motion::timers::Timers;
    use crate::state::input::InputState;

    pub use crate::core::math::{clamp, lerp, map_range as map};

    /// Value in [min, max) from the kit's stream.
    pub fn rand(kit: &mut GameKit, min: f64, max: f64) -> f64 {
        kit.rand(min, max)
    }

    /// Uniform pick from the kit's stream.
    pub fn choice<'a, T>(kit: &mut GameKit, items: &'a [T]) -> Option<&'a T> {
        kit.choice(items)
    }

    /// Host time in milliseconds.
    pub fn now(kit: &GameKit) -> f64 {
        kit.now()
    }

    /// The kit's random stream.
    pub fn rng(kit: &mut GameKit) -> &mut Rng {
        &mut kit.rng
    }

    /// The kit's save storage.
    pub fn storage(kit: &mut GameKit) -> &mut KitStorage {
        &mut kit.storage
    }

    /// The kit's input state.
    pub fn input(kit: &GameKit) -> &InputState {
        &kit.input
    }

    /// True while `key` is held.
    pub fn is_down(kit: &GameKit, key: &str) -> bool {
        kit.is_down(key)
    }

    /// The kit's one-shot timers.
    pub fn timers(kit: &mut GameKit) -> &mut Timers {
        &mut kit.timers
    }

    /// The kit's camera shake.
    pub fn camera(kit: &mut GameKit) -> &mut CameraShake {
        &mut kit.shake
    }

    /// The kit's particle pool.
    pub fn particles(kit: &mut GameKit) -> &mut Particles {
        &mut kit.particles
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ManualClock, MemoryStore, RecordingSurface, ScriptedInput};
    use crate::state::input::InputEvent;
    use std::cell::Cell;
    use std::rc::Rc;

    fn kit() -> (GameKit, ManualClock) {
        let clock = ManualClock::new();
        (GameKit::new(KitConfig::default(), clock.clone()), clock)
    }

    #[test]
    fn test_default_seed_stream() {
        let (mut kit, _) = kit();
        let mut reference = Rng::new(1_234_567);
        assert_eq!(kit.rand(0.0, 1.0), reference.next());
    }

    #[test]
    fn test_install_is_idempotent() {
        let mut slot = None;
        install(&mut slot, KitConfig::default(), ManualClock::new()).rand(0.0, 1.0);
        let seed_after_first = slot.as_ref().map(|k| k.rng.seed());

        let other = KitConfig { rng_seed: 99, ..KitConfig::default() };
        let kit = install(&mut slot, other, ManualClock::new());
        assert_eq!(Some(kit.rng.seed()), seed_after_first);
        assert_eq!(kit.config().rng_seed, 1_234_567);
    }

    #[test]
    fn test_cooldown_uses_clock() {
        let (mut kit, clock) = kit();
        assert!(kit.cooldown_ready("fire", 200.0));
        clock.advance(199.0);
        assert!(!kit.cooldown_ready("fire", 200.0));
        clock.advance(1.0);
        assert!(kit.cooldown_ready("fire", 200.0));
    }

    #[test]
    fn test_after_and_timeline_fire_on_tick() {
        let (mut kit, clock) = kit();
        let fired = Rc::new(Cell::new(0));

        let f = fired.clone();
        kit.after(100.0, move || f.set(f.get() + 1));
        let f = fired.clone();
        kit.timeline.add(50.0, move || f.set(f.get() + 10));

        assert_eq!(kit.tick(), 0);
        clock.set(60.0);
        assert_eq!(kit.tick(), 1);
        clock.set(100.0);
        assert_eq!(kit.tick(), 1);
        assert_eq!(fired.get(), 11);
        assert_eq!(kit.tick(), 0);
    }

    #[test]
    fn test_update_particles_ms_heuristic() {
        let (mut kit, _) = kit();
        kit.spawn_particles(0.0, 0.0, None);
        assert_eq!(kit.particles.len(), 20);

        // 16 reads as 16 ms: nothing with life >= 0.4 s dies.
        kit.update_particles(16.0);
        assert_eq!(kit.particles.len(), 20);

        // 1000 ms kills every particle and prunes it.
        kit.update_particles(1000.0);
        assert!(kit.particles.is_empty());
    }

    #[test]
    fn test_shake_through_kit() {
        let (mut kit, _) = kit();
        let mut surface = RecordingSurface::new();
        assert!(kit.apply_shake(&mut surface).is_none());
        kit.shake();
        let mut frames = 0;
        while kit.apply_shake(&mut surface).is_some() {
            frames += 1;
        }
        // 6 * 0.9^n < 0.3 first at n = 29.
        assert_eq!(frames, 29);
    }

    #[test]
    fn test_log_timestamps() {
        let (mut kit, clock) = kit();
        clock.set(42.0);
        kit.log("hello");
        let entry = kit.logger.entries().next().cloned().unwrap();
        assert_eq!((entry.msg.as_str(), entry.t), ("hello", 42.0));
    }

    #[test]
    fn test_legacy_names() {
        let (mut kit, _) = kit();
        assert_eq!(legacy::clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(legacy::lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(legacy::map(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
        let r = legacy::rand(&mut kit, 2.0, 3.0);
        assert!((2.0..3.0).contains(&r));
        assert_eq!(legacy::choice(&mut kit, &[7]), Some(&7));
        assert_eq!(legacy::now(&kit), 0.0);
    }

    #[test]
    fn test_legacy_namespaces() {
        let (mut kit, _) = kit();
        legacy::storage(&mut kit).slot_save("1", &5u32).unwrap();
        assert_eq!(kit.slot_load("1", 0u32), 5);

        legacy::particles(&mut kit).clear();
        legacy::camera(&mut kit).start();
        assert!(kit.shake.is_active());
        assert_eq!(legacy::timers(&mut kit).len(), 0);
        let seed = legacy::rng(&mut kit).seed();
        assert_eq!(seed, kit.rng.seed());
        assert!(!legacy::is_down(&kit, "Space"));
        assert!(legacy::input(&kit).keys().next().is_none());
    }

    #[test]
    fn test_storage_uses_slot_prefix_and_host_store() {
        let config = KitConfig { slot_prefix: "demo_".into(), ..KitConfig::default() };
        let mut kit = GameKit::new(config, ManualClock::new()).with_store(MemoryStore::new());

        kit.slot_save("a", &[1, 2, 3]).unwrap();
        kit.save("best", &900u32).unwrap();
        assert_eq!(kit.storage.store().get("demo_a").as_deref(), Some("[1,2,3]"));
        assert_eq!(kit.slot_load("a", Vec::<u32>::new()), vec![1, 2, 3]);
        assert_eq!(kit.load("best", 0u32), 900);
        assert_eq!(kit.load("missing", 7u32), 7);
    }

    #[test]
    fn test_poll_input() {
        let (mut kit, _) = kit();
        let mut source = ScriptedInput::new();
        source.push(InputEvent::KeyDown("ArrowLeft".into()));
        source.push(InputEvent::PointerMove(12.0, 34.0));
        kit.poll_input(&mut source);

        assert!(kit.is_down("ArrowLeft"));
        assert_eq!((kit.input.mouse.x, kit.input.mouse.y), (12.0, 34.0));

        source.push(InputEvent::KeyUp("ArrowLeft".into()));
        kit.poll_input(&mut source);
        assert!(!kit.is_down("ArrowLeft"));
    }

    #[test]
    fn test_frame_rate_from_clock() {
        let (mut kit, clock) = kit();
        assert_eq!(kit.fps(), 0.0);
        clock.advance(20.0);
        assert_eq!(kit.frame(), 50.0);
        clock.advance(10.0);
        kit.frame();
        assert_eq!(kit.fps(), 100.0);
    }
}
