//! GameKit Demo
//!
//! Headless walkthrough of the toolkit against recording host devices.
//! Generates a level, routes across it, runs a few ECS frames, schedules a
//! melody, bursts particles and clicks some widgets, logging what happened.
//! Running it twice with the same config prints the same fingerprints.
//!
//! Usage: `gamekit-demo [config.json]`

use std::collections::BTreeMap;
use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gamekit::{
    VERSION,
    audio::{Note, Waveform},
    config::KitConfig,
    core::{Easing, Rng, Vec2},
    fx::SpriteSheet,
    host::{ManualClock, RecordingDevice, RecordingSurface, ScriptedInput},
    kit::{install, GameKit},
    motion::TweenSet,
    state::{InputEvent, World},
    ui::{self, Widget},
    world::{
        grammar::{expand, parse_rules, to_grid, Carver},
        path_fingerprint, Cell, Grid, GridPos, NavMesh,
    },
};

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("GameKit demo v{}", VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            KitConfig::from_json(&json).with_context(|| format!("parsing config {path}"))?
        }
        None => KitConfig::default(),
    };
    info!("RNG seed: {}", config.rng_seed);

    let clock = ManualClock::new();
    let mut slot = None;
    let kit = install(&mut slot, config, clock.clone());

    demo_level(kit)?;
    demo_ecs();
    demo_audio(kit);
    demo_effects(kit, &clock);
    demo_ui();
    demo_input(kit);
    demo_storage(kit)?;

    for entry in kit.logger.entries() {
        info!("log @{:>6.1}ms: {}", entry.t, entry.msg);
    }
    Ok(())
}

/// Build a cave from a weighted grammar, carve a tunnel with a turtle
/// program, and route across both.
fn demo_level(kit: &mut GameKit) -> Result<()> {
    info!("=== Level ===");

    let seed = kit.rng.seed();
    let cave = generate_cave(&mut kit.rng)?;
    info!("Cave {}x{}, {} free cells", cave.width(), cave.height(), cave.free_count());
    info!("Cave fingerprint: {}", hex::encode(cave.fingerprint()));

    let replay = generate_cave(&mut Rng::new(seed))?;
    if replay.fingerprint() == cave.fingerprint() {
        info!("DETERMINISM VERIFIED: cave regenerated identically");
    } else {
        info!("DETERMINISM FAILURE: cave differs on replay");
    }

    let mesh = NavMesh::new(&cave, true);
    let start = GridPos::new(0, 0);
    let goal = GridPos::new(cave.width() as i32 - 1, cave.height() as i32 - 1);
    let path = mesh.find_path(start, goal);
    if path.is_empty() {
        info!("No route from {:?} to {:?}", start, goal);
    } else {
        info!("Route {:?} -> {:?}: {} waypoints {:?}", start, goal, path.len(), path);
        info!("Route fingerprint: {}", hex::encode(path_fingerprint(&path)));
    }

    let tunnel_rules = parse_rules(r#"{"X": ["FFX", "F+FX", "F-FX", "F[+FF]X"]}"#)?;
    let depth = kit.config().grammar_depth;
    let program = expand(&tunnel_rules, "X", depth, &mut kit.rng);
    let mut carver = Carver::new(24, 24);
    let end = carver.carve(&program, GridPos::new(12, 12));
    let tunnel = carver.into_grid();
    info!("Tunnel program {:?} ends at {:?}, {} cells carved", program, end.pos(), tunnel.free_count());
    kit.log(format!("level ready, route of {} waypoints", path.len()));
    Ok(())
}

fn generate_cave(rng: &mut Rng) -> Result<Grid> {
    let rules = parse_rules(r##"{"R": {".": 3, "#": 1}}"##)?;
    let mut grid = to_grid(&expand(&rules, &"R".repeat(16 * 12), 1, rng), 16, '#');
    grid.set(GridPos::new(0, 0), Cell::Free);
    grid.set(GridPos::new(15, 11), Cell::Free);
    Ok(grid)
}

#[derive(Clone, Copy, Debug)]
enum Part {
    Pos(Vec2),
    Vel(Vec2),
}

fn demo_ecs() {
    info!("=== ECS ===");

    let mut world: World<Part> = World::new();
    for i in 0..3 {
        let e = world.create();
        world.add(e, "pos", Part::Pos(Vec2::new(i as f32 * 10.0, 0.0)));
        if i != 1 {
            world.add(e, "vel", Part::Vel(Vec2::new(1.0, 0.5)));
        }
    }

    world.system(&["pos", "vel"], |_, parts, dt| {
        if let [pos, vel] = parts {
            if let (Part::Pos(p), Part::Vel(v)) = (&mut **pos, &**vel) {
                *p = *p + v.scale(dt * 60.0);
            }
        }
    });

    for _ in 0..60 {
        world.update(1.0 / 60.0);
    }
    for e in world.query(&["pos"]) {
        info!("{} at {:?}", e, world.get(e, "pos"));
    }
}

fn demo_audio(kit: &mut GameKit) {
    info!("=== Audio ===");

    let mut device = RecordingDevice::default();
    let melody = [
        Note::new("E4"),
        Note::new("G4"),
        Note::new("A4").beats(2.0),
        Note::new("C5").waveform(Waveform::Triangle),
    ];
    let tones = kit.play(&mut device, &melody, 140.0);
    info!("Melody: {} tones, last stops at {:.3}s", tones.len(), tones.last().map_or(0.0, |t| t.stop));

    let drums = [Some(Note::new(110.0)), None, Some(Note::new(110.0)), None];
    kit.track(&mut device, &drums, 140.0);
    kit.beep(&mut device, 880.0, 120.0, Waveform::Square, 0.2);
    info!("Device queue: {} tones", device.tones.len());
}

fn demo_effects(kit: &mut GameKit, clock: &ManualClock) {
    info!("=== Effects ===");

    let mut surface = RecordingSurface::new();
    let hero = SpriteSheet::new("hero.png", 16.0, 16.0, 4);
    let started = kit.now();
    kit.spawn_particles(100.0, 100.0, None);
    kit.shake();
    let mut frames = 0;
    while !kit.particles.is_empty() {
        clock.advance(16.0);
        kit.frame();
        kit.update_particles(16.0);
        kit.draw_particles(&mut surface);
        hero.draw(&mut surface, hero.frame_at(kit.now() - started, 8.0), 90.0, 90.0, 2.0);
        kit.apply_shake(&mut surface);
        frames += 1;
    }
    let (dx, dy) = surface.total_translation();
    info!(
        "Particles gone after {} frames at {:.1} fps, {} rects drawn, net shake ({:.2}, {:.2})",
        frames,
        kit.fps(),
        surface.fill_rect_count(),
        dx,
        dy
    );

    let mut target: BTreeMap<String, f32> = BTreeMap::from([("x".to_string(), 0.0)]);
    let mut tweens = TweenSet::new();
    tweens.start(&target, "x", 100.0, 1.0, Easing::InOutQuad);
    while tweens.step(0.25, &mut target) > 0 {
        info!("tween x = {:.2}", target["x"]);
    }
    info!("tween done, x = {:.2}", target["x"]);
    kit.log(format!("effects ran for {frames} frames"));
}

fn demo_ui() {
    info!("=== UI ===");

    let mut widgets = vec![
        Widget::button("play", "Play", 20.0, 20.0, 120.0, 32.0),
        Widget::slider("speed", "Speed", 20.0, 80.0, 120.0, 0.5, 2.0, 1.0),
        Widget::checkbox("music", "Music", 20.0, 120.0, true),
    ];
    ui::update_hover(&mut widgets, 30.0, 30.0);
    let mut events = ui::handle_click(&mut widgets, 30.0, 30.0);
    events.extend(ui::handle_drag(&mut widgets, 110.0, 90.0));
    events.extend(ui::handle_click(&mut widgets, 25.0, 125.0));
    for event in &events {
        info!("{:?}", event);
    }

    let mut surface = RecordingSurface::new();
    ui::draw(&mut surface, &widgets);
    info!("UI drew {} commands", surface.commands.len());
}

fn demo_input(kit: &mut GameKit) {
    info!("=== Input ===");

    let mut source = ScriptedInput::new();
    source.push(InputEvent::KeyDown("ArrowRight".into()));
    source.push(InputEvent::PointerMove(64.0, 48.0));
    kit.poll_input(&mut source);
    info!(
        "ArrowRight held: {}, pointer at ({}, {})",
        kit.is_down("ArrowRight"),
        kit.input.mouse.x,
        kit.input.mouse.y
    );
}

fn demo_storage(kit: &mut GameKit) -> Result<()> {
    info!("=== Storage ===");

    let progress: BTreeMap<String, u32> = BTreeMap::from([("level".to_string(), 3), ("coins".to_string(), 120)]);
    kit.slot_save("1", &progress)?;
    let loaded: BTreeMap<String, u32> = kit.slot_load("1", BTreeMap::new());
    let missing: u32 = kit.load("high_score", 0);
    info!("Slot 1: {:?}, high score default {}", loaded, missing);
    kit.log("progress saved");
    Ok(())
}
