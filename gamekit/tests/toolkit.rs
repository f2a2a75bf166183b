//! End-to-end behaviour of the toolkit through its public API.

use std::collections::BTreeMap;

use gamekit::audio::{note_to_freq, Note};
use gamekit::error::AssetError;
use gamekit::host::{
    preload_images, DrawCommand, KeyValueStore, ManualClock, MemoryAssets, MemoryStore,
    RecordingDevice, RecordingSurface, ScriptedInput,
};
use gamekit::fx::sprites;
use gamekit::kit::legacy;
use gamekit::motion::{Tween, TweenStatus};
use gamekit::state::{InputEvent, Storage};
use gamekit::world::grammar::{expand, Rule, Rules};
use gamekit::world::{a_star_grid, Grid, GridPos, NavMesh};
use gamekit::{install, Easing, GameKit, KitConfig, Rng, World};
use serde_json::json;

fn p(x: i32, y: i32) -> GridPos {
    GridPos::new(x, y)
}

fn kit() -> (GameKit, ManualClock) {
    let clock = ManualClock::new();
    (GameKit::new(KitConfig::default(), clock.clone()), clock)
}

#[test]
fn test_rng_streams_identical_and_in_range() {
    let mut a = Rng::new(2024);
    let mut b = Rng::new(2024);
    for _ in 0..1000 {
        let x = a.next();
        assert_eq!(x.to_bits(), b.next().to_bits());
        assert!((0.0..1.0).contains(&x));
    }
}

#[test]
fn test_ecs_removed_entity_leaves_every_query() {
    let mut world = World::new();
    let e = world.create();
    let other = world.create();
    world.add(e, "pos", json!({"x": 1, "y": 2}));
    world.add(e, "vel", json!({"x": 0, "y": 0}));
    world.add(other, "pos", json!({"x": 5, "y": 5}));

    world.remove(e);

    assert!(!world.has(e, "pos"));
    assert!(world.get(e, "pos").is_none());
    assert_eq!(world.query(&["pos"]), vec![other]);
    assert!(world.query(&["vel"]).is_empty());
    assert!(world.query(&["pos", "vel"]).is_empty());
}

#[test]
fn test_astar_open_grid() {
    let grid = Grid::new(5, 5);
    let path = a_star_grid(&grid, p(0, 0), p(4, 4));
    assert_eq!(path.len(), 9);
    assert_eq!(path.first(), Some(&p(0, 0)));
    assert_eq!(path.last(), Some(&p(4, 4)));
}

#[test]
fn test_find_path_blocked_or_enclosed_goal() {
    let blocked = Grid::parse(
        "
        .....
        .....
        ....#
        ",
    );
    let mesh = NavMesh::new(&blocked, false);
    assert!(mesh.find_path(p(0, 0), p(4, 2)).is_empty());

    let enclosed = Grid::parse(
        "
        .......
        ..###..
        ..#.#..
        ..###..
        ",
    );
    for diagonal in [false, true] {
        let mesh = NavMesh::new(&enclosed, diagonal);
        assert!(mesh.find_path(p(0, 0), p(3, 2)).is_empty());
    }
}

#[test]
fn test_smoothing_straight_corridor() {
    let grid = Grid::new(12, 1);
    let mesh = NavMesh::new(&grid, false);
    assert_eq!(mesh.find_path(p(0, 0), p(11, 0)), vec![p(0, 0), p(11, 0)]);
}

#[test]
fn test_grammar_bounds_and_identity() {
    let mut rules = Rules::new();
    rules.insert('A', Rule::Choice(vec!["AB".into(), "B".into()]));
    let mut rng = Rng::default();
    for _ in 0..100 {
        let out = expand(&rules, "A", 1, &mut rng);
        assert!(["AB", "B"].contains(&out.as_str()));
    }
    assert_eq!(expand(&Rules::new(), "XYZ", 5, &mut rng), "XYZ");
}

#[test]
fn test_note_naming() {
    assert!((note_to_freq("A4") - 440.0).abs() < 1e-6);
    assert!((note_to_freq("A5") - 880.0).abs() < 1e-6);
    assert_eq!(note_to_freq("not a note"), 440.0);
}

#[test]
fn test_sequencer_timing_through_kit() {
    let (kit, _) = kit();
    let mut device = RecordingDevice::at(3.5);
    let pattern = [Note::default().beats(1.0), Note::default().beats(2.0)];
    let tones = kit.play(&mut device, &pattern, 60.0);
    assert_eq!(tones[1].start - tones[0].start, 1.0);
    assert_eq!(device.tones.len(), 2);
}

#[test]
fn test_tween_lands_exactly_and_stops() {
    let mut target: BTreeMap<String, f32> = BTreeMap::from([("alpha".to_string(), 0.0)]);
    let mut tween = Tween::start(&target, "alpha", 0.7, 0.5, Easing::InOutQuad).unwrap();

    let mut frames = 0;
    while tween.step(1.0 / 60.0, &mut target) == TweenStatus::Running {
        frames += 1;
        assert!(frames < 100);
    }
    assert_eq!(target["alpha"], 0.7);

    target.insert("alpha".to_string(), -1.0);
    assert_eq!(tween.step(1.0 / 60.0, &mut target), TweenStatus::Complete);
    assert_eq!(target["alpha"], -1.0);
}

#[test]
fn test_particles_drain() {
    let (mut kit, _) = kit();
    kit.spawn_particles(50.0, 50.0, Some(10));
    assert_eq!(kit.particles.len(), 10);

    let mut surface = RecordingSurface::new();
    let mut frames = 0;
    while !kit.particles.is_empty() {
        kit.update_particles(1.0 / 60.0);
        kit.draw_particles(&mut surface);
        frames += 1;
        assert!(frames <= 61, "particles outlived their maximum life");
    }
    assert!(surface.fill_rect_count() > 0);
}

#[test]
fn test_storage_corrupt_value_uses_default() {
    let config = KitConfig::default();
    let mut store = MemoryStore::new();
    store.set("gf_slot_1", "{not json".to_string());
    let mut storage = Storage::new(store, config.slot_prefix);

    assert_eq!(storage.slot_load("1", 7u32), 7);
    storage.slot_save("2", &41u32).unwrap();
    assert_eq!(storage.slot_load("2", 0u32), 41);
    assert_eq!(storage.store().get("gf_slot_2").as_deref(), Some("41"));
}

#[test]
fn test_install_twice_keeps_state() {
    let mut slot = None;
    let clock = ManualClock::new();
    let first = install(&mut slot, KitConfig::default(), clock.clone()).rand(0.0, 1.0);
    let second = install(&mut slot, KitConfig::default(), clock).rand(0.0, 1.0);

    let mut fresh = Rng::default();
    assert_eq!(first, fresh.next());
    assert_eq!(second, fresh.next());
}

#[test]
fn test_kit_saves_through_host_store() {
    let mut kit = GameKit::new(KitConfig::default(), ManualClock::new()).with_store(MemoryStore::new());
    kit.slot_save("1", &"checkpoint").unwrap();
    assert_eq!(kit.storage.store().get("gf_slot_1").as_deref(), Some("\"checkpoint\""));
    assert_eq!(kit.slot_load("1", String::new()), "checkpoint");

    legacy::storage(&mut kit).save("volume", &0.5f64).unwrap();
    assert_eq!(kit.load("volume", 1.0f64), 0.5);
}

#[test]
fn test_kit_input_polling() {
    let (mut kit, _) = kit();
    let mut source = ScriptedInput::new();
    source.push(InputEvent::KeyDown(" ".into()));
    source.push(InputEvent::PointerDown);
    kit.poll_input(&mut source);

    assert!(kit.is_down(" "));
    assert!(legacy::is_down(&kit, " "));
    assert!(legacy::input(&kit).mouse.down);
}

#[test]
fn test_sprite_frame_and_fps() {
    let (mut kit, clock) = kit();
    let mut surface = RecordingSurface::new();
    sprites::draw(&mut surface, "coin.png", 2, 10.0, 12.0, 5.0, 6.0, 1.5);
    match &surface.commands[..] {
        [DrawCommand::Image(src, blit)] => {
            assert_eq!(src, "coin.png");
            assert_eq!((blit.sx, blit.sw, blit.sh), (20.0, 10.0, 12.0));
            assert_eq!((blit.dx, blit.dy, blit.dw, blit.dh), (5.0, 6.0, 15.0, 18.0));
        }
        other => panic!("unexpected commands {other:?}"),
    }

    clock.advance(16.0);
    assert_eq!(kit.frame(), 62.5);
}

#[tokio::test]
async fn test_asset_failures_reject() {
    let mut assets = MemoryAssets::new();
    assets.insert("hero.png", vec![1, 2, 3]);
    assets.insert("broken.png", Vec::new());

    let ok = preload_images(&assets, &["hero.png"]).await.unwrap();
    assert_eq!(ok, vec![vec![1, 2, 3]]);

    let err = preload_images(&assets, &["hero.png", "missing.png"]).await.unwrap_err();
    assert_eq!(err, AssetError::NotFound("missing.png".into()));

    let err = preload_images(&assets, &["broken.png"]).await.unwrap_err();
    assert!(matches!(err, AssetError::Decode { .. }));
}
