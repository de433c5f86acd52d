//! Headless demo: builds a small puzzle scene, replays a scripted pointer
//! session against it, and prints the final render list as JSON.

use std::time::Duration;

use playfield::config::EngineConfig;
use playfield::element::Element;
use playfield::engine::{Cleanup, Engine};
use playfield::geometry::{Rect, Vector2};
use playfield::gesture::{self, SnapDrag, SnapTarget};
use playfield::scene::SceneHost;
use playfield::storage::{MemoryStorage, Storage};

const FRAME: Duration = Duration::from_millis(16);
const PIECE_SIZE: f32 = 80.0;
const SNAP_RADIUS: f32 = 24.0;
const ANCHOR_DISTANCE: f32 = 10.0;

fn main() {
    tracing_subscriber::fmt::init();

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "bad configuration; using defaults");
            EngineConfig::default()
        }
    };
    tracing::info!(width = config.width, height = config.height, seed = config.seed, "starting demo");

    let mut storage = MemoryStorage::new();
    let mut engine = Engine::new(config);
    let fade = engine.config().fade_duration;
    engine.set_scene(puzzle_scene, fade);
    run_frames(&mut engine, fade);

    // Drag the piece onto its target, then tap the reset button.
    let piece_center = engine.scene().bounds().mid() - Vector2::new(200.0, 0.0);
    let target_center = engine.scene().bounds().mid() + Vector2::new(200.0, 0.0);
    press(&mut engine, piece_center);
    for step in 1..=20u8 {
        let amount = f32::from(step) / 20.0;
        engine.drag(piece_center + (target_center - piece_center) * amount);
    }
    engine.release(target_center);

    let button = engine.scene().bounds().mid() + Vector2::new(0.0, 300.0);
    press(&mut engine, button);
    engine.release(button);
    run_frames(&mut engine, fade * 3);

    let solved = storage.get_int_or("solved", 0);
    storage.set_int("solved", solved + 1);
    tracing::info!(solved = storage.get_int_or("solved", 0), "session finished");

    match serde_json::to_string_pretty(&engine.render_list()) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "failed to serialize render list"),
    }
}

fn press(engine: &mut Engine, point: Vector2) {
    if let Err(e) = engine.press(point) {
        tracing::error!(error = %e, "press rejected");
    }
}

fn run_frames(engine: &mut Engine, total: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed <= total {
        engine.next_frame(FRAME);
        elapsed += FRAME;
    }
}

/// A draggable piece with a label that follows it, a snap target, and a
/// button that fades out and rebuilds the scene.
fn puzzle_scene(engine: &mut Engine) -> Option<Cleanup> {
    let bounds = engine.scene().bounds();
    let size = Vector2::new(PIECE_SIZE, PIECE_SIZE);
    let target_rect = Rect::from_center(bounds.mid() + Vector2::new(200.0, 0.0), size);
    let piece_rect = Rect::from_center(bounds.mid() - Vector2::new(200.0, 0.0), size);

    let scene = engine.scene_mut();
    let target = scene.add_element(Element::new(target_rect));
    let piece = scene.add_element(Element::new(piece_rect).hit_testable(true));
    let label = scene.add_element(Element::new(piece_rect.inflate(Vector2::new(-20.0, -20.0))));
    if let Err(e) = scene.send_to_back(target) {
        tracing::error!(error = %e, "target missing from scene");
    }

    let follow = gesture::follow_parent(engine.scene(), piece, &[label]);
    let handler = SnapDrag::new(
        |_: &Engine| ANCHOR_DISTANCE,
        move |_: &Engine| Some(SnapTarget { point: target_rect.location, radius: SNAP_RADIUS }),
        |_: &mut Engine, element| tracing::info!(?element, "piece snapped"),
    )
    .on_move(follow)
    .coerce_location(|engine: &Engine, rect: Rect| rect.restricted_location(engine.scene().bounds()))
    .into_handler();
    if let Some(element) = engine.scene_mut().element_mut(piece) {
        element.set_press_handler(Some(handler));
    }

    let button_rect = Rect::from_center(bounds.mid() + Vector2::new(0.0, 300.0), Vector2::new(160.0, 60.0));
    let restart = gesture::click(|engine: &mut Engine| {
        let duration = engine.config().fade_duration;
        engine.start_fade(move |engine: &mut Engine| engine.set_scene(puzzle_scene, duration), duration);
    });
    engine.scene_mut().add_element(Element::interactive(button_rect, restart));

    Some(Box::new(|engine: &mut Engine| {
        tracing::debug!(elements = engine.scene().len(), "puzzle scene torn down");
    }))
}
