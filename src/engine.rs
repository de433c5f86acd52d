//! Engine: composition root owning the scene, animations, and visuals.
//!
//! The host drives an engine with pointer events and frame ticks:
//!
//! ```text
//! press / drag / release ──▶ Scene dispatch ──▶ gesture callbacks (&mut Engine)
//! next_frame(dt)         ──▶ AnimationsController ──▶ step / end callbacks (&mut Engine)
//! ```
//!
//! Scene swaps go through [`Engine::set_scene`], which tears the old scene
//! down, builds the new one, and covers the swap with a fading overlay.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::animation::{AnimationHost, AnimationsController, LinearAnimation};
use crate::config::EngineConfig;
use crate::consts::{OPACITY_CLEAR, OPACITY_OPAQUE};
use crate::element::{Element, ElementId};
use crate::geometry::{Rect, Vector2};
use crate::input::InputError;
use crate::random::Variates;
use crate::scene::{Scene, SceneHost};
use crate::visual::{Visual, Visuals};

/// Teardown hook registered by a scene builder; runs before the next scene is built.
pub type Cleanup = Box<dyn FnOnce(&mut Engine)>;

/// One visible element as a renderer sees it.
#[derive(Debug, Clone, Serialize)]
pub struct RenderItem {
    pub id: ElementId,
    pub rect: Rect,
    pub visual: Option<Visual>,
}

pub struct Engine {
    scene: Scene<Engine>,
    animations: AnimationsController<Engine>,
    visuals: Visuals,
    variates: Variates,
    config: EngineConfig,
    cleanup: Option<Cleanup>,
}

impl SceneHost for Engine {
    fn scene(&self) -> &Scene<Self> {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene<Self> {
        &mut self.scene
    }

    /// New gestures wait for input-blocking animations to finish.
    fn allow_input(&self) -> bool {
        self.animations.allow_input()
    }

    fn strict_checks(&self) -> bool {
        self.config.strict_checks
    }
}

impl AnimationHost for Engine {
    fn animations(&self) -> &AnimationsController<Self> {
        &self.animations
    }

    fn animations_mut(&mut self) -> &mut AnimationsController<Self> {
        &mut self.animations
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("scene", &self.scene)
            .field("animations", &self.animations)
            .field("visuals", &self.visuals)
            .field("config", &self.config)
            .field("has_cleanup", &self.cleanup.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scene: Scene::new(config.width, config.height),
            animations: AnimationsController::new(),
            visuals: Visuals::new(),
            variates: Variates::seeded(config.seed),
            config,
            cleanup: None,
        }
    }

    // --- Host inputs ---

    /// Pointer pressed at `point` (scene coordinates).
    ///
    /// # Errors
    ///
    /// Returns [`InputError::PressDuringGesture`] if the previous gesture was
    /// never released.
    pub fn press(&mut self, point: Vector2) -> Result<(), InputError> {
        Scene::press(self, point)
    }

    /// Pointer moved to `point` while pressed.
    pub fn drag(&mut self, point: Vector2) {
        Scene::drag(self, point);
    }

    /// Pointer released at `point`.
    pub fn release(&mut self, point: Vector2) {
        Scene::release(self, point);
    }

    /// Advance all animations by `delta`.
    pub fn next_frame(&mut self, delta: Duration) {
        AnimationsController::next(self, delta);
    }

    // --- Accessors ---

    #[must_use]
    pub fn visuals(&self) -> &Visuals {
        &self.visuals
    }

    pub fn visuals_mut(&mut self) -> &mut Visuals {
        &mut self.visuals
    }

    pub fn variates(&mut self) -> &mut Variates {
        &mut self.variates
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Remove an element together with its visual payload.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        self.visuals.remove(id);
        self.scene.remove_element(id).is_some()
    }

    /// Visible elements in draw order (back first) with their visuals.
    #[must_use]
    pub fn render_list(&self) -> Vec<RenderItem> {
        self.scene
            .visible_elements()
            .map(|(id, element)| RenderItem { id, rect: element.rect, visual: self.visuals.get(id) })
            .collect()
    }

    // --- Fades and scene transitions ---

    /// Full-scene overlay in front of everything. It is hit-testable without a
    /// press handler, so presses on it start no gesture.
    fn add_overlay(&mut self, opacity: f32) -> ElementId {
        let bounds = self.scene.bounds();
        let overlay = self.scene.add_element(Element::new(bounds).hit_testable(true));
        self.visuals.set_opacity(overlay, opacity);
        overlay
    }

    fn fade(&mut self, from: f32, to: f32, duration: Duration, end: impl FnOnce(&mut Engine) + 'static) -> ElementId {
        let overlay = self.add_overlay(from);
        let animation = LinearAnimation::new(duration, from, to, move |engine: &mut Engine, opacity: f32| {
            engine.visuals.set_opacity(overlay, opacity);
        })
        .with_end(move |engine: &mut Engine| {
            engine.remove_element(overlay);
            end(engine);
        });
        self.animations.add_animation(animation, false);
        overlay
    }

    /// Fade a full-scene overlay in from clear to opaque, then remove it and
    /// call `end`. Returns the overlay.
    pub fn start_fade(&mut self, end: impl FnOnce(&mut Engine) + 'static, duration: Duration) -> ElementId {
        debug!(?duration, "fade out started");
        self.fade(OPACITY_CLEAR, OPACITY_OPAQUE, duration, end)
    }

    /// Replace the current scene.
    ///
    /// Runs the previous scene's cleanup, clears elements and animations,
    /// then lets `build` populate the scene and optionally register the
    /// cleanup for next time. The new scene fades in from an opaque overlay
    /// over `duration`.
    pub fn set_scene(&mut self, build: impl FnOnce(&mut Engine) -> Option<Cleanup>, duration: Duration) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup(self);
        }
        self.scene.clear_elements();
        self.visuals.clear();

        if let Err(e) = self.animations.verify_empty() {
            warn!(error = %e, "animations left over from previous scene; discarding");
            debug_assert!(!self.config.strict_checks, "scene teardown: {e}");
        }
        self.animations.clear_all();

        self.cleanup = build(self);
        self.fade(OPACITY_OPAQUE, OPACITY_CLEAR, duration, |_| {});
        debug!(elements = self.scene.len(), ?duration, "scene set");
    }

    /// [`Engine::set_scene`] with the configured fade duration.
    pub fn set_scene_default(&mut self, build: impl FnOnce(&mut Engine) -> Option<Cleanup>) {
        let duration = self.config.fade_duration;
        self.set_scene(build, duration);
    }
}
