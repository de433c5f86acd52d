//! Shared fixtures for unit tests.

use crate::element::{Element, ElementId};
use crate::geometry::{Rect, Vector2};
use crate::input::PressHandler;
use crate::scene::{Scene, SceneHost};

/// Minimal scene owner with a switchable input gate and an event log.
pub struct TestHost {
    pub scene: Scene<TestHost>,
    pub allow: bool,
    pub log: Vec<String>,
}

impl TestHost {
    pub fn new() -> Self {
        Self { scene: Scene::new(1000.0, 1000.0), allow: true, log: Vec::new() }
    }

    pub fn add(&mut self, rect: Rect, handler: PressHandler<TestHost>) -> ElementId {
        self.scene.add_element(Element::interactive(rect, handler))
    }

    pub fn press(&mut self, x: f32, y: f32) {
        if let Err(e) = Scene::press(self, Vector2::new(x, y)) {
            self.log.push(format!("error: {e}"));
        }
    }

    pub fn drag(&mut self, x: f32, y: f32) {
        Scene::drag(self, Vector2::new(x, y));
    }

    pub fn release(&mut self, x: f32, y: f32) {
        Scene::release(self, Vector2::new(x, y));
    }

    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.scene.element(id).map(|e| e.rect)
    }
}

impl SceneHost for TestHost {
    fn scene(&self) -> &Scene<Self> {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene<Self> {
        &mut self.scene
    }

    fn allow_input(&self) -> bool {
        self.allow
    }
}
