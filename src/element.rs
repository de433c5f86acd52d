//! Scene elements: positioned, optionally hit-testable nodes.
//!
//! An element carries only the shared geometry/visibility contract plus an
//! optional press handler. Per-kind visual payload (overlay opacity and the
//! like) lives in [`crate::visual::Visuals`], keyed by [`ElementId`].

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use std::fmt;

use slotmap::new_key_type;

use crate::geometry::{Rect, Vector2};
use crate::input::PressHandler;

new_key_type! {
    /// Generational handle to an element owned by a [`crate::scene::Scene`].
    pub struct ElementId;
}

/// A positioned node in the scene z-stack.
pub struct Element<H> {
    /// Bounds in scene coordinates.
    pub rect: Rect,
    /// Hidden elements are neither drawn nor hit.
    pub is_visible: bool,
    /// Whether hit-testing may return this element at all.
    pub hit_test_visible: bool,
    press_handler: Option<PressHandler<H>>,
}

impl<H> Element<H> {
    /// A visible, non-hit-testable element with no press handler.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self { rect, is_visible: true, hit_test_visible: false, press_handler: None }
    }

    /// A visible, hit-testable element that starts gestures through `handler`.
    #[must_use]
    pub fn interactive(rect: Rect, handler: PressHandler<H>) -> Self {
        Self::new(rect).hit_testable(true).with_press_handler(handler)
    }

    #[must_use]
    pub fn hit_testable(mut self, hit_test_visible: bool) -> Self {
        self.hit_test_visible = hit_test_visible;
        self
    }

    #[must_use]
    pub fn visible(mut self, is_visible: bool) -> Self {
        self.is_visible = is_visible;
        self
    }

    /// Attach a press handler. Does not change `hit_test_visible`.
    #[must_use]
    pub fn with_press_handler(mut self, handler: PressHandler<H>) -> Self {
        self.press_handler = Some(handler);
        self
    }

    pub fn set_press_handler(&mut self, handler: Option<PressHandler<H>>) {
        self.press_handler = handler;
    }

    #[must_use]
    pub fn press_handler(&self) -> Option<&PressHandler<H>> {
        self.press_handler.as_ref()
    }

    /// Whether a hit-test at `point` would select this element.
    #[must_use]
    pub fn is_hit(&self, point: Vector2) -> bool {
        self.is_visible && self.hit_test_visible && self.rect.contains(point)
    }

    #[must_use]
    pub fn location(&self) -> Vector2 {
        self.rect.location
    }

    pub fn set_location(&mut self, location: Vector2) {
        self.rect = self.rect.with_location(location);
    }
}

impl<H> fmt::Debug for Element<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("rect", &self.rect)
            .field("is_visible", &self.is_visible)
            .field("hit_test_visible", &self.hit_test_visible)
            .field("has_press_handler", &self.press_handler.is_some())
            .finish()
    }
}
