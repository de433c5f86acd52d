//! Scene: the element z-stack, hit-testing, and pointer dispatch.
//!
//! DESIGN
//! ======
//! Elements live in a generational arena; a separate `order` vector holds the
//! z-stack (index 0 is the back, the last entry the front). Hit-testing scans
//! front to back and returns the first visible, hit-testable element whose
//! rect contains the point.
//!
//! Pointer dispatch takes the current gesture state out of the scene for the
//! duration of the transition, so gesture callbacks receive `&mut H` and may
//! freely mutate the scene (or replace its contents entirely).
//!
//! Only `press` consults the host's input gate. A gesture that has already
//! started always gets its drags and its release, even if a blocking
//! animation began mid-gesture, so no gesture is ever left dangling.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use slotmap::SlotMap;
use tracing::{debug, error};

use crate::element::{Element, ElementId};
use crate::geometry::{Rect, Vector2};
use crate::input::{GestureKind, InputError, InputState, Transition};

// =============================================================================
// HOST
// =============================================================================

/// Owner of a scene; the context every gesture callback receives.
pub trait SceneHost: Sized + 'static {
    fn scene(&self) -> &Scene<Self>;
    fn scene_mut(&mut self) -> &mut Scene<Self>;

    /// Gate consulted before a press may start a new gesture.
    fn allow_input(&self) -> bool {
        true
    }

    /// Whether host misuse, such as a press during an active gesture, should
    /// trip a debug assertion after it has been logged.
    fn strict_checks(&self) -> bool {
        false
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("element not in scene: {0:?}")]
    ElementNotFound(ElementId),
}

// =============================================================================
// SCENE
// =============================================================================

pub struct Scene<H> {
    width: f32,
    height: f32,
    elements: SlotMap<ElementId, Element<H>>,
    order: Vec<ElementId>,
    input: InputState<H>,
}

impl<H> std::fmt::Debug for Scene<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("elements", &self.elements)
            .field("order", &self.order)
            .field("input", &self.input)
            .finish()
    }
}

impl<H> Scene<H> {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, elements: SlotMap::with_key(), order: Vec::new(), input: InputState::Idle }
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// The full scene area in scene coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    // --- Hit-testing ---

    /// The front-most visible, hit-testable element containing `point`.
    #[must_use]
    pub fn hit_test(&self, point: Vector2) -> Option<ElementId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|&id| self.elements.get(id).is_some_and(|element| element.is_hit(point)))
    }

    // --- Z-stack ---

    /// Add an element in front of everything else.
    pub fn add_element(&mut self, element: Element<H>) -> ElementId {
        let id = self.elements.insert(element);
        self.order.push(id);
        id
    }

    /// Add an element behind everything else.
    pub fn add_element_behind(&mut self, element: Element<H>) -> ElementId {
        let id = self.elements.insert(element);
        self.order.insert(0, id);
        id
    }

    /// Remove an element, returning it if it was present.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element<H>> {
        let element = self.elements.remove(id)?;
        self.order.retain(|&other| other != id);
        Some(element)
    }

    pub fn clear_elements(&mut self) {
        self.elements.clear();
        self.order.clear();
    }

    /// Move an element to the back of the z-stack.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ElementNotFound`] if `id` is not in the scene.
    pub fn send_to_back(&mut self, id: ElementId) -> Result<(), SceneError> {
        let index = self.z_index(id).ok_or(SceneError::ElementNotFound(id))?;
        self.order.remove(index);
        self.order.insert(0, id);
        Ok(())
    }

    /// Position of `id` in the z-stack (0 = back).
    #[must_use]
    pub fn z_index(&self, id: ElementId) -> Option<usize> {
        self.order.iter().position(|&other| other == id)
    }

    // --- Queries ---

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element<H>> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element<H>> {
        self.elements.get_mut(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Element ids in z-order, back to front.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.order.iter().copied()
    }

    /// All elements in z-order, back to front.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element<H>)> + '_ {
        self.order.iter().filter_map(|&id| self.elements.get(id).map(|element| (id, element)))
    }

    /// Visible elements in draw order, back to front.
    pub fn visible_elements(&self) -> impl Iterator<Item = (ElementId, &Element<H>)> + '_ {
        self.elements().filter(|(_, element)| element.is_visible)
    }

    // --- Gesture state ---

    #[must_use]
    pub fn input_state(&self) -> &InputState<H> {
        &self.input
    }

    #[must_use]
    pub fn gesture(&self) -> GestureKind {
        self.input.kind()
    }

    fn take_input(&mut self) -> InputState<H> {
        std::mem::take(&mut self.input)
    }

    fn settle(&mut self, previous: InputState<H>, transition: Transition<H>) {
        self.input = match transition {
            Transition::Stay => previous,
            Transition::To(next) => next,
            Transition::Reset => InputState::Idle,
        };
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

impl<H: SceneHost> Scene<H> {
    /// Feed a press at `point` to the host's scene.
    ///
    /// Ignored while the host's input gate is closed.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::PressDuringGesture`] if a gesture is already
    /// active. That gesture is abandoned and the scene falls back to `Idle`.
    pub fn press(host: &mut H, point: Vector2) -> Result<(), InputError> {
        if !host.allow_input() {
            debug!(x = point.x, y = point.y, "press ignored: input blocked");
            return Ok(());
        }

        let mut state = host.scene_mut().take_input();
        match state.press(host, point) {
            Ok(transition) => {
                host.scene_mut().settle(state, transition);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "invalid press; abandoning gesture");
                // take_input already left the scene Idle.
                state.abandon(host);
                debug_assert!(!host.strict_checks(), "{e}");
                Err(e)
            }
        }
    }

    /// Feed pointer movement at `point` to the current gesture.
    pub fn drag(host: &mut H, point: Vector2) {
        let mut state = host.scene_mut().take_input();
        let transition = state.drag(host, point);
        host.scene_mut().settle(state, transition);
    }

    /// Feed a release at `point` to the current gesture.
    pub fn release(host: &mut H, point: Vector2) {
        let mut state = host.scene_mut().take_input();
        let transition = state.release(host, point);
        host.scene_mut().settle(state, transition);
    }
}
