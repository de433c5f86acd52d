//! The gesture state machine.
//!
//! `InputState` is the active gesture being tracked between press and release.
//! Exactly one state is current per scene; `Idle` waits for the next press.
//! Every transition returns a [`Transition`] telling the scene whether to keep
//! the current state, switch to a new one, or fall back to `Idle`.
//!
//! | State | Press | Drag | Release |
//! |-------|-------|------|---------|
//! | `Idle` | hit-test, ask the element's press handler | stay | stay |
//! | `Drag` | error | `on_drag(delta)`; stop when it returns `false` | `on_release(delta)` |
//! | `Hover` | error | re-hit-test, `on_hover(element)` | `on_release()` |
//! | `Tap` | error | leaving the element ends the tap | `set_state(false)`, then `on_tap()` if still visible |
//!
//! On a press error the active gesture is abandoned (see
//! [`InputState::abandon`]) before the scene returns to `Idle`.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::element::ElementId;
use crate::geometry::Vector2;
use crate::scene::SceneHost;

// =============================================================
// Callback types
// =============================================================

/// Starts a gesture when its element is pressed.
///
/// Receives the host, the pressed element, and the press point in scene
/// coordinates. Returning [`Transition::Stay`] or [`Transition::Reset`]
/// leaves the scene idle.
pub type PressHandler<H> = Rc<dyn Fn(&mut H, ElementId, Vector2) -> Transition<H>>;

/// Plain host callback.
pub type Callback<H> = Rc<dyn Fn(&mut H)>;

/// Host callback receiving an element.
pub type ElementCallback<H> = Rc<dyn Fn(&mut H, ElementId)>;

/// Host callback receiving a pressed/unpressed flag.
pub type StateCallback<H> = Rc<dyn Fn(&mut H, bool)>;

// =============================================================
// Errors
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// A press arrived while another gesture was still running. Indicates
    /// broken host wiring (two presses without a release in between).
    #[error("press delivered while a {state:?} gesture is active")]
    PressDuringGesture { state: GestureKind },
}

// =============================================================
// Transitions
// =============================================================

/// Outcome of feeding one pointer event to the current state.
pub enum Transition<H> {
    /// Keep the current state.
    Stay,
    /// Replace the current state.
    To(InputState<H>),
    /// Drop the current state and go back to `Idle`.
    Reset,
}

impl<H> fmt::Debug for Transition<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stay => f.write_str("Stay"),
            Self::To(state) => f.debug_tuple("To").field(&state.kind()).finish(),
            Self::Reset => f.write_str("Reset"),
        }
    }
}

/// Discriminant of [`InputState`], for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Idle,
    Drag,
    Hover,
    Tap,
}

// =============================================================
// Drag
// =============================================================

/// Per-gesture drag logic. Deltas are measured from the press point.
pub trait DragHandler<H> {
    /// Handle movement; return `false` to end the gesture immediately.
    fn drag(&mut self, host: &mut H, delta: Vector2) -> bool;
    /// Handle the pointer being released.
    fn release(&mut self, host: &mut H, delta: Vector2);
}

/// A [`DragHandler`] built from two closures.
pub struct FnDrag<H> {
    on_drag: Box<dyn FnMut(&mut H, Vector2) -> bool>,
    on_release: Box<dyn FnMut(&mut H, Vector2)>,
}

impl<H> FnDrag<H> {
    #[must_use]
    pub fn new(
        on_drag: impl FnMut(&mut H, Vector2) -> bool + 'static,
        on_release: impl FnMut(&mut H, Vector2) + 'static,
    ) -> Self {
        Self { on_drag: Box::new(on_drag), on_release: Box::new(on_release) }
    }
}

impl<H> DragHandler<H> for FnDrag<H> {
    fn drag(&mut self, host: &mut H, delta: Vector2) -> bool {
        (self.on_drag)(host, delta)
    }

    fn release(&mut self, host: &mut H, delta: Vector2) {
        (self.on_release)(host, delta);
    }
}

pub struct DragState<H> {
    start: Vector2,
    handler: Box<dyn DragHandler<H>>,
}

impl<H> DragState<H> {
    /// Scene-space point where the gesture was pressed.
    #[must_use]
    pub fn start(&self) -> Vector2 {
        self.start
    }
}

// =============================================================
// Hover
// =============================================================

pub struct HoverState<H> {
    current: ElementId,
    on_hover: ElementCallback<H>,
    on_release: Callback<H>,
}

impl<H> HoverState<H> {
    /// The most recently reported element.
    #[must_use]
    pub fn current(&self) -> ElementId {
        self.current
    }
}

// =============================================================
// Tap
// =============================================================

pub struct TapState<H> {
    element: ElementId,
    on_tap: Callback<H>,
    set_state: StateCallback<H>,
}

impl<H> TapState<H> {
    /// The element being tracked.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }
}

// =============================================================
// InputState
// =============================================================

/// The gesture currently being tracked by a scene.
///
/// Each active variant owns exactly the context its transitions need; it is
/// built fresh per gesture and dropped on the transition out.
pub enum InputState<H> {
    /// No gesture in progress; waiting for the next press.
    Idle,
    /// Moving something relative to the press point.
    Drag(DragState<H>),
    /// Reporting whatever element is under the pointer.
    Hover(HoverState<H>),
    /// Tracking a press on one element until release or leave.
    Tap(TapState<H>),
}

impl<H> Default for InputState<H> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<H> fmt::Debug for InputState<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Drag(state) => f.debug_struct("Drag").field("start", &state.start).finish_non_exhaustive(),
            Self::Hover(state) => f.debug_struct("Hover").field("current", &state.current).finish_non_exhaustive(),
            Self::Tap(state) => f.debug_struct("Tap").field("element", &state.element).finish_non_exhaustive(),
        }
    }
}

impl<H> InputState<H> {
    #[must_use]
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Idle => GestureKind::Idle,
            Self::Drag(_) => GestureKind::Drag,
            Self::Hover(_) => GestureKind::Hover,
            Self::Tap(_) => GestureKind::Tap,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// A drag gesture pressed at `start`.
    #[must_use]
    pub fn new_drag(start: Vector2, handler: impl DragHandler<H> + 'static) -> Self {
        Self::Drag(DragState { start, handler: Box::new(handler) })
    }

    /// Enter hover over `element`, reporting it immediately.
    pub fn enter_hover(host: &mut H, element: ElementId, on_hover: ElementCallback<H>, on_release: Callback<H>) -> Self {
        on_hover(host, element);
        Self::Hover(HoverState { current: element, on_hover, on_release })
    }

    /// Enter tap tracking on `element`, marking it pressed immediately.
    pub fn enter_tap(host: &mut H, element: ElementId, on_tap: Callback<H>, set_state: StateCallback<H>) -> Self {
        set_state(host, true);
        Self::Tap(TapState { element, on_tap, set_state })
    }

    /// End a gesture that will never see its release.
    ///
    /// Tap and hover run their exit actions (`set_state(false)` and
    /// `on_release`); a drag handler is dropped without a release.
    pub fn abandon(self, host: &mut H) {
        match self {
            Self::Idle | Self::Drag(_) => {}
            Self::Hover(state) => (state.on_release)(host),
            Self::Tap(state) => (state.set_state)(host, false),
        }
    }
}

impl<H: SceneHost> InputState<H> {
    pub(crate) fn press(&mut self, host: &mut H, point: Vector2) -> Result<Transition<H>, InputError> {
        let Self::Idle = self else {
            return Err(InputError::PressDuringGesture { state: self.kind() });
        };

        let scene = host.scene();
        let Some(element) = scene.hit_test(point) else {
            return Ok(Transition::Stay);
        };
        let Some(handler) = scene.element(element).and_then(|e| e.press_handler()).cloned() else {
            return Ok(Transition::Stay);
        };

        let transition = handler(host, element, point);
        debug!(?element, ?transition, "press");
        Ok(transition)
    }

    pub(crate) fn drag(&mut self, host: &mut H, point: Vector2) -> Transition<H> {
        match self {
            Self::Idle => Transition::Stay,
            Self::Drag(state) => {
                if state.handler.drag(host, point - state.start) {
                    Transition::Stay
                } else {
                    Transition::Reset
                }
            }
            Self::Hover(state) => {
                match host.scene().hit_test(point) {
                    Some(element) => state.current = element,
                    // Over empty space: repeat the last element while it still exists.
                    None if !host.scene().contains(state.current) => return Transition::Stay,
                    None => {}
                }
                (state.on_hover)(host, state.current);
                Transition::Stay
            }
            Self::Tap(state) => {
                let inside = host.scene().element(state.element).is_some_and(|e| e.rect.contains(point));
                if inside {
                    Transition::Stay
                } else {
                    (state.set_state)(host, false);
                    Transition::Reset
                }
            }
        }
    }

    pub(crate) fn release(&mut self, host: &mut H, point: Vector2) -> Transition<H> {
        match self {
            Self::Idle => Transition::Stay,
            Self::Drag(state) => {
                state.handler.release(host, point - state.start);
                Transition::Reset
            }
            Self::Hover(state) => {
                (state.on_release)(host);
                Transition::Reset
            }
            Self::Tap(state) => {
                (state.set_state)(host, false);
                let visible = host.scene().element(state.element).is_some_and(|e| e.is_visible);
                if visible {
                    (state.on_tap)(host);
                }
                Transition::Reset
            }
        }
    }
}
