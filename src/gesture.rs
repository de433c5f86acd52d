//! Reusable press handlers: tap/click, press-release, hover, and anchor-and-snap drag.
//!
//! Each builder returns a [`PressHandler`] to attach to an element. The
//! handler runs on press and decides which gesture state the scene enters.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::SecondaryMap;
use tracing::{debug, warn};

use crate::element::{Element, ElementId};
use crate::geometry::{Rect, Vector2};
use crate::input::{Callback, DragHandler, ElementCallback, InputState, PressHandler, StateCallback, Transition};
use crate::scene::{Scene, SceneHost};

// =============================================================================
// TAP / CLICK
// =============================================================================

/// Tap tracking: `set_state(true)` on press, `set_state(false)` on leave or
/// release, and `on_tap` on a release that never left the element.
pub fn tap<H: SceneHost>(on_tap: impl Fn(&mut H) + 'static, set_state: impl Fn(&mut H, bool) + 'static) -> PressHandler<H> {
    let on_tap: Callback<H> = Rc::new(on_tap);
    let set_state: StateCallback<H> = Rc::new(set_state);
    Rc::new(move |host: &mut H, element: ElementId, _point: Vector2| {
        Transition::To(InputState::enter_tap(host, element, Rc::clone(&on_tap), Rc::clone(&set_state)))
    })
}

/// [`tap`] without pressed-state feedback.
pub fn click<H: SceneHost>(on_tap: impl Fn(&mut H) + 'static) -> PressHandler<H> {
    tap(on_tap, |_: &mut H, _: bool| {})
}

// =============================================================================
// PRESS / RELEASE
// =============================================================================

/// `on_press` fires as soon as the element is pressed; `on_release` fires
/// once the press ends, either by release or by leaving the element.
pub fn press_release<H: SceneHost>(on_press: impl Fn(&mut H) + 'static, on_release: impl Fn(&mut H) + 'static) -> PressHandler<H> {
    let on_press: Callback<H> = Rc::new(on_press);
    let on_release: Callback<H> = Rc::new(on_release);
    let noop: Callback<H> = Rc::new(|_: &mut H| {});
    Rc::new(move |host: &mut H, element: ElementId, _point: Vector2| {
        let hit_testable = host.scene().element(element).is_some_and(|e| e.hit_test_visible);
        if !hit_testable {
            warn!(?element, "press-release handler on an element that is not hit-test visible");
            return Transition::Stay;
        }

        on_press(host);
        let on_release = Rc::clone(&on_release);
        let set_state: StateCallback<H> = Rc::new(move |host: &mut H, pressed: bool| {
            if !pressed {
                on_release(host);
            }
        });
        Transition::To(InputState::enter_tap(host, element, Rc::clone(&noop), set_state))
    })
}

// =============================================================================
// HOVER
// =============================================================================

/// Reports the element under the pointer on press and on every drag until release.
pub fn hover<H: SceneHost>(
    on_hover: impl Fn(&mut H, ElementId) + 'static,
    on_release: impl Fn(&mut H) + 'static,
) -> PressHandler<H> {
    let on_hover: ElementCallback<H> = Rc::new(on_hover);
    let on_release: Callback<H> = Rc::new(on_release);
    Rc::new(move |host: &mut H, element: ElementId, _point: Vector2| {
        Transition::To(InputState::enter_hover(host, element, Rc::clone(&on_hover), Rc::clone(&on_release)))
    })
}

// =============================================================================
// FOLLOW PARENT
// =============================================================================

/// Callback that moves `children` along with `parent`, keeping each child at
/// its current offset from the parent. Offsets are captured now.
///
/// Typically passed to [`SnapDrag::on_move`].
pub fn follow_parent<H: SceneHost>(scene: &Scene<H>, parent: ElementId, children: &[ElementId]) -> impl Fn(&mut H) + 'static {
    let offsets: Vec<(ElementId, Vector2)> = match scene.element(parent) {
        Some(parent) => {
            let origin = parent.location();
            children
                .iter()
                .filter_map(|&child| scene.element(child).map(|e| (child, e.location() - origin)))
                .collect()
        }
        None => Vec::new(),
    };

    move |host: &mut H| {
        let scene = host.scene_mut();
        let Some(origin) = scene.element(parent).map(Element::location) else {
            return;
        };
        for &(child, offset) in &offsets {
            if let Some(element) = scene.element_mut(child) {
                element.set_location(origin + offset);
            }
        }
    }
}

// =============================================================================
// ANCHOR-AND-SNAP DRAG
// =============================================================================

/// A point a dragged element locks onto once its location is within `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    pub point: Vector2,
    pub radius: f32,
}

/// Builder for the anchor-and-snap drag gesture.
///
/// The element first sits in a dead zone of `anchor_distance` around its
/// starting position; once the pointer leaves it the element follows the
/// pointer. Coming within the snap radius of the snap target locks the
/// element onto the target for good.
pub struct SnapDrag<H> {
    anchor_distance: Box<dyn Fn(&H) -> f32>,
    snap_target: Box<dyn Fn(&H) -> Option<SnapTarget>>,
    on_snap: Box<dyn Fn(&mut H, ElementId)>,
    on_move: Option<Box<dyn Fn(&mut H)>>,
    coerce_location: Option<Box<dyn Fn(&H, Rect) -> Vector2>>,
    on_release: Option<Box<dyn Fn(&mut H, bool) -> bool>>,
    on_click: Option<Box<dyn Fn(&mut H)>>,
    can_drag: Option<Box<dyn Fn(&H, ElementId) -> bool>>,
}

impl<H: SceneHost> SnapDrag<H> {
    #[must_use]
    pub fn new(
        anchor_distance: impl Fn(&H) -> f32 + 'static,
        snap_target: impl Fn(&H) -> Option<SnapTarget> + 'static,
        on_snap: impl Fn(&mut H, ElementId) + 'static,
    ) -> Self {
        Self {
            anchor_distance: Box::new(anchor_distance),
            snap_target: Box::new(snap_target),
            on_snap: Box::new(on_snap),
            on_move: None,
            coerce_location: None,
            on_release: None,
            on_click: None,
            can_drag: None,
        }
    }

    /// Called after every committed move.
    #[must_use]
    pub fn on_move(mut self, on_move: impl Fn(&mut H) + 'static) -> Self {
        self.on_move = Some(Box::new(on_move));
        self
    }

    /// Final say over the element's location, e.g. clamping to bounds.
    #[must_use]
    pub fn coerce_location(mut self, coerce: impl Fn(&H, Rect) -> Vector2 + 'static) -> Self {
        self.coerce_location = Some(Box::new(coerce));
        self
    }

    /// Receives whether the gesture stayed anchored; the result decides
    /// whether the next gesture on this element starts anchored.
    #[must_use]
    pub fn on_release(mut self, on_release: impl Fn(&mut H, bool) -> bool + 'static) -> Self {
        self.on_release = Some(Box::new(on_release));
        self
    }

    /// Called on a release that never left the dead zone.
    #[must_use]
    pub fn on_click(mut self, on_click: impl Fn(&mut H) + 'static) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }

    /// Checked on the first drag of each gesture.
    #[must_use]
    pub fn can_drag(mut self, can_drag: impl Fn(&H, ElementId) -> bool + 'static) -> Self {
        self.can_drag = Some(Box::new(can_drag));
        self
    }

    /// Finish the builder. Anchoring and snap-lock are remembered per element
    /// across gestures.
    #[must_use]
    pub fn into_handler(self) -> PressHandler<H> {
        let config = Rc::new(self);
        let memory: Rc<RefCell<SecondaryMap<ElementId, SnapMemory>>> = Rc::default();

        Rc::new(move |_host: &mut H, element: ElementId, point: Vector2| {
            let remembered = memory.borrow().get(element).copied().unwrap_or_default();
            if remembered.locked {
                debug!(?element, "snapped element refuses drag");
                return Transition::Stay;
            }

            let gesture = SnapDragGesture {
                config: Rc::clone(&config),
                memory: Rc::clone(&memory),
                element,
                start_rect: None,
                allow_drag: true,
                anchored: remembered.anchored,
            };
            Transition::To(InputState::new_drag(point, gesture))
        })
    }
}

/// What a snap-drag handler remembers about an element between gestures.
#[derive(Debug, Clone, Copy)]
struct SnapMemory {
    anchored: bool,
    locked: bool,
}

impl Default for SnapMemory {
    fn default() -> Self {
        Self { anchored: true, locked: false }
    }
}

/// Per-gesture context; built on press, dropped when the gesture ends.
struct SnapDragGesture<H> {
    config: Rc<SnapDrag<H>>,
    memory: Rc<RefCell<SecondaryMap<ElementId, SnapMemory>>>,
    element: ElementId,
    start_rect: Option<Rect>,
    allow_drag: bool,
    anchored: bool,
}

impl<H: SceneHost> SnapDragGesture<H> {
    fn in_dead_zone(&self, host: &H, delta: Vector2) -> bool {
        let distance = (self.config.anchor_distance)(host);
        self.anchored && delta.length_squared() < distance * distance
    }

    fn remember(&self, update: impl FnOnce(&mut SnapMemory)) {
        if let Some(entry) = self.memory.borrow_mut().entry(self.element) {
            update(entry.or_default());
        }
    }

    /// Capture the starting rect on the first drag, if dragging is allowed.
    fn begin(&mut self, host: &H) -> Option<Rect> {
        if let Some(rect) = self.start_rect {
            return Some(rect);
        }
        if let Some(can_drag) = &self.config.can_drag {
            if !can_drag(host, self.element) {
                debug!(element = ?self.element, "drag refused");
                return None;
            }
        }
        let rect = host.scene().element(self.element)?.rect;
        self.start_rect = Some(rect);
        Some(rect)
    }
}

impl<H: SceneHost> DragHandler<H> for SnapDragGesture<H> {
    fn drag(&mut self, host: &mut H, delta: Vector2) -> bool {
        if !self.allow_drag || !host.scene().contains(self.element) {
            return false;
        }
        let Some(start_rect) = self.begin(host) else {
            self.allow_drag = false;
            return false;
        };

        let mut rect = start_rect;
        if !self.in_dead_zone(host, delta) {
            rect = rect.offset(delta);
            self.anchored = false;
        }

        if let Some(target) = (self.config.snap_target)(host) {
            if (rect.location - target.point).length_squared() <= target.radius * target.radius {
                rect = rect.with_location(target.point);
                self.allow_drag = false;
                self.remember(|memory| memory.locked = true);
                debug!(element = ?self.element, x = target.point.x, y = target.point.y, "element snapped");
                (self.config.on_snap)(host, self.element);
            }
        }

        if let Some(coerce) = &self.config.coerce_location {
            rect = rect.with_location(coerce(host, rect));
        }

        if let Some(element) = host.scene_mut().element_mut(self.element) {
            element.rect = rect;
        }
        if let Some(on_move) = &self.config.on_move {
            on_move(host);
        }
        self.allow_drag
    }

    fn release(&mut self, host: &mut H, delta: Vector2) {
        if self.in_dead_zone(host, delta) {
            if let Some(on_click) = &self.config.on_click {
                on_click(host);
            }
        }
        let anchored = self.anchored;
        let reanchor = match &self.config.on_release {
            Some(on_release) => on_release(host, anchored),
            None => false,
        };
        self.remember(|memory| memory.anchored = reanchor);
    }
}
