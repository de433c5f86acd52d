//! Per-frame animations and the controller that steps them.
//!
//! DESIGN
//! ======
//! The controller keeps animations in a generational arena plus an `order`
//! vector for stepping order. Each frame it steps a snapshot of `order`, so
//! step functions and end callbacks may add, remove, or clear animations
//! without disturbing the pass in progress:
//!
//! - an animation added during the pass is first stepped next frame
//! - an animation removed during the pass is skipped and never fires its end
//! - a finished animation is removed before its end callback runs
//!
//! While an animation is being stepped it is taken out of its slot, so its
//! step function receives the host mutably.
//!
//! Some animations block input: the scene's press gate stays closed while
//! any of them is active.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use std::fmt;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};
use tracing::trace;

use crate::geometry::{self, Rect, Vector2};

new_key_type! {
    /// Handle to an animation scheduled on an [`AnimationsController`].
    pub struct AnimationId;
}

/// Runs once when an animation finishes.
pub type EndCallback<C> = Box<dyn FnOnce(&mut C)>;

/// A per-frame step function.
pub trait Animation<C> {
    /// Advance by `delta`. Return `false` once finished.
    fn next(&mut self, host: &mut C, delta: Duration) -> bool;

    /// Hand over the completion callback, if any. Called once, after the
    /// animation has been removed from its controller.
    fn take_end(&mut self) -> Option<EndCallback<C>> {
        None
    }
}

/// Owner of an animation controller; the context every step receives.
pub trait AnimationHost: Sized + 'static {
    fn animations(&self) -> &AnimationsController<Self>;
    fn animations_mut(&mut self) -> &mut AnimationsController<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    #[error("{count} animation(s) still active")]
    Leaked { count: usize },
}

// =============================================================================
// CONTROLLER
// =============================================================================

struct Slot<C> {
    /// `None` only while the animation is being stepped.
    animation: Option<Box<dyn Animation<C>>>,
    blocks_input: bool,
}

pub struct AnimationsController<C> {
    slots: SlotMap<AnimationId, Slot<C>>,
    order: Vec<AnimationId>,
}

impl<C> Default for AnimationsController<C> {
    fn default() -> Self {
        Self { slots: SlotMap::with_key(), order: Vec::new() }
    }
}

impl<C> fmt::Debug for AnimationsController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationsController")
            .field("len", &self.len())
            .field("blocking", &self.blocking_count())
            .finish()
    }
}

impl<C> AnimationsController<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no input-blocking animation is active.
    #[must_use]
    pub fn allow_input(&self) -> bool {
        self.blocking_count() == 0
    }

    #[must_use]
    pub fn blocking_count(&self) -> usize {
        self.slots.values().filter(|slot| slot.blocks_input).count()
    }

    pub fn add_animation(&mut self, animation: impl Animation<C> + 'static, blocks_input: bool) -> AnimationId {
        self.add_boxed(Box::new(animation), blocks_input)
    }

    pub fn add_boxed(&mut self, animation: Box<dyn Animation<C>>, blocks_input: bool) -> AnimationId {
        let id = self.slots.insert(Slot { animation: Some(animation), blocks_input });
        self.order.push(id);
        id
    }

    /// Add several non-blocking animations at once.
    pub fn add_animations(&mut self, animations: impl IntoIterator<Item = Box<dyn Animation<C>>>) -> Vec<AnimationId> {
        animations.into_iter().map(|animation| self.add_boxed(animation, false)).collect()
    }

    /// Remove an animation without firing its end callback.
    pub fn remove_animation(&mut self, id: AnimationId) -> bool {
        if self.slots.remove(id).is_none() {
            return false;
        }
        self.order.retain(|&other| other != id);
        true
    }

    #[must_use]
    pub fn contains(&self, id: AnimationId) -> bool {
        self.slots.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drop every animation, blocking or not, without firing end callbacks.
    pub fn clear_all(&mut self) {
        self.slots.clear();
        self.order.clear();
    }

    /// Check that nothing is left running, e.g. before a scene teardown.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::Leaked`] with the number of live animations.
    pub fn verify_empty(&self) -> Result<(), AnimationError> {
        if self.is_empty() {
            return Ok(());
        }
        Err(AnimationError::Leaked { count: self.len() })
    }
}

impl<C: AnimationHost> AnimationsController<C> {
    /// Step every animation that was active when the pass began.
    pub fn next(host: &mut C, delta: Duration) {
        let snapshot = host.animations().order.clone();
        for id in snapshot {
            let taken = host.animations_mut().slots.get_mut(id).and_then(|slot| slot.animation.take());
            let Some(mut animation) = taken else {
                continue;
            };

            if animation.next(host, delta) {
                if let Some(slot) = host.animations_mut().slots.get_mut(id) {
                    slot.animation = Some(animation);
                }
                continue;
            }

            // The step may already have removed its own slot.
            host.animations_mut().remove_animation(id);
            trace!(?id, "animation finished");
            if let Some(end) = animation.take_end() {
                end(host);
            }
        }
    }
}

// =============================================================================
// DELEGATE / TIMER
// =============================================================================

/// Wraps an arbitrary step function.
pub struct DelegateAnimation<C> {
    step: Box<dyn FnMut(&mut C, Duration) -> bool>,
    end: Option<EndCallback<C>>,
}

impl<C> DelegateAnimation<C> {
    #[must_use]
    pub fn new(step: impl FnMut(&mut C, Duration) -> bool + 'static) -> Self {
        Self { step: Box::new(step), end: None }
    }

    #[must_use]
    pub fn with_end(mut self, end: impl FnOnce(&mut C) + 'static) -> Self {
        self.end = Some(Box::new(end));
        self
    }

    /// Fires `on_timer` every `period`, carrying overrun into the next
    /// period. Never finishes.
    #[must_use]
    pub fn timer(period: Duration, mut on_timer: impl FnMut(&mut C) + 'static) -> Self {
        let mut total = Duration::ZERO;
        Self::new(move |host, delta| {
            total += delta;
            if total > period {
                total -= period;
                on_timer(host);
            }
            true
        })
    }
}

impl<C> Animation<C> for DelegateAnimation<C> {
    fn next(&mut self, host: &mut C, delta: Duration) -> bool {
        (self.step)(host, delta)
    }

    fn take_end(&mut self) -> Option<EndCallback<C>> {
        self.end.take()
    }
}

// =============================================================================
// WAIT
// =============================================================================

/// Runs until its condition holds.
pub struct WaitCondition<C> {
    condition: Box<dyn FnMut(&mut C, Duration) -> bool>,
    end: Option<EndCallback<C>>,
}

impl<C> WaitCondition<C> {
    #[must_use]
    pub fn new(condition: impl FnMut(&mut C, Duration) -> bool + 'static) -> Self {
        Self { condition: Box::new(condition), end: None }
    }

    #[must_use]
    pub fn with_end(mut self, end: impl FnOnce(&mut C) + 'static) -> Self {
        self.end = Some(Box::new(end));
        self
    }

    /// Finishes once more than `time` has elapsed, then calls `end`.
    #[must_use]
    pub fn wait_time(time: Duration, end: impl FnOnce(&mut C) + 'static) -> Self {
        let mut total = Duration::ZERO;
        Self::new(move |_, delta| {
            total += delta;
            total > time
        })
        .with_end(end)
    }
}

impl<C> Animation<C> for WaitCondition<C> {
    fn next(&mut self, host: &mut C, delta: Duration) -> bool {
        !(self.condition)(host, delta)
    }

    fn take_end(&mut self) -> Option<EndCallback<C>> {
        self.end.take()
    }
}

// =============================================================================
// LINEAR
// =============================================================================

/// Values that can be blended linearly.
pub trait Lerp {
    #[must_use]
    fn lerp(from: &Self, to: &Self, amount: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(from: &Self, to: &Self, amount: f32) -> Self {
        geometry::lerp(*from, *to, amount)
    }
}

impl Lerp for Vector2 {
    fn lerp(from: &Self, to: &Self, amount: f32) -> Self {
        Vector2::new(geometry::lerp(from.x, to.x, amount), geometry::lerp(from.y, to.y, amount))
    }
}

impl Lerp for Rect {
    fn lerp(from: &Self, to: &Self, amount: f32) -> Self {
        Rect::from_location_size(
            <Vector2 as Lerp>::lerp(&from.location, &to.location, amount),
            <Vector2 as Lerp>::lerp(&from.size, &to.size, amount),
        )
    }
}

/// Drives a value from `from` to `to` over `duration`.
///
/// The final step always applies `to` exactly. A zero duration finishes on
/// the first step.
pub struct LinearAnimation<C, T> {
    duration: Duration,
    from: T,
    to: T,
    elapsed: Duration,
    set_value: Box<dyn FnMut(&mut C, T)>,
    end: Option<EndCallback<C>>,
}

impl<C, T: Lerp + Clone> LinearAnimation<C, T> {
    #[must_use]
    pub fn new(duration: Duration, from: T, to: T, set_value: impl FnMut(&mut C, T) + 'static) -> Self {
        Self { duration, from, to, elapsed: Duration::ZERO, set_value: Box::new(set_value), end: None }
    }

    #[must_use]
    pub fn with_end(mut self, end: impl FnOnce(&mut C) + 'static) -> Self {
        self.end = Some(Box::new(end));
        self
    }

    /// Progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        geometry::constrain(self.elapsed.as_secs_f32() / self.duration.as_secs_f32(), 0.0, 1.0)
    }
}

impl<C> LinearAnimation<C, f32> {
    /// Circular motion: sweeps the angle from `from_angle` to `to_angle`
    /// (radians) and reports the point at `radius` around `center`.
    #[must_use]
    pub fn rotate(
        center: Vector2,
        radius: f32,
        from_angle: f32,
        to_angle: f32,
        duration: Duration,
        mut set_location: impl FnMut(&mut C, Vector2) + 'static,
    ) -> Self {
        Self::new(duration, from_angle, to_angle, move |host, angle| {
            set_location(host, center + radius * Vector2::from_angle(angle));
        })
    }
}

impl<C, T: Lerp + Clone> Animation<C> for LinearAnimation<C, T> {
    fn next(&mut self, host: &mut C, delta: Duration) -> bool {
        self.elapsed += delta;
        let amount = self.progress();
        if amount >= 1.0 {
            (self.set_value)(host, self.to.clone());
            return false;
        }
        (self.set_value)(host, T::lerp(&self.from, &self.to, amount));
        true
    }

    fn take_end(&mut self) -> Option<EndCallback<C>> {
        self.end.take()
    }
}
