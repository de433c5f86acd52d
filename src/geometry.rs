//! Geometry primitives: vectors, axis-aligned rectangles, and tolerant float math.
//!
//! Every comparison that feeds hit-testing goes through the tolerance helpers
//! below instead of raw `<`/`==`, so a pointer sitting exactly on an element
//! edge resolves the same way from frame to frame.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::consts::EPSILON;

// ── Tolerant comparisons ────────────────────────────────────────

#[must_use]
pub fn greater_or_equal(x: f32, y: f32) -> bool {
    x + EPSILON > y
}

#[must_use]
pub fn less_or_equal(x: f32, y: f32) -> bool {
    x - EPSILON < y
}

#[must_use]
pub fn greater(x: f32, y: f32) -> bool {
    x - EPSILON > y
}

#[must_use]
pub fn less(x: f32, y: f32) -> bool {
    x + EPSILON < y
}

#[must_use]
pub fn floats_equal(x: f32, y: f32) -> bool {
    (x - y).abs() < EPSILON
}

#[must_use]
pub fn vectors_equal(a: Vector2, b: Vector2) -> bool {
    less_or_equal((a - b).length_squared(), 0.0)
}

#[must_use]
pub fn rects_equal(a: Rect, b: Rect) -> bool {
    vectors_equal(a.location, b.location) && vectors_equal(a.size, b.size)
}

/// Whether two closed ranges `(from, to)` do not overlap (touching counts as apart).
///
/// Both ranges must be ordered (`from <= to`).
#[must_use]
pub fn ranges_are_apart(r1: (f32, f32), r2: (f32, f32)) -> bool {
    debug_assert!(r1.0 <= r1.1 && r2.0 <= r2.1, "ranges must be ordered");
    if less(r2.0, r1.1) && less_or_equal(r1.0, r2.0) {
        return false;
    }
    if less(r1.0, r2.1) && less_or_equal(r2.0, r1.0) {
        return false;
    }
    true
}

/// Clamp `amount` into `[low, high]`.
#[must_use]
pub fn constrain(amount: f32, low: f32, high: f32) -> f32 {
    amount.max(low).min(high)
}

/// Linear blend between `start` and `stop`; `amount = 1` yields `stop` exactly.
#[must_use]
pub fn lerp(start: f32, stop: f32, amount: f32) -> f32 {
    start * (1.0 - amount) + stop * amount
}

/// Mirror `value` across `relative_to`.
#[must_use]
pub fn reflect(value: f32, relative_to: f32) -> f32 {
    relative_to + relative_to - value
}

// ── Vector2 ─────────────────────────────────────────────────────

/// A 2D point or offset in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians.
    #[must_use]
    pub fn from_angle(angle: f32) -> Self {
        Self { x: angle.cos(), y: angle.sin() }
    }

    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[must_use]
    pub fn with_x(self, x: f32) -> Self {
        Self { x, ..self }
    }

    #[must_use]
    pub fn with_y(self, y: f32) -> Self {
        Self { y, ..self }
    }

    /// Mirror this point across `relative_to`.
    #[must_use]
    pub fn reflect(self, relative_to: Self) -> Self {
        relative_to + relative_to - self
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for f32 {
    type Output = Vector2;
    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs * self
    }
}

impl Div<f32> for Vector2 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

// ── Rect ────────────────────────────────────────────────────────

/// Axis-aligned rectangle: top-left `location` plus `size`.
///
/// Equality is tolerant (see [`rects_equal`]), not bitwise.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Rect {
    pub location: Vector2,
    pub size: Vector2,
}

impl PartialEq for Rect {
    fn eq(&self, other: &Self) -> bool {
        rects_equal(*self, *other)
    }
}

impl Rect {
    pub const EMPTY: Self = Self { location: Vector2::ZERO, size: Vector2::ZERO };

    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { location: Vector2::new(left, top), size: Vector2::new(width, height) }
    }

    #[must_use]
    pub const fn from_location_size(location: Vector2, size: Vector2) -> Self {
        Self { location, size }
    }

    #[must_use]
    pub fn from_center(center: Vector2, size: Vector2) -> Self {
        Self { location: center - size / 2.0, size }
    }

    #[must_use]
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    #[must_use]
    pub fn left(&self) -> f32 {
        self.location.x
    }

    #[must_use]
    pub fn top(&self) -> f32 {
        self.location.y
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.location.x + self.size.x
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.location.y + self.size.y
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[must_use]
    pub fn mid(&self) -> Vector2 {
        self.location + self.size / 2.0
    }

    #[must_use]
    pub fn mid_x(&self) -> f32 {
        self.location.x + self.size.x / 2.0
    }

    #[must_use]
    pub fn mid_y(&self) -> f32 {
        self.location.y + self.size.y / 2.0
    }

    #[must_use]
    pub fn top_right(&self) -> Vector2 {
        self.location + Vector2::new(self.width(), 0.0)
    }

    #[must_use]
    pub fn bottom_right(&self) -> Vector2 {
        self.location + self.size
    }

    #[must_use]
    pub fn bottom_left(&self) -> Vector2 {
        self.location + Vector2::new(0.0, self.height())
    }

    #[must_use]
    pub fn offset(self, offset: Vector2) -> Self {
        Self { location: self.location + offset, ..self }
    }

    #[must_use]
    pub fn with_location(self, location: Vector2) -> Self {
        Self { location, ..self }
    }

    #[must_use]
    pub fn with_size(self, size: Vector2) -> Self {
        Self { size, ..self }
    }

    /// Whether `point` lies inside, edges included (within [`EPSILON`]).
    #[must_use]
    pub fn contains(&self, point: Vector2) -> bool {
        less_or_equal(self.location.x, point.x)
            && less_or_equal(self.location.y, point.y)
            && less_or_equal(point.x, self.right())
            && less_or_equal(point.y, self.bottom())
    }

    #[must_use]
    pub fn contains_rect(&self, other: Rect) -> bool {
        self.contains(other.location) && self.contains(other.bottom_right())
    }

    /// Corner-based overlap check.
    #[must_use]
    pub fn intersects(&self, other: Rect) -> bool {
        self.contains(other.location)
            || self.contains(other.bottom_right())
            || other.contains(self.location)
            || other.contains(self.bottom_right())
    }

    /// Smallest rect covering both `self` and `other`.
    #[must_use]
    pub fn containing_rect(&self, other: Rect) -> Rect {
        Rect::from_ltrb(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Grow by `amount` on every side.
    #[must_use]
    pub fn inflate(self, amount: Vector2) -> Self {
        Self { location: self.location - amount, size: self.size + amount * 2.0 }
    }

    /// Location that keeps this rect inside `containing`, pushing it back from
    /// the left/top first and then from the right/bottom.
    #[must_use]
    pub fn restricted_location(&self, containing: Rect) -> Vector2 {
        let mut location = self.location;
        location.x = location.x.max(containing.left());
        location.y = location.y.max(containing.top());
        location.x -= (self.right() - containing.right()).max(0.0);
        location.y -= (self.bottom() - containing.bottom()).max(0.0);
        location
    }

    #[must_use]
    pub fn restricted(self, containing: Rect) -> Self {
        self.with_location(self.restricted_location(containing))
    }

    /// Point-mirror across `relative_to`; the result is re-normalized so that
    /// its size stays positive.
    #[must_use]
    pub fn reflect(self, relative_to: Vector2) -> Self {
        Rect::from_ltrb(
            reflect(self.right(), relative_to.x),
            reflect(self.bottom(), relative_to.y),
            reflect(self.left(), relative_to.x),
            reflect(self.top(), relative_to.y),
        )
    }
}
