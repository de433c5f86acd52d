//! Seeded random variates owned by the engine.

#[cfg(test)]
#[path = "random_test.rs"]
mod random_test;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::{self, Rect, Vector2};

/// Reproducible random source: the same seed yields the same sequence.
#[derive(Debug, Clone)]
pub struct Variates {
    rng: StdRng,
}

impl Variates {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform between `low` and `high`.
    pub fn range(&mut self, low: f32, high: f32) -> f32 {
        let amount = self.unit();
        geometry::lerp(low, high, amount)
    }

    /// Uniform point inside `rect`.
    pub fn vector_in(&mut self, rect: Rect) -> Vector2 {
        let x = self.range(rect.left(), rect.right());
        let y = self.range(rect.top(), rect.bottom());
        Vector2::new(x, y)
    }

    /// Uniform pick of an index below `len`, or `None` when empty.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.random_range(0..len))
    }
}
