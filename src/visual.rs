//! Per-element visual payload, kept beside the scene rather than inside elements.
//!
//! Renderers read this table together with the scene's visible elements.
//! Entries for removed elements are ignored by lookups and dropped by
//! [`Visuals::remove`] or [`Visuals::clear`].

#[cfg(test)]
#[path = "visual_test.rs"]
mod visual_test;

use serde::Serialize;
use slotmap::SecondaryMap;

use crate::consts::{OPACITY_CLEAR, OPACITY_OPAQUE};
use crate::element::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Visual {
    /// 0 (clear) to 255 (opaque).
    pub opacity: f32,
}

impl Default for Visual {
    fn default() -> Self {
        Self { opacity: OPACITY_OPAQUE }
    }
}

#[derive(Debug, Default)]
pub struct Visuals {
    table: SecondaryMap<ElementId, Visual>,
}

impl Visuals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<Visual> {
        self.table.get(id).copied()
    }

    pub fn insert(&mut self, id: ElementId, visual: Visual) {
        self.table.insert(id, visual);
    }

    /// Opacity of `id`, clamped to the valid range on write.
    pub fn set_opacity(&mut self, id: ElementId, opacity: f32) {
        let opacity = opacity.clamp(OPACITY_CLEAR, OPACITY_OPAQUE);
        match self.table.get_mut(id) {
            Some(visual) => visual.opacity = opacity,
            None => {
                self.table.insert(id, Visual { opacity });
            }
        }
    }

    #[must_use]
    pub fn opacity(&self, id: ElementId) -> Option<f32> {
        self.table.get(id).map(|visual| visual.opacity)
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Visual> {
        self.table.remove(id)
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
