//! Shared numeric constants for the scene runtime.

// ── Geometry ────────────────────────────────────────────────────

/// Tolerance for float comparisons, in scene units.
pub const EPSILON: f32 = 0.0002;

// ── Visuals ─────────────────────────────────────────────────────

/// Opacity of a fully covering overlay.
pub const OPACITY_OPAQUE: f32 = 255.0;

/// Opacity of a fully transparent overlay.
pub const OPACITY_CLEAR: f32 = 0.0;

// ── Engine defaults ─────────────────────────────────────────────

/// Scene width used when no configuration is supplied.
pub const DEFAULT_SCENE_WIDTH: f32 = 1000.0;

/// Scene height used when no configuration is supplied.
pub const DEFAULT_SCENE_HEIGHT: f32 = 1000.0;

/// Default duration of a scene-transition fade, in milliseconds.
pub const DEFAULT_FADE_MS: u64 = 300;

/// Default seed for the engine's variate generator.
pub const DEFAULT_SEED: u64 = 0;
