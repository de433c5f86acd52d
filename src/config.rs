//! Engine configuration, loaded from environment variables.
//!
//! Unset variables fall back to the defaults in [`crate::consts`]; set but
//! malformed values are reported instead of silently ignored.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;
use std::str::FromStr;
use std::time::Duration;

use crate::consts::{DEFAULT_FADE_MS, DEFAULT_SCENE_HEIGHT, DEFAULT_SCENE_WIDTH, DEFAULT_SEED};

pub const ENV_WIDTH: &str = "SCENE_WIDTH";
pub const ENV_HEIGHT: &str = "SCENE_HEIGHT";
pub const ENV_FADE_MS: &str = "SCENE_FADE_MS";
pub const ENV_SEED: &str = "SCENE_SEED";
pub const ENV_STRICT_CHECKS: &str = "SCENE_STRICT_CHECKS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{key} must be positive")]
    NonPositive { key: &'static str },
}

/// Tuning knobs for an [`crate::engine::Engine`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Scene width in scene units.
    pub width: f32,
    /// Scene height in scene units.
    pub height: f32,
    /// Default duration of scene-transition fades.
    pub fade_duration: Duration,
    /// Seed for the engine's random variates.
    pub seed: u64,
    /// Trip a debug assertion on host misuse: a scene torn down with
    /// animations still running, or a press during an active gesture. Both
    /// are logged either way.
    pub strict_checks: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCENE_WIDTH,
            height: DEFAULT_SCENE_HEIGHT,
            fade_duration: Duration::from_millis(DEFAULT_FADE_MS),
            seed: DEFAULT_SEED,
            strict_checks: cfg!(debug_assertions),
        }
    }
}

impl EngineConfig {
    /// Load from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set but unparsable, or if a
    /// scene dimension is not positive.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
        })
    }

    /// Load from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`EngineConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let width = parse_or(&lookup, ENV_WIDTH, defaults.width)?;
        let height = parse_or(&lookup, ENV_HEIGHT, defaults.height)?;
        if width <= 0.0 {
            return Err(ConfigError::NonPositive { key: ENV_WIDTH });
        }
        if height <= 0.0 {
            return Err(ConfigError::NonPositive { key: ENV_HEIGHT });
        }
        let fade_ms = parse_or(&lookup, ENV_FADE_MS, DEFAULT_FADE_MS)?;
        let seed = parse_or(&lookup, ENV_SEED, defaults.seed)?;
        let strict_checks = match lookup(ENV_STRICT_CHECKS) {
            Some(value) => parse_flag(ENV_STRICT_CHECKS, &value)?,
            None => defaults.strict_checks,
        };

        Ok(Self { width, height, fade_duration: Duration::from_millis(fade_ms), seed, strict_checks })
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid { key, value: raw })
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: raw.to_owned() }),
    }
}
