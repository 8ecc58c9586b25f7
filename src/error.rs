//! Error types for circlewave.
//!
//! Configuration problems are reported when a component is built, never
//! deferred to the first spawn. Runtime misuse of a torn-down component is
//! reported as [`WaveError::Disposed`].

use thiserror::Error;

use crate::particle::ParticleId;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `[min, max]` range whose minimum exceeds its maximum.
    #[error("invalid range for {attribute}: min {min} is greater than max {max}")]
    InvalidRange {
        attribute: &'static str,
        min: f32,
        max: f32,
    },

    /// A `[min, max]` range too wide to sample from (its span overflows `f32`).
    #[error("range for {attribute} is too wide to sample: [{min}, {max}]")]
    RangeOverflow {
        attribute: &'static str,
        min: f32,
        max: f32,
    },

    /// A duration or size that must be strictly positive (or non-negative).
    #[error("{attribute} must be positive, got {value}")]
    NonPositive { attribute: &'static str, value: f32 },

    /// A value outside its allowed interval (e.g. opacity above 1).
    #[error("{attribute} out of bounds: {value}")]
    OutOfBounds { attribute: &'static str, value: f32 },

    /// NaN or infinite value.
    #[error("{attribute} must be finite")]
    NonFinite { attribute: &'static str },

    /// No colors to sample from and no fallback color configured.
    #[error("color palette is empty and no fallback color is set")]
    EmptyPalette,

    /// Failed to read or write a config file.
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by a running wave component.
#[derive(Debug, Error)]
pub enum WaveError {
    /// Construction rejected the configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The component was torn down with `dispose()`.
    #[error("component has been disposed")]
    Disposed,

    /// Mount requested for a particle that is not in the live collection.
    #[error("particle {0} is not live")]
    UnknownParticle(ParticleId),
}
