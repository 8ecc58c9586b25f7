//! # circlewave - timed ripple effects
//!
//! Scheduling and lifecycle logic for "circle wave" effects: soft radial
//! ripples that pop up on a fixed rhythm, grow to their radius over their
//! lifetime, and disappear.
//!
//! circlewave does not draw anything. It decides *when* waves appear, *what*
//! they look like (color, position, radius, opacity, lifetime) and *when*
//! they go away. A renderer reads the live collection and draws it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use circlewave::prelude::*;
//!
//! let config = WaveConfig::for_bounds(Vec2::new(390.0, 844.0))
//!     .palette(Palette::Ocean)
//!     .lifetime_range(3.0, 5.0);
//!
//! let clock = SystemClock::new();
//! let mut wave = CircleWave::new(config)?;
//! wave.start(clock.now())?;
//!
//! loop {
//!     for event in wave.advance(clock.now()) {
//!         if let WaveEvent::Spawned { id, .. } = event {
//!             wave.mount(id)?;
//!         }
//!     }
//!     draw(wave.instances());
//! }
//! ```
//!
//! ## Core Concepts
//!
//! | Piece | Role |
//! |-------|------|
//! | [`WaveConfig`] | Fixed values, ranges and randomization flags, validated up front |
//! | [`SpawnContext`] | Resolves each attribute to a concrete value |
//! | [`ParticleSpawner`] | Creates one particle per timer tick |
//! | [`LifecycleScheduler`] | Removes each particle when its lifetime is over |
//! | [`CircleWave`] | Ties the above together around the live collection |
//!
//! Two smaller components reuse the same timing pieces: [`PulseWave`] (a
//! single repeating wave) and [`Spinner`] (a rotating loading ring).
//!
//! ## Time
//!
//! Nothing reads the clock implicitly. Pass the current time to
//! `advance`; use [`ManualClock`] for simulations and tests and
//! [`SystemClock`] for real time.

pub mod color;
pub mod config;
mod emitter;
mod error;
mod particle;
pub mod pulse;
mod scheduler;
mod spawn;
pub mod spinner;
pub mod time;
mod wave;

pub use color::Palette;
pub use config::{Attribute, ValueRange, WaveConfig};
pub use emitter::{ParticleSpawner, Ticker};
pub use error::{ConfigError, WaveError};
pub use glam::{Vec2, Vec3, Vec4};
pub use particle::{Particle, ParticleId, ParticleInstance};
pub use pulse::{PulseConfig, PulseWave};
pub use scheduler::LifecycleScheduler;
pub use spawn::{Sample, SpawnContext};
pub use spinner::Spinner;
pub use time::{Clock, ManualClock, SystemClock};
pub use wave::{CircleWave, WaveEvent, WaveObserver};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use circlewave::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Palette;
    pub use crate::config::{Attribute, ValueRange, WaveConfig};
    pub use crate::error::{ConfigError, WaveError};
    pub use crate::particle::{Particle, ParticleId, ParticleInstance};
    pub use crate::pulse::{PulseConfig, PulseWave};
    pub use crate::spinner::Spinner;
    pub use crate::time::{Clock, ManualClock, SystemClock};
    pub use crate::wave::{CircleWave, WaveEvent, WaveObserver};
    pub use crate::{Vec2, Vec3, Vec4};
}
