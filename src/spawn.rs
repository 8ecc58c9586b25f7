//! Spawn context for particle initialization.
//!
//! [`SpawnContext`] owns the random source and turns a [`WaveConfig`] into
//! concrete particle attributes. Each attribute is either the configured
//! fixed value or a uniform draw from its inclusive range.

use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::color::WHITE;
use crate::config::{Attribute, ValueRange, WaveConfig};
use crate::error::ConfigError;
use crate::particle::{Particle, ParticleId};

/// Values that can be drawn uniformly from a [`ValueRange`].
pub trait Sample: Copy {
    /// Reject ranges that cannot be sampled (`min > max`, NaN).
    fn check_range(range: &ValueRange<Self>) -> Result<(), ConfigError>;

    /// Uniform draw from `[min, max]`. The range must already be checked.
    fn sample<R: Rng>(range: &ValueRange<Self>, rng: &mut R) -> Self;
}

impl Sample for f32 {
    fn check_range(range: &ValueRange<f32>) -> Result<(), ConfigError> {
        range.validate("range")
    }

    fn sample<R: Rng>(range: &ValueRange<f32>, rng: &mut R) -> f32 {
        rng.gen_range(range.min..=range.max)
    }
}

impl Sample for Vec2 {
    fn check_range(range: &ValueRange<Vec2>) -> Result<(), ConfigError> {
        f32::check_range(&ValueRange::new(range.min.x, range.max.x))?;
        f32::check_range(&ValueRange::new(range.min.y, range.max.y))
    }

    fn sample<R: Rng>(range: &ValueRange<Vec2>, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.gen_range(range.min.x..=range.max.x),
            rng.gen_range(range.min.y..=range.max.y),
        )
    }
}

/// Random source plus the resolution rules for wave attributes.
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Context seeded from the wall clock, different on every run.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(seed)
    }

    /// Reproducible context.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Resolve one attribute value.
    ///
    /// Returns `fixed` unchanged when `use_random` is false. Otherwise draws
    /// uniformly from `range`, failing if the range is inverted.
    pub fn resolve<T: Sample>(
        &mut self,
        fixed: T,
        range: ValueRange<T>,
        use_random: bool,
    ) -> Result<T, ConfigError> {
        if !use_random {
            return Ok(fixed);
        }
        T::check_range(&range)?;
        Ok(T::sample(&range, &mut self.rng))
    }

    /// Resolve an attribute from an already validated config.
    pub(crate) fn draw<T: Sample>(&mut self, attribute: &Attribute<T>) -> T {
        if attribute.randomize {
            T::sample(&attribute.range, &mut self.rng)
        } else {
            attribute.value
        }
    }

    /// Uniform pick from `colors`, else `fallback`, else white.
    pub fn pick_color(&mut self, colors: &[Vec3], fallback: Option<Vec3>) -> Vec3 {
        colors
            .choose(&mut self.rng)
            .copied()
            .or(fallback)
            .unwrap_or(WHITE)
    }

    /// Random f32 in `[min, max]`.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..=max)
    }

    /// Random point within the rectangle `[0, size]`.
    pub fn random_in_rect(&mut self, size: Vec2) -> Vec2 {
        Vec2::sample(&ValueRange::new(Vec2::ZERO, size), &mut self.rng)
    }

    /// Build a fully parameterized particle born at `now`.
    ///
    /// `config` must have passed [`WaveConfig::validate`].
    pub(crate) fn particle(&mut self, id: ParticleId, config: &WaveConfig, now: f64) -> Particle {
        let color = self.pick_color(&config.colors, config.fallback_color);
        let position = self.draw(&config.position);
        let lifetime = self.draw(&config.lifetime);
        let radius = self.draw(&config.radius);
        let opacity = self.draw(&config.opacity);
        Particle::new(id, color, position, lifetime, opacity, radius, now)
    }
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self::new()
    }
}
