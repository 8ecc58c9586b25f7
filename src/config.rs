//! Wave configuration.
//!
//! A [`WaveConfig`] is supplied once when a [`CircleWave`](crate::CircleWave)
//! is built and stays immutable for the component's lifetime. Every visual
//! attribute is an [`Attribute`]: a fixed value, a `[min, max]` range, and a
//! flag choosing between them at spawn time.
//!
//! Configurations serialize to JSON so they can be stored next to a scene and
//! loaded at startup:
//!
//! ```ignore
//! let config = WaveConfig::load("ripples.json")?;
//! let wave = CircleWave::new(config)?;
//! ```
//!
//! Validation is eager. A bad range is rejected when the component is built,
//! not when the first particle is drawn from it.

use std::fs;
use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::color::{Palette, WHITE};
use crate::error::ConfigError;

/// Screen size assumed by [`WaveConfig::default`].
pub const DEFAULT_BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

/// Inclusive `[min, max]` range.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T> ValueRange<T> {
    /// Range from `min` to `max`, inclusive.
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl ValueRange<f32> {
    pub(crate) fn validate(&self, attribute: &'static str) -> Result<(), ConfigError> {
        check_finite(self.min, attribute)?;
        check_finite(self.max, attribute)?;
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                attribute,
                min: self.min,
                max: self.max,
            });
        }
        if !(self.max - self.min).is_finite() {
            return Err(ConfigError::RangeOverflow {
                attribute,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl ValueRange<Vec2> {
    fn validate(&self, attribute: &'static str) -> Result<(), ConfigError> {
        let (x_name, y_name) = axis_names(attribute);
        ValueRange::new(self.min.x, self.max.x).validate(x_name)?;
        ValueRange::new(self.min.y, self.max.y).validate(y_name)
    }
}

fn axis_names(attribute: &'static str) -> (&'static str, &'static str) {
    match attribute {
        "position" => ("position.x", "position.y"),
        _ => (attribute, attribute),
    }
}

/// A fixed value, a range, and whether to draw from the range.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Attribute<T> {
    /// Used when `randomize` is false.
    pub value: T,
    /// Sampled uniformly (inclusive) when `randomize` is true.
    pub range: ValueRange<T>,
    pub randomize: bool,
}

impl<T: Copy> Attribute<T> {
    /// Always resolves to `value`.
    pub fn fixed(value: T) -> Self {
        Self {
            value,
            range: ValueRange::new(value, value),
            randomize: false,
        }
    }

    /// Draws from `[min, max]`, keeping `fallback` as the fixed value.
    pub fn random(fallback: T, min: T, max: T) -> Self {
        Self {
            value: fallback,
            range: ValueRange::new(min, max),
            randomize: true,
        }
    }
}

pub(crate) fn check_finite(value: f32, attribute: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { attribute })
    }
}

pub(crate) fn check_positive(value: f32, attribute: &'static str) -> Result<(), ConfigError> {
    check_finite(value, attribute)?;
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { attribute, value });
    }
    Ok(())
}

pub(crate) fn check_non_negative(value: f32, attribute: &'static str) -> Result<(), ConfigError> {
    check_finite(value, attribute)?;
    if value < 0.0 {
        return Err(ConfigError::NonPositive { attribute, value });
    }
    Ok(())
}

pub(crate) fn check_unit(value: f32, attribute: &'static str) -> Result<(), ConfigError> {
    check_non_negative(value, attribute)?;
    if value > 1.0 {
        return Err(ConfigError::OutOfBounds { attribute, value });
    }
    Ok(())
}

fn default_fallback_color() -> Option<Vec3> {
    Some(WHITE)
}

/// Configuration of a [`CircleWave`](crate::CircleWave).
///
/// # Example
///
/// ```ignore
/// let config = WaveConfig::for_bounds(Vec2::new(390.0, 844.0))
///     .palette(Palette::Ocean)
///     .spawn_interval(0.5)
///     .lifetime_range(2.0, 4.0)
///     .radius(120.0)
///     .blur(8.0);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WaveConfig {
    /// Colors sampled uniformly per particle.
    pub colors: Vec<Vec3>,
    /// Used when `colors` is empty.
    #[serde(default = "default_fallback_color")]
    pub fallback_color: Option<Vec3>,
    /// Particle centre.
    pub position: Attribute<Vec2>,
    /// Seconds between spawns.
    pub spawn_interval: f32,
    /// Seconds a particle lives; also the duration of its growth animation.
    pub lifetime: Attribute<f32>,
    /// Radius the growth animation ends at.
    pub radius: Attribute<f32>,
    pub opacity: Attribute<f32>,
    #[serde(default)]
    pub blur_radius: f32,
    #[serde(default)]
    pub use_blur: bool,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self::for_bounds(DEFAULT_BOUNDS)
    }
}

impl WaveConfig {
    /// Defaults for a screen of the given size: waves centred on screen, or
    /// scattered anywhere across it when randomized.
    pub fn for_bounds(size: Vec2) -> Self {
        Self {
            colors: Palette::Primary.colors(),
            fallback_color: default_fallback_color(),
            position: Attribute::random(size * 0.5, Vec2::ZERO, size),
            spawn_interval: 1.0,
            lifetime: Attribute::random(4.0, 3.0, 5.0),
            radius: Attribute::random(100.0, 50.0, 150.0),
            opacity: Attribute::random(0.5, 0.0, 1.0),
            blur_radius: 10.0,
            use_blur: false,
        }
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check every value and range.
    ///
    /// Ranges are checked even when their attribute is fixed, so flipping a
    /// `randomize` flag later never exposes a broken range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors.is_empty() && self.fallback_color.is_none() {
            return Err(ConfigError::EmptyPalette);
        }
        for color in self.colors.iter().chain(self.fallback_color.iter()) {
            if !color.is_finite() {
                return Err(ConfigError::NonFinite { attribute: "colors" });
            }
        }

        check_finite(self.position.value.x, "position.x")?;
        check_finite(self.position.value.y, "position.y")?;
        self.position.range.validate("position")?;

        check_positive(self.spawn_interval, "spawn_interval")?;

        check_positive(self.lifetime.value, "lifetime")?;
        self.lifetime.range.validate("lifetime")?;
        check_positive(self.lifetime.range.min, "lifetime")?;

        check_non_negative(self.radius.value, "radius")?;
        self.radius.range.validate("radius")?;
        check_non_negative(self.radius.range.min, "radius")?;

        check_unit(self.opacity.value, "opacity")?;
        self.opacity.range.validate("opacity")?;
        check_unit(self.opacity.range.min, "opacity")?;
        check_unit(self.opacity.range.max, "opacity")?;

        check_non_negative(self.blur_radius, "blur_radius")?;
        Ok(())
    }

    /// Blur applied to every wave, zero when blur is disabled.
    pub fn effective_blur(&self) -> f32 {
        if self.use_blur {
            self.blur_radius
        } else {
            0.0
        }
    }

    /// Mean particle lifetime in seconds.
    pub fn mean_lifetime(&self) -> f32 {
        if self.lifetime.randomize {
            (self.lifetime.range.min + self.lifetime.range.max) * 0.5
        } else {
            self.lifetime.value
        }
    }

    /// Expected number of live particles once spawning and expiry balance out.
    pub fn steady_state_count(&self) -> f32 {
        self.mean_lifetime() / self.spawn_interval
    }

    // =========================================================================
    // BUILDER
    // =========================================================================

    /// Replace the color list. An empty list falls back to `fallback_color`.
    pub fn colors(mut self, colors: Vec<Vec3>) -> Self {
        self.colors = colors;
        self
    }

    /// Use a preset palette as the color list.
    pub fn palette(mut self, palette: Palette) -> Self {
        self.colors = palette.colors();
        self
    }

    /// Color used when the color list is empty.
    pub fn fallback_color(mut self, color: Option<Vec3>) -> Self {
        self.fallback_color = color;
        self
    }

    /// Spawn every wave at `position`.
    pub fn position(mut self, position: Vec2) -> Self {
        self.position.value = position;
        self.position.randomize = false;
        self
    }

    /// Spawn waves anywhere within the rectangle `min..=max`.
    pub fn position_range(mut self, min: Vec2, max: Vec2) -> Self {
        self.position.range = ValueRange::new(min, max);
        self.position.randomize = true;
        self
    }

    /// Seconds between spawns.
    pub fn spawn_interval(mut self, seconds: f32) -> Self {
        self.spawn_interval = seconds;
        self
    }

    /// Fixed lifetime in seconds; disables lifetime randomization.
    pub fn lifetime(mut self, seconds: f32) -> Self {
        self.lifetime.value = seconds;
        self.lifetime.randomize = false;
        self
    }

    /// Random lifetime in `[min, max]` seconds.
    pub fn lifetime_range(mut self, min: f32, max: f32) -> Self {
        self.lifetime.range = ValueRange::new(min, max);
        self.lifetime.randomize = true;
        self
    }

    /// Fixed target radius; disables radius randomization.
    pub fn radius(mut self, radius: f32) -> Self {
        self.radius.value = radius;
        self.radius.randomize = false;
        self
    }

    /// Random target radius in `[min, max]`.
    pub fn radius_range(mut self, min: f32, max: f32) -> Self {
        self.radius.range = ValueRange::new(min, max);
        self.radius.randomize = true;
        self
    }

    /// Fixed opacity; disables opacity randomization.
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity.value = opacity;
        self.opacity.randomize = false;
        self
    }

    /// Random opacity in `[min, max]`.
    pub fn opacity_range(mut self, min: f32, max: f32) -> Self {
        self.opacity.range = ValueRange::new(min, max);
        self.opacity.randomize = true;
        self
    }

    /// Enable blur with the given radius.
    pub fn blur(mut self, radius: f32) -> Self {
        self.blur_radius = radius;
        self.use_blur = true;
        self
    }

    /// Disable blur without forgetting the radius.
    pub fn no_blur(mut self) -> Self {
        self.use_blur = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = WaveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_interval, 1.0);
        assert_eq!(config.position.value, DEFAULT_BOUNDS * 0.5);
        assert!(config.lifetime.randomize);
        assert_eq!(config.effective_blur(), 0.0);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = WaveConfig::default().radius_range(150.0, 50.0);
        match config.validate() {
            Err(ConfigError::InvalidRange { attribute, min, max }) => {
                assert_eq!(attribute, "radius");
                assert_eq!(min, 150.0);
                assert_eq!(max, 50.0);
            }
            other => panic!("expected InvalidRange, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_position_range_rejected() {
        let config = WaveConfig::default()
            .position_range(Vec2::splat(-3.0e38), Vec2::splat(3.0e38));
        match config.validate() {
            Err(ConfigError::RangeOverflow { attribute, .. }) => {
                assert_eq!(attribute, "position.x");
            }
            other => panic!("expected RangeOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_range_rejected_even_when_fixed() {
        let mut config = WaveConfig::default().opacity(0.5);
        config.opacity.range = ValueRange::new(0.9, 0.1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { attribute: "opacity", .. })
        ));
    }

    #[test]
    fn test_inverted_position_axis_named() {
        let config = WaveConfig::default()
            .position_range(Vec2::new(0.0, 100.0), Vec2::new(10.0, 50.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { attribute: "position.y", .. })
        ));
    }

    #[test]
    fn test_degenerate_range_allowed() {
        let config = WaveConfig::default().radius_range(80.0, 80.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_positive_durations_rejected() {
        let config = WaveConfig::default().spawn_interval(0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { attribute: "spawn_interval", .. })
        ));

        let config = WaveConfig::default().lifetime(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { attribute: "lifetime", .. })
        ));

        let config = WaveConfig::default().lifetime_range(0.0, 2.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { attribute: "lifetime", .. })
        ));
    }

    #[test]
    fn test_opacity_above_one_rejected() {
        let config = WaveConfig::default().opacity_range(0.0, 1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfBounds { attribute: "opacity", .. })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let config = WaveConfig::default().radius(f32::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { attribute: "radius" })
        ));
    }

    #[test]
    fn test_empty_palette() {
        let config = WaveConfig::default().colors(Vec::new());
        assert!(config.validate().is_ok());

        let config = config.fallback_color(None);
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPalette)));
    }

    #[test]
    fn test_builder_chain() {
        let config = WaveConfig::default()
            .position(Vec2::new(10.0, 20.0))
            .lifetime(2.0)
            .radius(100.0)
            .opacity(0.25)
            .blur(6.0);

        assert!(!config.position.randomize);
        assert!(!config.lifetime.randomize);
        assert!(!config.radius.randomize);
        assert!(!config.opacity.randomize);
        assert_eq!(config.effective_blur(), 6.0);
        assert_eq!(config.no_blur().effective_blur(), 0.0);
    }

    #[test]
    fn test_steady_state_count() {
        let config = WaveConfig::default().spawn_interval(0.5).lifetime_range(3.0, 5.0);
        assert!((config.steady_state_count() - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_json_round_trip_and_validation() {
        let config = WaveConfig::default().palette(Palette::Neon).lifetime(2.5);
        let json = serde_json::to_string(&config).unwrap();
        let parsed = WaveConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);

        let broken = json.replace("\"spawn_interval\":1.0", "\"spawn_interval\":-2.0");
        assert!(matches!(
            WaveConfig::from_json(&broken),
            Err(ConfigError::NonPositive { .. })
        ));
        assert!(matches!(WaveConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let mut value = serde_json::to_value(WaveConfig::default()).unwrap();
        let object = value.as_object_mut().unwrap();
        object.remove("fallback_color");
        object.remove("blur_radius");
        object.remove("use_blur");

        let parsed: WaveConfig = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.fallback_color, Some(WHITE));
        assert_eq!(parsed.blur_radius, 0.0);
        assert!(!parsed.use_blur);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("circlewave-config-{}.json", std::process::id()));
        let config = WaveConfig::default().spawn_interval(0.25);
        config.save(&path).unwrap();
        let loaded = WaveConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
