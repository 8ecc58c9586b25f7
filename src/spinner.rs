//! Rotating loading indicator.
//!
//! A ring stroked with an angular gradient from transparent to the spinner
//! color, turning one full revolution per period at constant speed.

use glam::{Vec3, Vec4};

use crate::color::PURPLE;
use crate::config::check_positive;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct Spinner {
    color: Vec3,
    period: f32,
    line_width: f32,
    diameter: f32,
    started_at: Option<f64>,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            color: PURPLE,
            period: 1.0,
            line_width: 6.0,
            diameter: 48.0,
            started_at: None,
        }
    }
}

impl Spinner {
    /// Spinner with the default size and period.
    pub fn new(color: Vec3) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Seconds per revolution.
    pub fn with_period(mut self, period: f32) -> Result<Self, ConfigError> {
        check_positive(period, "period")?;
        self.period = period;
        Ok(self)
    }

    /// Ring diameter and stroke width, both positive.
    pub fn with_size(mut self, diameter: f32, line_width: f32) -> Result<Self, ConfigError> {
        check_positive(diameter, "diameter")?;
        check_positive(line_width, "line_width")?;
        self.diameter = diameter;
        self.line_width = line_width;
        Ok(self)
    }

    #[inline]
    pub fn diameter(&self) -> f32 {
        self.diameter
    }

    #[inline]
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    #[inline]
    pub fn is_spinning(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start turning at `now`. Does nothing if already spinning.
    pub fn start(&mut self, now: f64) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    /// Rotation in degrees at `now`, in `0.0..360.0`.
    pub fn angle_at(&self, now: f64) -> f32 {
        let Some(start) = self.started_at else {
            return 0.0;
        };
        let turns = ((now - start).max(0.0) / self.period as f64).fract();
        (turns * 360.0) as f32
    }

    /// Gradient stops, transparent to opaque.
    pub fn gradient(&self) -> [Vec4; 2] {
        [self.color.extend(0.0), self.color.extend(1.0)]
    }
}
