//! A single repeating wave.
//!
//! [`PulseWave`] keeps one wave on screen and re-targets it every
//! `duration` seconds. Each cycle picks new start and end radii (and, if
//! enabled, a new position) which the host animates with an ease-in-out
//! curve over `duration`, optionally auto-reversing.
//!
//! ```ignore
//! let mut pulse = PulseWave::new(PulseConfig::new(PURPLE, Vec2::new(100.0, 100.0)))?;
//! pulse.start(clock.now())?;
//! for cycle in pulse.advance(clock.now()) {
//!     if cycle.reset {
//!         // snap radii to zero without animating, then move
//!     }
//!     // animate towards cycle.state with pulse.animation()
//! }
//! ```

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::{check_finite, check_non_negative, check_positive, check_unit, ValueRange, DEFAULT_BOUNDS};
use crate::emitter::Ticker;
use crate::error::{ConfigError, WaveError};
use crate::spawn::SpawnContext;

/// Fraction of the end radius the gradient starts at.
const START_RADIUS_FACTOR: f32 = 0.1;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PulseConfig {
    pub color: Vec3,
    pub position: Vec2,
    /// Seconds per cycle; also the animation duration.
    pub duration: f32,
    pub opacity: f32,
    pub blur_radius: f32,
    pub radius_range: ValueRange<f32>,
    /// Area random positions are drawn from, `[0, bounds]`.
    pub bounds: Vec2,
    pub random_position: bool,
    pub random_radius: bool,
    /// Fire every cycle, or only once.
    pub repeat: bool,
    pub autoreverse: bool,
}

impl PulseConfig {
    pub fn new(color: Vec3, position: Vec2) -> Self {
        Self {
            color,
            position,
            duration: 3.0,
            opacity: 0.5,
            blur_radius: 20.0,
            radius_range: ValueRange::new(50.0, 100.0),
            bounds: DEFAULT_BOUNDS,
            random_position: true,
            random_radius: true,
            repeat: true,
            autoreverse: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.color.is_finite() {
            return Err(ConfigError::NonFinite { attribute: "color" });
        }
        check_finite(self.position.x, "position.x")?;
        check_finite(self.position.y, "position.y")?;
        check_positive(self.duration, "duration")?;
        check_unit(self.opacity, "opacity")?;
        check_non_negative(self.blur_radius, "blur_radius")?;
        self.radius_range.validate("radius")?;
        check_non_negative(self.radius_range.min, "radius")?;
        check_non_negative(self.bounds.x, "bounds.x")?;
        check_non_negative(self.bounds.y, "bounds.y")?;
        Ok(())
    }
}

/// Target values of the current cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseState {
    pub position: Vec2,
    pub start_radius: f32,
    pub end_radius: f32,
    pub blur: f32,
}

/// One fired cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseCycle {
    pub at: f64,
    /// Radii were snapped to zero (unanimated) before this cycle's targets.
    pub reset: bool,
    pub state: PulseState,
}

/// How the host should animate between cycle targets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseAnimation {
    pub duration: f32,
    pub autoreverse: bool,
    pub repeat_forever: bool,
}

pub struct PulseWave {
    config: PulseConfig,
    ctx: SpawnContext,
    ticker: Ticker,
    state: PulseState,
    disposed: bool,
}

impl PulseWave {
    /// Validate `config` and build a stopped pulse.
    pub fn new(config: PulseConfig) -> Result<Self, WaveError> {
        Self::with_context(config, SpawnContext::new())
    }

    /// Like [`PulseWave::new`], with a deterministic RNG.
    pub fn with_seed(config: PulseConfig, seed: u64) -> Result<Self, WaveError> {
        Self::with_context(config, SpawnContext::with_seed(seed))
    }

    fn with_context(config: PulseConfig, ctx: SpawnContext) -> Result<Self, WaveError> {
        config.validate()?;
        Ok(Self {
            ticker: Ticker::new(config.duration as f64),
            state: PulseState {
                position: config.position,
                start_radius: 0.0,
                end_radius: 0.0,
                blur: 0.0,
            },
            config,
            ctx,
            disposed: false,
        })
    }

    #[inline]
    pub fn config(&self) -> &PulseConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &PulseState {
        &self.state
    }

    /// Timing parameters for the host's radius animation.
    pub fn animation(&self) -> PulseAnimation {
        PulseAnimation {
            duration: self.config.duration,
            autoreverse: self.config.autoreverse,
            repeat_forever: true,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Begin cycling at `now`. Fails once disposed.
    pub fn start(&mut self, now: f64) -> Result<(), WaveError> {
        if self.disposed {
            return Err(WaveError::Disposed);
        }
        if self.ticker.start(now) {
            tracing::info!("Pulse started at {:.3}s (every {}s)", now, self.config.duration);
        }
        Ok(())
    }

    pub fn stop(&mut self) {
        self.ticker.stop();
    }

    /// Stop for good; later `advance` calls do nothing.
    pub fn dispose(&mut self) {
        self.ticker.stop();
        self.disposed = true;
    }

    pub fn next_wakeup(&self) -> Option<f64> {
        self.ticker.next_tick()
    }

    /// Fire every cycle due at or before `now`.
    pub fn advance(&mut self, now: f64) -> Vec<PulseCycle> {
        let mut cycles = Vec::new();
        if self.disposed {
            return cycles;
        }
        while let Some(at) = self.ticker.pop_due(now) {
            cycles.push(self.fire(at));
            if !self.config.repeat {
                self.ticker.stop();
                break;
            }
        }
        cycles
    }

    fn fire(&mut self, at: f64) -> PulseCycle {
        let reset = self.config.random_position;
        if reset {
            self.state.start_radius = 0.0;
            self.state.end_radius = 0.0;
            self.state.position = self.ctx.random_in_rect(self.config.bounds);
        }

        let range = self.config.radius_range;
        let (start, end) = if self.config.random_radius {
            (
                self.ctx.random_range(range.min, range.max) * START_RADIUS_FACTOR,
                self.ctx.random_range(range.min, range.max),
            )
        } else {
            (range.max * START_RADIUS_FACTOR, range.max)
        };
        self.state.start_radius = start;
        self.state.end_radius = end;
        self.state.blur = self.config.blur_radius;

        tracing::trace!(
            "Pulse cycle at {:.3}s: {:.1} -> {:.1}",
            at,
            start,
            end
        );
        PulseCycle {
            at,
            reset,
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PURPLE;

    fn config() -> PulseConfig {
        PulseConfig::new(PURPLE, Vec2::new(100.0, 100.0))
    }

    #[test]
    fn test_static_radius_cycle() {
        let mut cfg = config();
        cfg.random_position = false;
        cfg.random_radius = false;
        let mut pulse = PulseWave::with_seed(cfg, 1).unwrap();
        pulse.start(0.0).unwrap();

        assert!(pulse.advance(2.9).is_empty());
        let cycles = pulse.advance(3.0);
        assert_eq!(cycles.len(), 1);

        let cycle = cycles[0];
        assert!(!cycle.reset);
        assert_eq!(cycle.state.position, Vec2::new(100.0, 100.0));
        assert!((cycle.state.start_radius - 10.0).abs() < 1e-6);
        assert_eq!(cycle.state.end_radius, 100.0);
        assert_eq!(cycle.state.blur, 20.0);
    }

    #[test]
    fn test_random_cycle_within_bounds() {
        let mut cfg = config();
        cfg.bounds = Vec2::new(200.0, 300.0);
        let mut pulse = PulseWave::with_seed(cfg, 4).unwrap();
        pulse.start(0.0).unwrap();

        let cycles = pulse.advance(300.0);
        assert_eq!(cycles.len(), 100);
        for cycle in cycles {
            assert!(cycle.reset);
            let s = cycle.state;
            assert!(s.position.x >= 0.0 && s.position.x <= 200.0);
            assert!(s.position.y >= 0.0 && s.position.y <= 300.0);
            assert!(s.start_radius >= 5.0 && s.start_radius <= 10.0);
            assert!(s.end_radius >= 50.0 && s.end_radius <= 100.0);
        }
    }

    #[test]
    fn test_no_repeat_fires_once() {
        let mut cfg = config();
        cfg.repeat = false;
        let mut pulse = PulseWave::with_seed(cfg, 1).unwrap();
        pulse.start(0.0).unwrap();

        assert_eq!(pulse.advance(30.0).len(), 1);
        assert!(!pulse.is_running());
        assert!(pulse.advance(60.0).is_empty());
    }

    #[test]
    fn test_invalid_radius_range() {
        let mut cfg = config();
        cfg.radius_range = ValueRange::new(100.0, 50.0);
        assert!(matches!(
            PulseWave::new(cfg),
            Err(WaveError::Config(ConfigError::InvalidRange { .. }))
        ));
    }

    #[test]
    fn test_dispose() {
        let mut pulse = PulseWave::with_seed(config(), 1).unwrap();
        pulse.start(0.0).unwrap();
        pulse.dispose();
        assert!(pulse.advance(10.0).is_empty());
        assert!(matches!(pulse.start(10.0), Err(WaveError::Disposed)));
    }

    #[test]
    fn test_animation() {
        let mut cfg = config();
        cfg.autoreverse = true;
        let pulse = PulseWave::new(cfg).unwrap();
        let animation = pulse.animation();
        assert_eq!(animation.duration, 3.0);
        assert!(animation.autoreverse);
        assert!(animation.repeat_forever);
    }
}
