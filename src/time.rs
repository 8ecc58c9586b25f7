//! Time sources for driving waves.
//!
//! Components never read the clock themselves. The host passes the current
//! time (seconds since some origin) to `advance`, which keeps every
//! component deterministic under test. [`ManualClock`] is the simulated
//! source; [`SystemClock`] follows wall time and can be paused.
//!
//! ```ignore
//! let clock = SystemClock::new();
//! wave.start(clock.now())?;
//! loop {
//!     wave.advance(clock.now());
//!     // render...
//! }
//! ```

use std::time::{Duration, Instant};

/// Source of the current time in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Clock that only moves when told to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manual clock reading `now` seconds.
    pub fn starting_at(now: f64) -> Self {
        Self { now }
    }

    /// Move forward by `seconds` and return the new time.
    pub fn advance(&mut self, seconds: f64) -> f64 {
        self.now += seconds.max(0.0);
        self.now
    }

    /// Jump to `now`. Moving backwards is ignored.
    pub fn set(&mut self, now: f64) {
        self.now = self.now.max(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }
}

/// Wall-clock time since construction, minus time spent paused, multiplied
/// by the time scale.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
    paused_at: Option<Instant>,
    pause_elapsed: Duration,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f64,
    /// Scaled seconds accumulated before the last scale change.
    scaled_base: f64,
    /// Unscaled elapsed seconds at the last scale change.
    scale_since: f64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            paused_at: None,
            pause_elapsed: Duration::ZERO,
            time_scale: 1.0,
            scaled_base: 0.0,
            scale_since: 0.0,
        }
    }

    /// Current time scale multiplier.
    #[inline]
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Set the time scale multiplier, clamped to zero or above.
    ///
    /// - `0.0` = frozen
    /// - `0.5` = half speed (slow motion)
    /// - `2.0` = double speed
    ///
    /// Only time after the call is affected, so `now()` never jumps.
    pub fn set_time_scale(&mut self, scale: f64) {
        let raw = self.elapsed_duration().as_secs_f64();
        self.scaled_base = self.scaled_at(raw);
        self.scale_since = raw;
        self.time_scale = scale.max(0.0);
    }

    fn scaled_at(&self, raw: f64) -> f64 {
        self.scaled_base + (raw - self.scale_since).max(0.0) * self.time_scale
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Freeze time. While paused, `now()` stops increasing.
    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
        }
    }

    /// Resume after `pause`, excluding the paused span.
    pub fn resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.pause_elapsed += paused_at.elapsed();
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Elapsed unpaused wall-clock time as a Duration, ignoring the time scale.
    pub fn elapsed_duration(&self) -> Duration {
        let end = self.paused_at.unwrap_or_else(Instant::now);
        end.duration_since(self.start).saturating_sub(self.pause_elapsed)
    }

    /// Sleep until `deadline` seconds, returning immediately if it has passed
    /// or if time is frozen.
    pub fn sleep_until(&self, deadline: f64) {
        let remaining = deadline - self.now();
        if remaining > 0.0 && self.time_scale > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(remaining / self.time_scale));
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.scaled_at(self.elapsed_duration().as_secs_f64())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.now(), 0.0);
        assert_eq!(clock.advance(1.5), 1.5);

        clock.set(1.0);
        assert_eq!(clock.now(), 1.5);

        clock.set(4.0);
        assert_eq!(clock.now(), 4.0);

        clock.advance(-2.0);
        assert_eq!(clock.now(), 4.0);
    }

    #[test]
    fn test_system_clock_moves() {
        let clock = SystemClock::new();
        thread::sleep(Duration::from_millis(10));
        assert!(clock.now() > 0.0);
    }

    #[test]
    fn test_system_clock_pause() {
        let mut clock = SystemClock::new();
        clock.pause();
        assert!(clock.is_paused());

        let before = clock.now();
        thread::sleep(Duration::from_millis(10));
        assert_eq!(clock.now(), before);

        clock.toggle_pause();
        assert!(!clock.is_paused());
        thread::sleep(Duration::from_millis(5));
        assert!(clock.now() > before);
    }

    #[test]
    fn test_system_clock_time_scale() {
        let mut clock = SystemClock::new();
        assert_eq!(clock.time_scale(), 1.0);

        clock.set_time_scale(0.0);
        let frozen = clock.now();
        thread::sleep(Duration::from_millis(10));
        assert_eq!(clock.now(), frozen);

        clock.set_time_scale(-3.0);
        assert_eq!(clock.time_scale(), 0.0);

        clock.set_time_scale(4.0);
        let before = clock.now();
        assert!(before >= frozen);
        thread::sleep(Duration::from_millis(20));
        let advanced = clock.now() - before;
        assert!(advanced >= 0.08, "scaled advance too small: {}", advanced);
        assert!(clock.elapsed_duration().as_secs_f64() < clock.now());
    }
}
