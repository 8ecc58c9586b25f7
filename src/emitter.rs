//! Periodic particle emission.
//!
//! A [`Ticker`] fires at `origin + k * interval` for `k = 1, 2, ...`. Tick
//! times are computed from the origin rather than accumulated, so they never
//! drift, and a host that advances late still receives every missed tick in
//! order.
//!
//! [`ParticleSpawner`] wraps a ticker and turns each tick into one new
//! [`Particle`] drawn from the wave configuration.

use crate::config::WaveConfig;
use crate::particle::{Particle, ParticleId};
use crate::spawn::SpawnContext;

/// Strictly periodic repeating timer.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: f64,
    origin: Option<f64>,
    fired: u64,
}

impl Ticker {
    /// `interval` must be positive.
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            origin: None,
            fired: 0,
        }
    }

    #[inline]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.origin.is_some()
    }

    /// Start ticking; the first tick is one interval after `now`.
    ///
    /// Returns `false` (and changes nothing) if already running.
    pub fn start(&mut self, now: f64) -> bool {
        if self.origin.is_some() {
            return false;
        }
        self.origin = Some(now);
        self.fired = 0;
        true
    }

    /// Cancel future ticks. Returns whether the ticker was running.
    pub fn stop(&mut self) -> bool {
        self.origin.take().is_some()
    }

    /// Time of the next tick, if running.
    pub fn next_tick(&self) -> Option<f64> {
        self.origin
            .map(|origin| origin + (self.fired + 1) as f64 * self.interval)
    }

    /// Consume the next tick if it is at or before `now`.
    pub fn pop_due(&mut self, now: f64) -> Option<f64> {
        let next = self.next_tick()?;
        if next > now {
            return None;
        }
        self.fired += 1;
        Some(next)
    }
}

/// Creates one particle per tick of its timer.
pub struct ParticleSpawner {
    ticker: Ticker,
    ctx: SpawnContext,
    next_id: u64,
}

impl ParticleSpawner {
    /// Stopped spawner ticking every `interval` seconds.
    pub fn new(interval: f32, ctx: SpawnContext) -> Self {
        Self {
            ticker: Ticker::new(interval as f64),
            ctx,
            next_id: 0,
        }
    }

    /// Begin ticking from `now`. No-op while already running.
    pub fn start(&mut self, now: f64) -> bool {
        self.ticker.start(now)
    }

    /// Cancel future spawns. Idempotent.
    pub fn stop(&mut self) -> bool {
        self.ticker.stop()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn next_tick(&self) -> Option<f64> {
        self.ticker.next_tick()
    }

    /// Number of particles created so far.
    pub fn spawned(&self) -> u64 {
        self.next_id
    }

    /// If a tick is due at or before `now`, synthesize the particle for it.
    ///
    /// The particle is born at the tick time, not at `now`.
    pub fn spawn_due(&mut self, now: f64, config: &WaveConfig) -> Option<Particle> {
        let at = self.ticker.pop_due(now)?;
        let id = ParticleId::new(self.next_id);
        self.next_id += 1;
        Some(self.ctx.particle(id, config, at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_periodic() {
        let mut t = Ticker::new(1.0);
        assert_eq!(t.next_tick(), None);
        assert!(t.start(0.0));
        assert!(!t.start(0.5));

        assert_eq!(t.pop_due(0.99), None);
        let ticks: Vec<f64> = std::iter::from_fn(|| t.pop_due(3.5)).collect();
        assert_eq!(ticks, vec![1.0, 2.0, 3.0]);
        assert_eq!(t.next_tick(), Some(4.0));
    }

    #[test]
    fn test_ticker_no_drift() {
        let mut t = Ticker::new(0.1);
        t.start(0.0);
        let ticks: Vec<f64> = std::iter::from_fn(|| t.pop_due(100.05)).collect();
        assert_eq!(ticks.len(), 1000);
        assert!((ticks[999] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_ticker_stop_idempotent() {
        let mut t = Ticker::new(1.0);
        t.start(0.0);
        assert!(t.stop());
        assert!(!t.stop());
        assert_eq!(t.pop_due(10.0), None);

        t.start(5.0);
        assert_eq!(t.pop_due(10.0), Some(6.0));
    }

    #[test]
    fn test_spawner_unique_ids_and_birth_times() {
        let config = WaveConfig::default().lifetime(2.0);
        let mut spawner = ParticleSpawner::new(1.0, SpawnContext::with_seed(1));
        spawner.start(0.0);

        let particles: Vec<Particle> =
            std::iter::from_fn(|| spawner.spawn_due(3.0, &config)).collect();
        assert_eq!(particles.len(), 3);
        assert_eq!(spawner.spawned(), 3);

        let ids: Vec<u64> = particles.iter().map(|p| p.id().get()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        let born: Vec<f64> = particles.iter().map(|p| p.born_at()).collect();
        assert_eq!(born, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_spawner_ids_not_reused_after_restart() {
        let config = WaveConfig::default();
        let mut spawner = ParticleSpawner::new(1.0, SpawnContext::with_seed(1));
        spawner.start(0.0);
        let first = spawner.spawn_due(1.0, &config).unwrap();
        spawner.stop();
        spawner.start(1.0);
        let second = spawner.spawn_due(2.0, &config).unwrap();
        assert_ne!(first.id(), second.id());
    }
}
