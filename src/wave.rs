//! The circle wave component.
//!
//! [`CircleWave`] owns the live particle collection and multiplexes two kinds
//! of timed events onto one logical loop:
//!
//! - the spawner's repeating tick, which appends a new particle
//! - each particle's one-shot removal deadline
//!
//! The host drives it by calling [`CircleWave::advance`] with the current
//! time. All due events are applied in chronological order, so the result
//! does not depend on how often the host polls.
//!
//! # Example
//!
//! ```ignore
//! let mut wave = CircleWave::new(WaveConfig::default().lifetime(2.0))?;
//! wave.start(0.0)?;
//!
//! for event in wave.advance(1.0) {
//!     if let WaveEvent::Spawned { id, .. } = event {
//!         // First frame the particle is on screen:
//!         wave.mount(id)?;
//!     }
//! }
//! ```
//!
//! # Renderers
//!
//! Renderers either subscribe a [`WaveObserver`] and react to callbacks, or
//! poll [`CircleWave::revision`] and redraw from [`CircleWave::particles`]
//! when it changes. Both see every append and removal.

use crate::config::WaveConfig;
use crate::emitter::ParticleSpawner;
use crate::error::WaveError;
use crate::particle::{Particle, ParticleId, ParticleInstance};
use crate::scheduler::LifecycleScheduler;
use crate::spawn::SpawnContext;

/// Something that happened during [`CircleWave::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WaveEvent {
    /// A particle was appended to the collection.
    Spawned { id: ParticleId, at: f64 },
    /// A particle reached its deadline and was removed.
    Removed { id: ParticleId, at: f64 },
}

impl WaveEvent {
    pub fn id(&self) -> ParticleId {
        match self {
            WaveEvent::Spawned { id, .. } | WaveEvent::Removed { id, .. } => *id,
        }
    }

    pub fn at(&self) -> f64 {
        match self {
            WaveEvent::Spawned { at, .. } | WaveEvent::Removed { at, .. } => *at,
        }
    }
}

/// Callbacks for collection changes. All methods default to no-ops.
pub trait WaveObserver {
    fn on_spawned(&mut self, _particle: &Particle) {}
    fn on_removed(&mut self, _id: ParticleId) {}
    fn on_mounted(&mut self, _particle: &Particle) {}
}

/// Periodically spawning, self-expiring collection of wave particles.
pub struct CircleWave {
    config: WaveConfig,
    spawner: ParticleSpawner,
    scheduler: LifecycleScheduler,
    particles: Vec<Particle>,
    observers: Vec<Box<dyn WaveObserver>>,
    revision: u64,
    disposed: bool,
}

impl CircleWave {
    /// Build a component, validating the configuration up front.
    pub fn new(config: WaveConfig) -> Result<Self, WaveError> {
        Self::with_context(config, SpawnContext::new())
    }

    /// Build a component with a reproducible random sequence.
    pub fn with_seed(config: WaveConfig, seed: u64) -> Result<Self, WaveError> {
        Self::with_context(config, SpawnContext::with_seed(seed))
    }

    fn with_context(config: WaveConfig, ctx: SpawnContext) -> Result<Self, WaveError> {
        config.validate()?;
        Ok(Self {
            spawner: ParticleSpawner::new(config.spawn_interval, ctx),
            config,
            scheduler: LifecycleScheduler::new(),
            particles: Vec::new(),
            observers: Vec::new(),
            revision: 0,
            disposed: false,
        })
    }

    #[inline]
    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    /// Live particles in insertion order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Live particle with this id, if any.
    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id() == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Incremented on every append or removal.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.spawner.is_running()
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Removals still armed.
    pub fn pending_removals(&self) -> usize {
        self.scheduler.len()
    }

    /// Register an observer for spawn, removal and mount callbacks.
    pub fn subscribe(&mut self, observer: Box<dyn WaveObserver>) {
        self.observers.push(observer);
    }

    /// Start spawning; the first particle appears one interval after `now`.
    ///
    /// Calling again while running is a no-op.
    pub fn start(&mut self, now: f64) -> Result<(), WaveError> {
        if self.disposed {
            return Err(WaveError::Disposed);
        }
        if self.spawner.start(now) {
            tracing::info!(
                "Wave started at {:.3}s (interval {}s)",
                now,
                self.config.spawn_interval
            );
        }
        Ok(())
    }

    /// Stop spawning. Particles already live still expire on schedule.
    pub fn stop(&mut self) {
        if self.spawner.stop() {
            tracing::info!(
                "Wave stopped with {} live particles, {} removals pending",
                self.particles.len(),
                self.scheduler.len()
            );
        }
    }

    /// Tear down: cancel the spawner and every pending removal.
    ///
    /// The collection is frozen as it is; later `advance` calls do nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.spawner.stop();
        let cancelled = self.scheduler.len();
        self.scheduler.cancel_all();
        self.disposed = true;
        tracing::info!(
            "Wave disposed ({} removals cancelled, {} particles frozen)",
            cancelled,
            self.particles.len()
        );
    }

    /// Earliest time at which `advance` will have work to do.
    pub fn next_wakeup(&self) -> Option<f64> {
        if self.disposed {
            return None;
        }
        match (self.spawner.next_tick(), self.scheduler.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Apply every spawn and removal due at or before `now`.
    ///
    /// Events are processed in time order. When a removal and a spawn fall
    /// on the same instant, the removal goes first.
    pub fn advance(&mut self, now: f64) -> Vec<WaveEvent> {
        let mut events = Vec::new();
        if self.disposed {
            tracing::warn!("advance({:.3}) on a disposed wave ignored", now);
            return events;
        }

        loop {
            let spawn_at = self.spawner.next_tick().filter(|t| *t <= now);
            let remove_at = self.scheduler.next_deadline().filter(|t| *t <= now);

            let removal_first = match (spawn_at, remove_at) {
                (None, None) => break,
                (Some(s), Some(r)) => r <= s,
                (None, Some(_)) => true,
                (Some(_), None) => false,
            };

            if removal_first {
                if let Some((at, id)) = self.scheduler.pop_due(now) {
                    if self.remove(id) {
                        events.push(WaveEvent::Removed { id, at });
                    }
                }
            } else if let Some(particle) = self.spawner.spawn_due(now, &self.config) {
                let event = WaveEvent::Spawned {
                    id: particle.id(),
                    at: particle.born_at(),
                };
                self.insert(particle);
                events.push(event);
            }
        }

        events
    }

    fn insert(&mut self, particle: Particle) {
        tracing::debug!(
            "Spawned {} at {:.3}s: radius {:.1}, lifetime {:.2}s, opacity {:.2}",
            particle.id(),
            particle.born_at(),
            particle.target_radius(),
            particle.lifetime(),
            particle.opacity()
        );
        self.scheduler
            .schedule_removal(particle.id(), particle.born_at(), particle.lifetime());
        self.particles.push(particle);
        self.revision += 1;

        if let Some(particle) = self.particles.last() {
            for observer in &mut self.observers {
                observer.on_spawned(particle);
            }
        }
    }

    /// First-render trigger for a particle: arms its growth animation.
    ///
    /// Returns `Ok(true)` when this call set the current radius, `Ok(false)`
    /// if the particle was already mounted.
    pub fn mount(&mut self, id: ParticleId) -> Result<bool, WaveError> {
        if self.disposed {
            return Err(WaveError::Disposed);
        }
        let particle = self
            .particles
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(WaveError::UnknownParticle(id))?;

        if !particle.mount() {
            return Ok(false);
        }
        tracing::trace!("Mounted {} (radius -> {:.1})", id, particle.current_radius());
        for observer in &mut self.observers {
            observer.on_mounted(particle);
        }
        Ok(true)
    }

    /// Remove a particle by id. Absent ids are ignored.
    ///
    /// Returns whether a particle was removed. A disposed wave is frozen,
    /// so this always returns `false` after `dispose`.
    pub fn remove(&mut self, id: ParticleId) -> bool {
        if self.disposed {
            tracing::warn!("Removal of {} on a disposed wave ignored", id);
            return false;
        }
        let Some(idx) = self.particles.iter().position(|p| p.id() == id) else {
            tracing::trace!("Removal of {} skipped, not live", id);
            return false;
        };
        self.particles.remove(idx);
        self.revision += 1;
        tracing::debug!("Removed {} ({} live)", id, self.particles.len());

        for observer in &mut self.observers {
            observer.on_removed(id);
        }
        true
    }

    /// Drop every live particle. Their armed deadlines become no-ops.
    ///
    /// Does nothing once the wave is disposed.
    pub fn clear(&mut self) {
        if self.disposed || self.particles.is_empty() {
            return;
        }
        let ids: Vec<ParticleId> = self.particles.iter().map(|p| p.id()).collect();
        for id in ids {
            self.remove(id);
        }
    }

    /// GPU-ready snapshot of all live particles, in collection order.
    pub fn instances(&self) -> Vec<ParticleInstance> {
        let blur = self.config.effective_blur();
        self.particles.iter().map(|p| p.to_instance(blur)).collect()
    }
}
