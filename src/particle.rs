//! A single wave particle.
//!
//! Everything except the current radius is fixed at spawn time. The current
//! radius starts at zero and is set to the target radius exactly once, when
//! the renderer first shows the particle. The host framework animates that
//! change over the particle's lifetime.

use std::fmt;

use glam::{Vec2, Vec3};

/// Identity of a particle. Never reused within one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(u64);

impl ParticleId {
    /// Wrap a raw id.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One animated wave.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    id: ParticleId,
    color: Vec3,
    position: Vec2,
    /// Seconds; both the growth duration and the removal delay.
    lifetime: f32,
    opacity: f32,
    target_radius: f32,
    current_radius: f32,
    born_at: f64,
    mounted: bool,
}

impl Particle {
    pub(crate) fn new(
        id: ParticleId,
        color: Vec3,
        position: Vec2,
        lifetime: f32,
        opacity: f32,
        target_radius: f32,
        born_at: f64,
    ) -> Self {
        Self {
            id,
            color,
            position,
            lifetime,
            opacity,
            target_radius,
            current_radius: 0.0,
            born_at,
            mounted: false,
        }
    }

    #[inline]
    pub fn id(&self) -> ParticleId {
        self.id
    }

    /// RGB color, each channel in `0.0..=1.0`.
    #[inline]
    pub fn color(&self) -> Vec3 {
        self.color
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Seconds between spawn and removal.
    #[inline]
    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Radius the particle grows to once mounted.
    #[inline]
    pub fn target_radius(&self) -> f32 {
        self.target_radius
    }

    /// Radius the renderer should animate toward right now.
    #[inline]
    pub fn current_radius(&self) -> f32 {
        self.current_radius
    }

    /// Time the particle was spawned.
    #[inline]
    pub fn born_at(&self) -> f64 {
        self.born_at
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Time at which the particle is removed.
    pub fn deadline(&self) -> f64 {
        self.born_at + self.lifetime as f64
    }

    /// Fraction of the lifetime elapsed at `now`, clamped to `0.0..=1.0`.
    pub fn progress(&self, now: f64) -> f32 {
        let age = (now - self.born_at) as f32;
        (age / self.lifetime).clamp(0.0, 1.0)
    }

    /// First-appearance trigger: arm the growth transition.
    ///
    /// Returns `true` only on the call that performed the transition; repeat
    /// calls leave the particle untouched.
    pub(crate) fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        self.current_radius = self.target_radius;
        true
    }

    /// GPU-ready snapshot of this particle.
    pub fn to_instance(&self, blur: f32) -> ParticleInstance {
        ParticleInstance {
            position: self.position.to_array(),
            current_radius: self.current_radius,
            target_radius: self.target_radius,
            color: self.color.to_array(),
            opacity: self.opacity,
            born_at: self.born_at as f32,
            lifetime: self.lifetime,
            blur,
            _pad: 0.0,
        }
    }
}

/// Flat per-instance record for renderers that upload live waves in one
/// buffer. Layout is `#[repr(C)]`, 48 bytes, all `f32`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    pub current_radius: f32,
    pub target_radius: f32,
    pub color: [f32; 3],
    pub opacity: f32,
    pub born_at: f32,
    pub lifetime: f32,
    pub blur: f32,
    _pad: f32,
}
