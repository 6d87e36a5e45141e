//! Acceleration contributors along the body's path
//!
//! Each term implements [`Acceleration`] and returns a scalar acceleration
//! along the direction of travel. An [`AccelSet`] sums its terms, and the
//! steppers hold one set per phase.

use super::params::{SimulationConfig, G};

/// The surface the body is travelling on, seen along its direction of travel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Path {
    pub slope: f64, // radians, > 0 travelling downhill, < 0 travelling uphill, 0 flat
}

impl Path {
    pub const FLAT: Path = Path { slope: 0.0 };

    pub fn downhill(angle: f64) -> Self {
        Self { slope: angle }
    }

    pub fn uphill(angle: f64) -> Self {
        Self { slope: -angle }
    }
}

/// Trait for acceleration sources acting along a [`Path`]
pub trait Acceleration {
    fn acceleration(&self, path: &Path) -> f64;
}

/// Tangential component of gravity, g sin(slope)
pub struct GravityAlongPath {
    pub g: f64,
}

impl Acceleration for GravityAlongPath {
    fn acceleration(&self, path: &Path) -> f64 {
        self.g * path.slope.sin()
    }
}

/// Kinetic Coulomb friction, always opposing travel: -mu g cos(slope)
pub struct SlidingFriction {
    pub mu: f64, // friction coefficient
    pub g: f64,
}

impl Acceleration for SlidingFriction {
    fn acceleration(&self, path: &Path) -> f64 {
        -self.mu * self.g * path.slope.cos()
    }
}

/// Collection of acceleration terms for one phase
#[derive(Default)]
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Sum of all terms along `path`
    pub fn along(&self, path: &Path) -> f64 {
        self.terms.iter().map(|term| term.acceleration(path)).sum()
    }

    /// Gravity plus friction on a sloped surface
    pub fn gravity_with_friction(mu: f64) -> Self {
        Self::new()
            .with(GravityAlongPath { g: G })
            .with(SlidingFriction { mu, g: G })
    }

    /// Friction only, for flat ground
    pub fn friction_only(mu: f64) -> Self {
        Self::new().with(SlidingFriction { mu, g: G })
    }
}

impl std::fmt::Debug for AccelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccelSet")
            .field("terms", &self.terms.len())
            .finish()
    }
}

/// Acceleration of a body sliding down the incline: g sin - mu g cos
pub fn descent_incline_acceleration(cfg: &SimulationConfig) -> f64 {
    AccelSet::gravity_with_friction(cfg.friction_incline).along(&Path::downhill(cfg.angle))
}

/// Acceleration of a body climbing the incline: -g sin - mu g cos
pub fn ascent_incline_acceleration(cfg: &SimulationConfig) -> f64 {
    AccelSet::gravity_with_friction(cfg.friction_incline).along(&Path::uphill(cfg.angle))
}

/// Acceleration of a body sliding on the horizontal, along its travel: -mu g
pub fn horizontal_acceleration(cfg: &SimulationConfig) -> f64 {
    AccelSet::friction_only(cfg.friction_horizontal).along(&Path::FLAT)
}
