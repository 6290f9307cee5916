//! Force / acceleration contributors for the particle swarm
//!
//! Defines the acceleration trait, the `AccelSet` collection that sums all
//! registered terms, and the constant solar-wind drift term.

use super::states::{NVec3, ParticleState};

/// Drift vector applied by default, a bulk solar-wind push along +x
pub const SOLAR_WIND_DRIFT: [f64; 3] = [500.0, 0.0, 0.0];

/// Collection of acceleration terms (drift, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per particle
#[derive(Default)]
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations at time `t` for all particles in `state`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, state: &ParticleState, out: &mut [NVec3]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(t, state, out);
        }
    }
}

impl std::fmt::Debug for AccelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccelSet").field("terms", &self.terms.len()).finish()
    }
}

/// Acceleration source operating on a [`ParticleState`].
/// Implementations add their contribution into `out[i]` for each particle
pub trait Acceleration {
    fn acceleration(&self, t: f64, state: &ParticleState, out: &mut [NVec3]);
}

/// Same acceleration for every particle, independent of position and time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantDrift {
    pub drift: NVec3,
}

impl Default for ConstantDrift {
    fn default() -> Self {
        Self {
            drift: NVec3::from(SOLAR_WIND_DRIFT),
        }
    }
}

impl Acceleration for ConstantDrift {
    fn acceleration(&self, _t: f64, _state: &ParticleState, out: &mut [NVec3]) {
        for a in out.iter_mut() {
            *a += self.drift;
        }
    }
}
