//! Particle swarm: owns the exosphere ensemble and steps it forward
//!
//! Construction samples every particle position from the radial density
//! profile (velocities start at zero); `update` applies one integrator step
//! to the whole ensemble in place.

use rand::Rng;
use tracing::{debug, info, warn};

use super::density::{DensityProfile, RadialGrid};
use super::error::{ExoError, Result};
use super::forces::{AccelSet, ConstantDrift};
use super::integrator::semi_implicit_euler;
use super::params::ProfileParams;
use super::sampler::RadialSampler;
use super::states::{NVec3, ParticleState};

#[derive(Debug)]
pub struct ParticleSwarm {
    n_particles: usize, // fixed at construction
    state: ParticleState, // current positions / velocities
    forces: AccelSet, // active acceleration terms
}

/// Summary numbers of the current swarm, used for logging
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmStats {
    pub n: usize,
    pub min_radius: f64,
    pub max_radius: f64,
    pub mean_radius: f64,
    pub centroid: NVec3,
    pub mean_speed: f64,
}

impl ParticleSwarm {
    /// Sample `n_particles` positions from the profile described by `params`.
    ///
    /// Fails with [`ExoError::InvalidParticleCount`] for zero particles, with
    /// [`ExoError::InvalidConfig`] for out-of-range parameters and with
    /// [`ExoError::DegenerateProfile`] if every weight is zero. All checks run
    /// before the first random draw.
    pub fn new<R: Rng + ?Sized>(
        n_particles: usize,
        params: &ProfileParams,
        forces: AccelSet,
        rng: &mut R,
    ) -> Result<Self> {
        if n_particles == 0 {
            return Err(ExoError::InvalidParticleCount(n_particles));
        }
        params.validate()?;

        let grid = RadialGrid::from_params(params);
        let profile = DensityProfile::build(&grid, params);
        let sampler = RadialSampler::new(grid, &profile)?;

        Self::from_sampler(n_particles, &sampler, forces, rng)
    }

    /// Default profile with the solar-wind drift as the only force
    pub fn with_defaults<R: Rng + ?Sized>(n_particles: usize, rng: &mut R) -> Result<Self> {
        let forces = AccelSet::new().with(ConstantDrift::default());
        Self::new(n_particles, &ProfileParams::default(), forces, rng)
    }

    /// Sample positions from an already built sampler
    pub fn from_sampler<R: Rng + ?Sized>(
        n_particles: usize,
        sampler: &RadialSampler,
        forces: AccelSet,
        rng: &mut R,
    ) -> Result<Self> {
        if n_particles == 0 {
            return Err(ExoError::InvalidParticleCount(n_particles));
        }

        let positions = sampler.sample_positions(n_particles, rng);
        let state = ParticleState::at_rest(positions);

        info!(
            n_particles,
            n_grid = sampler.grid().len(),
            force_terms = forces.len(),
            "initialized particle swarm"
        );

        Ok(Self {
            n_particles,
            state,
            forces,
        })
    }

    pub fn n_particles(&self) -> usize {
        self.n_particles
    }

    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    pub fn positions(&self) -> &[NVec3] {
        self.state.positions()
    }

    pub fn velocities(&self) -> &[NVec3] {
        self.state.velocities()
    }

    pub fn forces(&self) -> &AccelSet {
        &self.forces
    }

    /// Advance every particle by one step of size `dt`
    pub fn update(&mut self, dt: f64) {
        if dt == 0.0 {
            warn!("update called with dt = 0, state is unchanged");
        }
        semi_implicit_euler(&mut self.state, &self.forces, dt);
        debug_assert!(self.state.check().is_ok());
        debug!(t = self.state.t, dt, "swarm updated");
    }

    /// Apply `steps` updates of size `dt`
    pub fn run(&mut self, steps: usize, dt: f64) {
        for _ in 0..steps {
            self.update(dt);
        }
    }

    /// Distance of every particle from the planet center
    pub fn radii(&self) -> Vec<f64> {
        self.positions().iter().map(|x| x.norm()).collect()
    }

    pub fn stats(&self) -> SwarmStats {
        let n = self.n_particles;
        let radii = self.radii();
        let min_radius = radii.iter().copied().fold(f64::INFINITY, f64::min);
        let max_radius = radii.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean_radius = radii.iter().sum::<f64>() / n as f64;
        let centroid = self.positions().iter().fold(NVec3::zeros(), |acc, x| acc + x) / n as f64;
        let mean_speed = self.velocities().iter().map(|v| v.norm()).sum::<f64>() / n as f64;

        SwarmStats {
            n,
            min_radius,
            max_radius,
            mean_radius,
            centroid,
            mean_speed,
        }
    }
}
