//! Core state types for the exosphere particle model.
//!
//! Defines the particle ensemble state:
//! - `ParticleState` holds one position and one velocity per particle (`NVec3`)
//! - the current simulation time `t`
//!
//! Index `i` in `positions` and `velocities` always refers to the same particle.

use nalgebra::Vector3;

use super::error::{ExoError, Result};

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    positions: Vec<NVec3>, // 3d positions
    velocities: Vec<NVec3>, // 3d velocities
    pub t: f64, // time
}

impl ParticleState {
    /// Build a state from matching position and velocity arrays.
    /// Fails with [`ExoError::ShapeMismatch`] if the lengths differ.
    pub fn new(positions: Vec<NVec3>, velocities: Vec<NVec3>) -> Result<Self> {
        let state = Self {
            positions,
            velocities,
            t: 0.0,
        };
        state.check()?;
        Ok(state)
    }

    /// State with the given positions and every velocity set to zero
    pub fn at_rest(positions: Vec<NVec3>) -> Self {
        let velocities = vec![NVec3::zeros(); positions.len()];
        Self {
            positions,
            velocities,
            t: 0.0,
        }
    }

    /// Verify that positions and velocities are index-aligned
    pub fn check(&self) -> Result<()> {
        if self.positions.len() != self.velocities.len() {
            return Err(ExoError::ShapeMismatch {
                positions: self.positions.len(),
                velocities: self.velocities.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[NVec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[NVec3] {
        &self.velocities
    }

    /// Mutable views of both arrays at once, for in-place integration.
    /// The arrays themselves cannot be resized through these slices.
    pub fn split_mut(&mut self) -> (&mut [NVec3], &mut [NVec3]) {
        (self.positions.as_mut_slice(), self.velocities.as_mut_slice())
    }
}
