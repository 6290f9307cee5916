//! Numerical and physical parameters for the simulation
//!
//! `ProfileParams` describes the radial density profile:
//! - planet radius and the outer edge of the radial grid (`radial_scale_max`),
//! - grid resolution (`n_grid`),
//! - normalization `kappa` and the two exponential components (amplitude, decay length)
//!
//! `Parameters` holds runtime stepping settings (time step, step count, random seed).

use super::error::{ExoError, Result};

/// Mean Earth radius in meters
pub const R_EARTH: f64 = 6.371e6;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileParams {
    pub planet_radius: f64, // R_planet, meters
    pub radial_scale_max: f64, // grid spans [1, radial_scale_max] planet radii
    pub n_grid: usize, // number of radial grid points
    pub kappa: f64, // overall normalization
    pub inner_amplitude: f64, // A, dominant near the surface
    pub inner_scale: f64, // L_inner in planet radii
    pub outer_amplitude: f64, // B, slowly decaying halo
    pub outer_scale: f64, // L_outer in planet radii
}

impl Default for ProfileParams {
    fn default() -> Self {
        Self {
            planet_radius: R_EARTH,
            radial_scale_max: 10.0,
            n_grid: 10_000,
            kappa: 2.0,
            inner_amplitude: 1.0e4,
            inner_scale: 1.02,
            outer_amplitude: 70.0,
            outer_scale: 8.2,
        }
    }
}

impl ProfileParams {
    /// Check every field against its documented range.
    /// `kappa == 0` passes here; it is reported later as a degenerate profile.
    pub fn validate(&self) -> Result<()> {
        if !(self.planet_radius > 0.0 && self.planet_radius.is_finite()) {
            return Err(ExoError::InvalidConfig(format!(
                "planet_radius must be positive, got {}",
                self.planet_radius
            )));
        }
        if !(self.radial_scale_max > 1.0 && self.radial_scale_max.is_finite()) {
            return Err(ExoError::InvalidConfig(format!(
                "radial_scale_max must be > 1, got {}",
                self.radial_scale_max
            )));
        }
        if self.n_grid < 2 {
            return Err(ExoError::InvalidConfig(format!(
                "n_grid must be at least 2, got {}",
                self.n_grid
            )));
        }
        if !(self.kappa >= 0.0 && self.kappa.is_finite()) {
            return Err(ExoError::InvalidConfig(format!(
                "kappa must be non-negative, got {}",
                self.kappa
            )));
        }
        if self.inner_amplitude < 0.0 || self.outer_amplitude < 0.0 {
            return Err(ExoError::InvalidConfig(
                "profile amplitudes must be non-negative".to_string(),
            ));
        }
        if !(self.inner_scale > 0.0 && self.outer_scale > 0.0) {
            return Err(ExoError::InvalidConfig(
                "profile decay lengths must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub dt: f64, // step size
    pub steps: usize, // number of update steps to run
    pub seed: Option<u64>, // deterministic seed, `None` draws from OS entropy
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: 1.0,
            steps: 0,
            seed: None,
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> Result<()> {
        if !self.dt.is_finite() {
            return Err(ExoError::InvalidConfig(format!("dt must be finite, got {}", self.dt)));
        }
        Ok(())
    }
}
