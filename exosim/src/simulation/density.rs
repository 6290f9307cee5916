//! Radial grid and two-component exponential density profile
//!
//! The profile weight at radius `r` is
//!
//! `kappa * (A * exp(-r_norm / L_inner) + B * exp(-r_norm / L_outer))`
//!
//! with `r_norm = r / R_planet`. Weights are unnormalized; the sampler turns them into a CDF.

use super::error::{ExoError, Result};
use super::params::ProfileParams;

/// Ascending, strictly positive radii (meters)
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGrid {
    radii: Vec<f64>,
}

impl RadialGrid {
    /// `n` evenly spaced radii over `[min, max]`, endpoints included
    pub fn linspace(min: f64, max: f64, n: usize) -> Self {
        let radii = match n {
            0 => Vec::new(),
            1 => vec![min],
            _ => {
                let step = (max - min) / (n - 1) as f64;
                let mut radii: Vec<f64> = (0..n).map(|i| min + step * i as f64).collect();
                // pin the last point so rounding never shrinks the span
                radii[n - 1] = max;
                radii
            }
        };
        Self { radii }
    }

    /// Grid spanning `[1, radial_scale_max]` planet radii
    pub fn from_params(params: &ProfileParams) -> Self {
        Self::linspace(
            params.planet_radius,
            params.radial_scale_max * params.planet_radius,
            params.n_grid,
        )
    }

    /// Wrap caller-provided radii, checking they are positive and strictly increasing
    pub fn from_radii(radii: Vec<f64>) -> Result<Self> {
        if let Some(bad) = radii.iter().find(|r| !(**r > 0.0 && r.is_finite())) {
            return Err(ExoError::InvalidConfig(format!(
                "grid radii must be positive and finite, got {bad}"
            )));
        }
        if radii.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ExoError::InvalidConfig(
                "grid radii must be strictly increasing".to_string(),
            ));
        }
        Ok(Self { radii })
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    pub fn min(&self) -> Option<f64> {
        self.radii.first().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.radii.last().copied()
    }
}

/// Unnormalized weights, index-aligned with a [`RadialGrid`]
#[derive(Debug, Clone, PartialEq)]
pub struct DensityProfile {
    weights: Vec<f64>,
}

impl DensityProfile {
    /// Evaluate the two-component profile at every grid point
    pub fn build(grid: &RadialGrid, params: &ProfileParams) -> Self {
        let weights = grid
            .radii()
            .iter()
            .map(|&r| profile_weight(r / params.planet_radius, params))
            .collect();
        Self { weights }
    }

    /// Wrap precomputed weights (e.g. an empirical profile)
    pub fn from_weights(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Profile weight at a radius given in planet radii
pub fn profile_weight(r_norm: f64, params: &ProfileParams) -> f64 {
    let inner = params.inner_amplitude * (-r_norm / params.inner_scale).exp();
    let outer = params.outer_amplitude * (-r_norm / params.outer_scale).exp();
    params.kappa * (inner + outer)
}
