//! Inverse-CDF radial sampling and isotropic angular sampling
//!
//! Radii are drawn from the volumetric density `weight(r) * r^2`:
//! - the running sum of `weight * r^2` over the grid is normalized into a CDF,
//! - a uniform draw `u` is mapped back to a radius by linear interpolation on (CDF, grid).
//!
//! Directions are uniform on the unit sphere: `phi ~ U(0, 2pi)`, `cos(theta) ~ U(-1, 1)`.

use std::f64::consts::TAU;

use rand::Rng;
use tracing::debug;

use super::density::{DensityProfile, RadialGrid};
use super::error::{ExoError, Result};
use super::states::NVec3;

/// Normalized cumulative distribution over a radial grid.
/// Non-decreasing, last value exactly 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Cdf {
    values: Vec<f64>,
}

impl Cdf {
    /// Running sum of `weight[i] * r[i]^2`, divided by its last element.
    /// Fails with [`ExoError::DegenerateProfile`] if that last element is not positive.
    pub fn volumetric(grid: &RadialGrid, profile: &DensityProfile) -> Result<Self> {
        if grid.len() != profile.len() {
            return Err(ExoError::InvalidConfig(format!(
                "profile has {} weights for a grid of {} radii",
                profile.len(),
                grid.len()
            )));
        }

        // a negative weight would make the running sum decrease
        if let Some(bad) = profile.weights().iter().find(|w| !(**w >= 0.0 && w.is_finite())) {
            return Err(ExoError::InvalidConfig(format!(
                "profile weights must be non-negative and finite, got {bad}"
            )));
        }

        let mut acc = 0.0;
        let mut values: Vec<f64> = grid
            .radii()
            .iter()
            .zip(profile.weights())
            .map(|(r, w)| {
                acc += w * r * r;
                acc
            })
            .collect();

        let total = values.last().copied().unwrap_or(0.0);
        if !(total > 0.0 && total.is_finite()) {
            return Err(ExoError::DegenerateProfile { total });
        }

        for v in values.iter_mut() {
            *v /= total;
        }
        if let Some(last) = values.last_mut() {
            *last = 1.0;
        }

        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Draws particle radii and positions from a density profile
#[derive(Debug, Clone)]
pub struct RadialSampler {
    grid: RadialGrid,
    cdf: Cdf,
}

impl RadialSampler {
    pub fn new(grid: RadialGrid, profile: &DensityProfile) -> Result<Self> {
        let cdf = Cdf::volumetric(&grid, profile)?;
        debug!(n_grid = grid.len(), first = cdf.values()[0], "built volumetric cdf");
        Ok(Self { grid, cdf })
    }

    pub fn grid(&self) -> &RadialGrid {
        &self.grid
    }

    pub fn cdf(&self) -> &Cdf {
        &self.cdf
    }

    /// Radius `r` with `CDF(r) = u`, linearly interpolated between the bracketing grid points.
    /// `u` below the first CDF value maps to the innermost radius, `u >= 1` to the outermost.
    pub fn invert(&self, u: f64) -> f64 {
        let cdf = self.cdf.values();
        let radii = self.grid.radii();
        let last = radii.len() - 1;

        // first index whose cdf value is strictly above u
        let hi = cdf.partition_point(|&c| c <= u);
        if hi == 0 {
            return radii[0];
        }
        if hi > last {
            return radii[last];
        }

        let lo = hi - 1;
        // cdf[hi] > u >= cdf[lo], so the denominator is positive
        let frac = (u - cdf[lo]) / (cdf[hi] - cdf[lo]);
        radii[lo] + frac * (radii[hi] - radii[lo])
    }

    /// CDF value at radius `r`, the forward map of [`Self::invert`]
    pub fn cdf_at(&self, r: f64) -> f64 {
        let cdf = self.cdf.values();
        let radii = self.grid.radii();
        let last = radii.len() - 1;

        if r <= radii[0] {
            return cdf[0];
        }
        if r >= radii[last] {
            return 1.0;
        }
        let hi = radii.partition_point(|&x| x <= r);
        let lo = hi - 1;
        let frac = (r - radii[lo]) / (radii[hi] - radii[lo]);
        cdf[lo] + frac * (cdf[hi] - cdf[lo])
    }

    pub fn sample_radius<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.invert(rng.gen::<f64>())
    }

    pub fn sample_position<R: Rng + ?Sized>(&self, rng: &mut R) -> NVec3 {
        let r = self.sample_radius(rng);
        r * isotropic_direction(rng)
    }

    /// `n` independent positions
    pub fn sample_positions<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<NVec3> {
        (0..n).map(|_| self.sample_position(rng)).collect()
    }
}

/// Unit vector uniformly distributed on the sphere
pub fn isotropic_direction<R: Rng + ?Sized>(rng: &mut R) -> NVec3 {
    let phi = rng.gen_range(0.0..TAU);
    let cos_theta: f64 = rng.gen_range(-1.0..1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    NVec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}
