//! Configuration types for loading exosphere scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`SwarmConfig`]      – particle count and optional random seed
//! - [`ProfileConfig`]    – radial density profile (grid span, normalization, decay lengths)
//! - [`ParametersConfig`] – time step and number of steps
//! - [`ForcesConfig`]     – constant drift vector
//! - [`ImagerConfig`]     – optional satellite imager geometry and model settings
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Only `swarm` is required; every other section falls back to the model defaults.
//!
//! # YAML format
//!
//! ```yaml
//! swarm:
//!   n_particles: 1000
//!   seed: 42                # optional, omit for a random seed
//!
//! profile:
//!   planet_radius: 6.371e6  # meters
//!   radial_scale_max: 10.0  # grid spans [1, 10] planet radii
//!   n_grid: 10000
//!   kappa: 2.0
//!   inner_amplitude: 1.0e4
//!   inner_scale: 1.02
//!   outer_amplitude: 70.0
//!   outer_scale: 8.2
//!
//! parameters:
//!   dt: 1.0
//!   steps: 10
//!
//! forces:
//!   drift: [500.0, 0.0, 0.0]
//!
//! imager:
//!   position: [6.6, 6.6, 0.0] # planet radii
//!   target: [0.0, 6.6, -0.15]
//!   fov: 18.0               # degrees
//!   pixangres: 0.25         # degrees between pixels
//!   irradiance: 0.008519
//!   model: "Z15MAX"
//!   dl: 0.05
//!   min_rad: 3.0
//!   max_rad: 8.0
//! ```

use serde::Deserialize;

use crate::simulation::forces::SOLAR_WIND_DRIFT;
use crate::simulation::params::{Parameters, ProfileParams};

/// Particle count and seed
#[derive(Deserialize, Debug, Clone)]
pub struct SwarmConfig {
    pub n_particles: usize, // number of particles, must be at least 1
    #[serde(default)]
    pub seed: Option<u64>, // deterministic seed to make runs reproducible
}

/// Radial density profile settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ProfileConfig {
    pub planet_radius: f64,
    pub radial_scale_max: f64,
    pub n_grid: usize,
    pub kappa: f64,
    pub inner_amplitude: f64,
    pub inner_scale: f64,
    pub outer_amplitude: f64,
    pub outer_scale: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        let p = ProfileParams::default();
        Self {
            planet_radius: p.planet_radius,
            radial_scale_max: p.radial_scale_max,
            n_grid: p.n_grid,
            kappa: p.kappa,
            inner_amplitude: p.inner_amplitude,
            inner_scale: p.inner_scale,
            outer_amplitude: p.outer_amplitude,
            outer_scale: p.outer_scale,
        }
    }
}

impl From<&ProfileConfig> for ProfileParams {
    fn from(cfg: &ProfileConfig) -> Self {
        Self {
            planet_radius: cfg.planet_radius,
            radial_scale_max: cfg.radial_scale_max,
            n_grid: cfg.n_grid,
            kappa: cfg.kappa,
            inner_amplitude: cfg.inner_amplitude,
            inner_scale: cfg.inner_scale,
            outer_amplitude: cfg.outer_amplitude,
            outer_scale: cfg.outer_scale,
        }
    }
}

/// Stepping parameters
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub dt: f64,      // time step size
    pub steps: usize, // number of update steps
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self { dt: 1.0, steps: 0 }
    }
}

/// Force terms acting on the swarm
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ForcesConfig {
    pub drift: [f64; 3], // constant acceleration applied to every particle
}

impl Default for ForcesConfig {
    fn default() -> Self {
        Self {
            drift: SOLAR_WIND_DRIFT,
        }
    }
}

/// Satellite imager settings, positions in planet radii
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ImagerConfig {
    pub position: [f64; 3],
    pub target: [f64; 3],
    pub fov: f64,
    pub pixangres: f64,
    pub irradiance: f64,
    pub model: String,
    pub dl: f64,
    pub min_rad: f64,
    pub max_rad: f64,
}

impl Default for ImagerConfig {
    fn default() -> Self {
        Self {
            position: [6.6, 6.6, 0.0],
            target: [0.0, 6.6, -0.15],
            fov: 18.0,
            pixangres: 0.25,
            irradiance: 0.008519, // Lyman-alpha composite irradiance
            model: "Z15MAX".to_string(),
            dl: 0.05,
            min_rad: 3.0,
            max_rad: 8.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub swarm: SwarmConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub forces: ForcesConfig,
    #[serde(default)]
    pub imager: Option<ImagerConfig>,
}

impl ScenarioConfig {
    /// Runtime stepping parameters, seed taken from the swarm section
    pub fn runtime_parameters(&self) -> Parameters {
        Parameters {
            dt: self.parameters.dt,
            steps: self.parameters.steps,
            seed: self.swarm.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_uses_defaults() {
        let cfg: ScenarioConfig = serde_yaml::from_str("swarm:\n  n_particles: 10\n").unwrap();

        assert_eq!(cfg.swarm.n_particles, 10);
        assert_eq!(cfg.swarm.seed, None);
        assert_eq!(ProfileParams::from(&cfg.profile), ProfileParams::default());
        assert_eq!(cfg.parameters.dt, 1.0);
        assert_eq!(cfg.forces.drift, [500.0, 0.0, 0.0]);
        assert!(cfg.imager.is_none());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let yaml = "
swarm:
  n_particles: 5
  seed: 9
profile:
  kappa: 0.5
parameters:
  steps: 3
forces:
  drift: [0.0, -1.0, 0.0]
imager:
  fov: 10.0
";
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
        let params = cfg.runtime_parameters();

        assert_eq!(cfg.profile.kappa, 0.5);
        assert_eq!(cfg.profile.n_grid, 10_000);
        assert_eq!(params.steps, 3);
        assert_eq!(params.dt, 1.0);
        assert_eq!(params.seed, Some(9));
        assert_eq!(cfg.forces.drift, [0.0, -1.0, 0.0]);

        let imager = cfg.imager.unwrap();
        assert_eq!(imager.fov, 10.0);
        assert_eq!(imager.model, "Z15MAX");
    }

    #[test]
    fn missing_swarm_section_fails() {
        assert!(serde_yaml::from_str::<ScenarioConfig>("parameters:\n  dt: 1.0\n").is_err());
    }
}
