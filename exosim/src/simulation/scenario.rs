//! Build fully-initialized exosphere scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - numerical parameters (`Parameters`) and the density profile (`ProfileParams`)
//! - the sampled particle swarm with its active force set
//! - the satellite imager settings, if the scenario has an `imager` section

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::info;

use crate::configuration::config::ScenarioConfig;
use crate::imaging::satellite::SatelliteConfig;
use crate::simulation::error::Result;
use crate::simulation::forces::{AccelSet, ConstantDrift};
use crate::simulation::params::{Parameters, ProfileParams};
use crate::simulation::states::NVec3;
use crate::simulation::swarm::ParticleSwarm;

/// Runtime bundle constructed from a [`ScenarioConfig`]
#[derive(Debug)]
pub struct Scenario {
    pub parameters: Parameters,
    pub profile: ProfileParams,
    pub swarm: ParticleSwarm,
    pub imager: Option<SatelliteConfig>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Parameters (runtime) from ParametersConfig
        let mut parameters = cfg.runtime_parameters();
        parameters.validate()?;

        // Profile (runtime) from ProfileConfig
        let profile = ProfileParams::from(&cfg.profile);

        // Forces: the constant drift is the only registered term
        let forces = AccelSet::new().with(ConstantDrift {
            drift: NVec3::from(cfg.forces.drift),
        });

        // Unseeded runs draw a seed from OS entropy and keep it, so every run can be replayed
        let seed = parameters.seed.unwrap_or_else(|| StdRng::from_entropy().next_u64());
        parameters.seed = Some(seed);
        info!(seed, "seeding particle sampler");
        let mut rng = StdRng::seed_from_u64(seed);

        let swarm = ParticleSwarm::new(cfg.swarm.n_particles, &profile, forces, &mut rng)?;

        let imager = cfg.imager.as_ref().map(SatelliteConfig::from).map(|c| c.validated()).transpose()?;

        info!(
            n_particles = swarm.n_particles(),
            steps = parameters.steps,
            dt = parameters.dt,
            imager = imager.is_some(),
            "scenario built"
        );

        Ok(Self {
            parameters,
            profile,
            swarm,
            imager,
        })
    }

    /// Run the configured number of steps
    pub fn run(&mut self) {
        self.swarm.run(self.parameters.steps, self.parameters.dt);
    }
}
