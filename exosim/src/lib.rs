pub mod simulation;
pub mod configuration;
pub mod imaging;
pub mod benchmark;

pub use simulation::states::{ParticleState, NVec3};
pub use simulation::error::{ExoError, Result};
pub use simulation::params::{Parameters, ProfileParams, R_EARTH};
pub use simulation::density::{DensityProfile, RadialGrid};
pub use simulation::sampler::{Cdf, RadialSampler, isotropic_direction};
pub use simulation::forces::{Acceleration, AccelSet, ConstantDrift};
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::swarm::{ParticleSwarm, SwarmStats};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ScenarioConfig, SwarmConfig, ProfileConfig, ParametersConfig, ForcesConfig, ImagerConfig};

pub use imaging::satellite::{SatelliteConfig, SatelliteImager, LosGenerator, IntensityModel, IntensityImage, RadiativeSettings};
pub use imaging::sink::{RenderSink, TextSink};

pub use benchmark::benchmark::{bench_sampling, bench_update};
