pub mod states;
pub mod params;
pub mod error;
pub mod density;
pub mod sampler;
pub mod forces;
pub mod integrator;
pub mod swarm;
pub mod scenario;
