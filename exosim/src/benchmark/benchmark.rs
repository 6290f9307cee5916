use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::simulation::density::{DensityProfile, RadialGrid};
use crate::simulation::forces::{AccelSet, ConstantDrift};
use crate::simulation::params::ProfileParams;
use crate::simulation::sampler::RadialSampler;
use crate::simulation::swarm::ParticleSwarm;

/// Time swarm construction (cdf build + sampling) for growing N
pub fn bench_sampling() {
    // Different swarm sizes to test
    let ns = [1_000, 10_000, 100_000, 1_000_000];
    let params = ProfileParams::default();

    for n in ns {
        let mut rng = StdRng::seed_from_u64(42);

        // Profile + cdf only
        let t0 = Instant::now();
        let grid = RadialGrid::from_params(&params);
        let profile = DensityProfile::build(&grid, &params);
        let sampler = match RadialSampler::new(grid, &profile) {
            Ok(s) => s,
            Err(e) => {
                println!("N = {n:8}, sampler failed: {e}");
                return;
            }
        };
        let dt_cdf = t0.elapsed().as_secs_f64();

        // Position draws
        let t1 = Instant::now();
        let positions = sampler.sample_positions(n, &mut rng);
        let dt_sample = t1.elapsed().as_secs_f64();

        println!(
            "N = {n:8}, cdf = {:8.6} s, sample = {:8.6} s ({} positions)",
            dt_cdf,
            dt_sample,
            positions.len()
        );
    }
}

/// Time update steps for growing N.
/// Paste output directly into a spreadsheet to graph
pub fn bench_update() {
    println!("N,ms_per_step");

    let ns = [1_000, 10_000, 100_000, 1_000_000];
    let steps = 10; // steps averaged per N

    for n in ns {
        let mut rng = StdRng::seed_from_u64(42);
        let forces = AccelSet::new().with(ConstantDrift::default());
        let mut swarm = match ParticleSwarm::new(n, &ProfileParams::default(), forces, &mut rng) {
            Ok(s) => s,
            Err(e) => {
                println!("{n},failed: {e}");
                return;
            }
        };

        // Warm-up
        swarm.update(1.0);

        let t0 = Instant::now();
        swarm.run(steps, 1.0);
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
