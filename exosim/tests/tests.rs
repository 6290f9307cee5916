use std::f64::consts::TAU;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use exosim::simulation::density::profile_weight;
use exosim::{
    semi_implicit_euler, AccelSet, ConstantDrift, DensityProfile, ExoError, NVec3, ParticleState,
    ParticleSwarm, ProfileParams, RadialGrid, RadialSampler, ScenarioConfig,
};

/// Sampler over the default profile
pub fn default_sampler() -> RadialSampler {
    let params = ProfileParams::default();
    let grid = RadialGrid::from_params(&params);
    let profile = DensityProfile::build(&grid, &params);
    RadialSampler::new(grid, &profile).unwrap()
}

/// Default swarm with the observed solar-wind drift
pub fn default_swarm(n: usize, seed: u64) -> ParticleSwarm {
    let mut rng = StdRng::seed_from_u64(seed);
    ParticleSwarm::with_defaults(n, &mut rng).unwrap()
}

/// Pearson chi-square of observed counts against expected probabilities
pub fn chi_square(observed: &[usize], probs: &[f64], n: usize) -> f64 {
    observed
        .iter()
        .zip(probs)
        .map(|(&o, &p)| {
            let e = p * n as f64;
            (o as f64 - e).powi(2) / e
        })
        .sum()
}

// ==================================================================================
// End-to-end scenarios
// ==================================================================================

#[test]
fn swarm_of_1000_lies_between_one_and_ten_planet_radii() {
    let swarm = default_swarm(1000, 42);
    let r_planet = ProfileParams::default().planet_radius;

    assert_eq!(swarm.positions().len(), 1000);
    assert_eq!(swarm.velocities().len(), 1000);

    for r in swarm.radii() {
        // |r * unit| can differ from r in the last bit
        assert!(r >= r_planet * (1.0 - 1e-12), "radius {r} below surface");
        assert!(r <= 10.0 * r_planet * (1.0 + 1e-12), "radius {r} beyond 10 R");
    }
    assert!(swarm.velocities().iter().all(|v| *v == NVec3::zeros()));
}

#[test]
fn one_solar_wind_step_from_rest() {
    let mut swarm = default_swarm(1000, 43);
    let before = swarm.positions().to_vec();

    swarm.update(1.0);

    let push = NVec3::new(500.0, 0.0, 0.0);
    assert!(swarm.velocities().iter().all(|v| *v == push));
    for (new, old) in swarm.positions().iter().zip(&before) {
        assert!((new - old - push).norm() < 1e-6, "moved by {:?}", new - old);
    }
}

#[test]
fn zero_dt_update_from_rest_changes_nothing() {
    let mut swarm = default_swarm(500, 44);
    let before = swarm.state().clone();

    swarm.update(0.0);

    assert_eq!(swarm.positions(), before.positions());
    assert_eq!(swarm.velocities(), before.velocities());
}

#[test]
fn zero_kappa_fails_before_sampling() {
    let params = ProfileParams {
        kappa: 0.0,
        ..Default::default()
    };
    let grid = RadialGrid::from_params(&params);
    let profile = DensityProfile::build(&grid, &params);
    assert!(profile.weights().iter().all(|w| *w == 0.0));

    let err = RadialSampler::new(grid, &profile).unwrap_err();
    assert!(matches!(err, ExoError::DegenerateProfile { .. }));

    let mut rng = StdRng::seed_from_u64(1);
    let err = ParticleSwarm::new(10, &params, AccelSet::new(), &mut rng).unwrap_err();
    assert!(matches!(err, ExoError::DegenerateProfile { .. }));
}

// ==================================================================================
// Sampling properties
// ==================================================================================

#[test]
fn density_construction_is_repeatable() {
    let params = ProfileParams::default();
    let grid = RadialGrid::from_params(&params);
    let a = DensityProfile::build(&grid, &params);
    let b = DensityProfile::build(&grid, &params);
    assert_eq!(a, b);
}

#[test]
fn radii_never_leave_the_grid() {
    let sampler = default_sampler();
    let (min, max) = (sampler.grid().min().unwrap(), sampler.grid().max().unwrap());
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..200_000 {
        let r = sampler.sample_radius(&mut rng);
        assert!(r >= min && r <= max);
    }
}

#[test]
fn directions_are_isotropic() {
    const N: usize = 100_000;
    const BINS: usize = 36;

    let swarm = default_swarm(N, 6);
    let mut cos_sum = 0.0;
    let mut counts = [0usize; BINS];

    for x in swarm.positions() {
        let r = x.norm();
        cos_sum += x.z / r;

        let phi = x.y.atan2(x.x).rem_euclid(TAU);
        let bin = ((phi / TAU) * BINS as f64) as usize;
        counts[bin.min(BINS - 1)] += 1;
    }

    // std of the mean is 1 / sqrt(3 N) ~ 0.0018
    let mean_cos = cos_sum / N as f64;
    assert!(mean_cos.abs() < 0.01, "mean cos(theta) = {mean_cos}");

    // 35 dof, 99.9% critical value ~ 66.6
    let chi2 = chi_square(&counts, &[1.0 / BINS as f64; BINS], N);
    assert!(chi2 < 80.0, "phi chi-square = {chi2}");
}

#[test]
fn polar_cosine_is_uniform() {
    const N: usize = 100_000;
    const BINS: usize = 20;

    let swarm = default_swarm(N, 8);
    let mut counts = [0usize; BINS];
    for x in swarm.positions() {
        let c = x.z / x.norm();
        let bin = (((c + 1.0) / 2.0) * BINS as f64) as usize;
        counts[bin.min(BINS - 1)] += 1;
    }

    // 19 dof, 99.9% critical value ~ 43.8
    let chi2 = chi_square(&counts, &[1.0 / BINS as f64; BINS], N);
    assert!(chi2 < 60.0, "cos(theta) chi-square = {chi2}");
}

#[test]
fn radial_histogram_follows_volumetric_profile() {
    const N: usize = 100_000;
    const BINS: usize = 20;
    const SUB: usize = 200;

    let params = ProfileParams::default();
    let r0 = params.planet_radius;
    let r1 = params.radial_scale_max * params.planet_radius;
    let width = (r1 - r0) / BINS as f64;

    // Expected bin masses from the analytic weight(r) * r^2, trapezoid rule
    let volumetric = |r: f64| profile_weight(r / params.planet_radius, &params) * r * r;
    let mut probs: Vec<f64> = (0..BINS)
        .map(|b| {
            let a = r0 + b as f64 * width;
            let h = width / SUB as f64;
            let inner: f64 = (1..SUB).map(|k| volumetric(a + k as f64 * h)).sum();
            h * (0.5 * volumetric(a) + inner + 0.5 * volumetric(a + width))
        })
        .collect();
    let total: f64 = probs.iter().sum();
    for p in probs.iter_mut() {
        *p /= total;
    }

    let sampler = default_sampler();
    let mut rng = StdRng::seed_from_u64(9);
    let mut counts = [0usize; BINS];
    for _ in 0..N {
        let r = sampler.sample_radius(&mut rng);
        let bin = ((r - r0) / width) as usize;
        counts[bin.min(BINS - 1)] += 1;
    }

    // 19 dof, 99.9% critical value ~ 43.8
    let chi2 = chi_square(&counts, &probs, N);
    assert!(chi2 < 60.0, "radial chi-square = {chi2}");
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn integrator_is_deterministic() {
    let swarm = default_swarm(300, 10);
    let forces = AccelSet::new().with(ConstantDrift {
        drift: NVec3::new(3.0, -2.0, 1.0),
    });

    let mut a = swarm.state().clone();
    let mut b = swarm.state().clone();
    for _ in 0..3 {
        semi_implicit_euler(&mut a, &forces, 0.7);
        semi_implicit_euler(&mut b, &forces, 0.7);
    }
    assert_eq!(a, b);
}

#[test]
fn constant_drift_matches_closed_form() {
    // semi-implicit Euler under constant a: v_n = n a dt, x_n = x_0 + a dt^2 n (n + 1) / 2
    let mut state = ParticleState::at_rest(vec![NVec3::new(1.0, 2.0, 3.0)]);
    let a = NVec3::new(2.0, 0.0, -4.0);
    let forces = AccelSet::new().with(ConstantDrift { drift: a });
    let dt = 0.5;
    let n = 6;

    for _ in 0..n {
        semi_implicit_euler(&mut state, &forces, dt);
    }

    let nf = n as f64;
    let v = nf * dt * a;
    let x = NVec3::new(1.0, 2.0, 3.0) + a * dt * dt * nf * (nf + 1.0) / 2.0;
    assert!((state.velocities()[0] - v).norm() < 1e-12);
    assert!((state.positions()[0] - x).norm() < 1e-12);
    assert!((state.t - 3.0).abs() < 1e-12);
}

// ==================================================================================
// Shipped scenarios
// ==================================================================================

#[test]
fn shipped_scenarios_parse() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    for name in ["default.yaml", "imaging.yaml"] {
        let text = std::fs::read_to_string(dir.join(name)).unwrap();
        let cfg: ScenarioConfig = serde_yaml::from_str(&text).unwrap();
        assert!(cfg.swarm.n_particles > 0, "{name}");
    }
}
