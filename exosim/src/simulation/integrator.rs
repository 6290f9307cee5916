//! Fixed-step time integrator for the particle swarm
//!
//! Semi-implicit (symplectic) Euler driven by an `AccelSet`:
//! velocities are kicked first, then positions drift with the new velocities.

use rayon::prelude::*;

use super::forces::AccelSet;
use super::states::{NVec3, ParticleState};

/// Advance the state by one step of size `dt` in place.
///
/// v_n+1 = v_n + dt * a_n
/// x_n+1 = x_n + dt * v_n+1
///
/// Particles do not interact, so the update runs in parallel over particles.
/// `dt` may be zero or negative.
pub fn semi_implicit_euler(state: &mut ParticleState, forces: &AccelSet, dt: f64) {
    let n = state.len();
    if n == 0 { // no particles, only the clock moves
        state.t += dt;
        return;
    }

    // a_n at time t_n
    let mut accels = vec![NVec3::zeros(); n];
    forces.accumulate_accels(state.t, &*state, &mut accels);

    let (positions, velocities) = state.split_mut();
    positions
        .par_iter_mut()
        .zip(velocities.par_iter_mut())
        .zip(accels.par_iter())
        .for_each(|((x, v), a)| {
            // Kick
            *v += dt * *a;
            // Drift
            *x += dt * *v;
        });

    state.t += dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::forces::ConstantDrift;

    fn drift_set(x: f64, y: f64, z: f64) -> AccelSet {
        AccelSet::new().with(ConstantDrift { drift: NVec3::new(x, y, z) })
    }

    #[test]
    fn kick_then_drift() {
        let mut state = ParticleState::new(
            vec![NVec3::new(1.0, 2.0, 3.0)],
            vec![NVec3::new(1.0, 0.0, 0.0)],
        )
        .unwrap();

        semi_implicit_euler(&mut state, &drift_set(2.0, 0.0, 0.0), 0.5);

        // v = 1 + 0.5 * 2 = 2, x = 1 + 0.5 * 2 = 2
        assert_eq!(state.velocities()[0], NVec3::new(2.0, 0.0, 0.0));
        assert_eq!(state.positions()[0], NVec3::new(2.0, 2.0, 3.0));
        assert_eq!(state.t, 0.5);
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut state = ParticleState::new(
            vec![NVec3::new(1.0, 2.0, 3.0), NVec3::new(-4.0, 5.0, 0.5)],
            vec![NVec3::new(7.0, 0.0, -1.0), NVec3::zeros()],
        )
        .unwrap();
        let before = state.clone();

        semi_implicit_euler(&mut state, &drift_set(500.0, 0.0, 0.0), 0.0);

        assert_eq!(state, before);
    }

    #[test]
    fn negative_dt_reverses_a_step() {
        let mut state = ParticleState::at_rest(vec![NVec3::new(1.0, 1.0, 1.0)]);
        let forces = drift_set(0.0, 0.0, 0.0);
        let mut moving = ParticleState::new(state.positions().to_vec(), vec![NVec3::new(3.0, 0.0, 0.0)]).unwrap();

        semi_implicit_euler(&mut moving, &forces, 1.0);
        semi_implicit_euler(&mut moving, &forces, -1.0);
        assert_eq!(moving.positions()[0], NVec3::new(1.0, 1.0, 1.0));

        semi_implicit_euler(&mut state, &forces, -2.0);
        assert_eq!(state.positions()[0], NVec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn empty_state_only_advances_time() {
        let mut state = ParticleState::at_rest(Vec::new());
        semi_implicit_euler(&mut state, &drift_set(1.0, 0.0, 0.0), 2.0);
        assert!(state.is_empty());
        assert_eq!(state.t, 2.0);
    }
}
