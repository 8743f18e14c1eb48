use crate::core::models::ensemble::ParticleEnsemble;
use nalgebra::Vector3;
use rand::Rng;

/// Draws random initial velocities and scales them to `temperature`.
///
/// Each component starts uniform in `[-1, 1)`. The center-of-mass velocity is
/// then removed, so the total momentum is zero, and all velocities are scaled
/// so that `KE = (3/2) N k_B T`. A lone particle has no momentum-free motion
/// and is left at rest.
pub fn initialize_velocities(ensemble: &mut ParticleEnsemble, temperature: f64, rng: &mut impl Rng) {
    if ensemble.is_empty() {
        return;
    }
    if ensemble.len() == 1 {
        ensemble.velocities[0] = Vector3::zeros();
        return;
    }
    for v in &mut ensemble.velocities {
        *v = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
    }
    remove_center_of_mass_velocity(ensemble);
    scale_to_temperature(ensemble, temperature);
}

pub fn remove_center_of_mass_velocity(ensemble: &mut ParticleEnsemble) {
    let center_of_mass_velocity = ensemble.momentum() / ensemble.total_mass();
    for v in &mut ensemble.velocities {
        *v -= center_of_mass_velocity;
    }
}

/// Rescales all velocities by a common factor to reach `temperature`.
pub fn scale_to_temperature(ensemble: &mut ParticleEnsemble, temperature: f64) {
    let current = ensemble.temperature();
    if !(current > 0.0) {
        return;
    }
    let factor = (temperature / current).sqrt();
    for v in &mut ensemble.velocities {
        *v *= factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ensemble(n: usize) -> ParticleEnsemble {
        let masses = (0..n).map(|i| 10.0 + i as f64).collect();
        ParticleEnsemble::new(masses, vec![Vector3::zeros(); n]).unwrap()
    }

    #[test]
    fn initialized_velocities_carry_no_momentum() {
        let mut ensemble = ensemble(50);
        initialize_velocities(&mut ensemble, 300.0, &mut StdRng::seed_from_u64(1));
        assert!(ensemble.momentum().norm() < 1e-10);
    }

    #[test]
    fn initialized_velocities_match_target_temperature() {
        let mut ensemble = ensemble(32);
        initialize_velocities(&mut ensemble, 60.0, &mut StdRng::seed_from_u64(2));
        assert!((ensemble.temperature() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn same_seed_gives_same_velocities() {
        let mut a = ensemble(10);
        let mut b = ensemble(10);
        initialize_velocities(&mut a, 100.0, &mut StdRng::seed_from_u64(42));
        initialize_velocities(&mut b, 100.0, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.velocities, b.velocities);
    }

    #[test]
    fn zero_temperature_leaves_particles_at_rest() {
        let mut ensemble = ensemble(8);
        initialize_velocities(&mut ensemble, 0.0, &mut StdRng::seed_from_u64(3));
        assert_eq!(ensemble.kinetic_energy(), 0.0);
    }

    #[test]
    fn single_particle_stays_at_rest() {
        let mut ensemble = ensemble(1);
        initialize_velocities(&mut ensemble, 300.0, &mut StdRng::seed_from_u64(4));
        assert_eq!(ensemble.velocities[0], Vector3::zeros());
    }
}
