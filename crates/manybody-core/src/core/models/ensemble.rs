use crate::core::units::BOLTZMANN;
use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnsembleError {
    #[error("Particle arrays have mismatched lengths: {masses} masses, {positions} positions")]
    LengthMismatch { masses: usize, positions: usize },
    #[error("Particle {0} has a non-positive mass")]
    NonPositiveMass(usize),
}

/// The per-particle state of a simulation.
///
/// All arrays are indexed by particle and always have the same length. The
/// number of particles is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleEnsemble {
    pub masses: Vec<f64>,
    pub positions: Vec<Vector3<f64>>,
    pub velocities: Vec<Vector3<f64>>,
    pub forces: Vec<Vector3<f64>>,
    /// Potential energy attributed to each particle by the last force evaluation.
    pub potential_energies: Vec<f64>,
}

impl ParticleEnsemble {
    /// Creates an ensemble at rest with zero forces.
    ///
    /// # Errors
    ///
    /// Returns an error if `masses` and `positions` differ in length, or if
    /// any mass is not strictly positive.
    pub fn new(masses: Vec<f64>, positions: Vec<Vector3<f64>>) -> Result<Self, EnsembleError> {
        if masses.len() != positions.len() {
            return Err(EnsembleError::LengthMismatch {
                masses: masses.len(),
                positions: positions.len(),
            });
        }
        if let Some(index) = masses.iter().position(|&m| !(m > 0.0)) {
            return Err(EnsembleError::NonPositiveMass(index));
        }
        let n = masses.len();
        Ok(Self {
            masses,
            positions,
            velocities: vec![Vector3::zeros(); n],
            forces: vec![Vector3::zeros(); n],
            potential_energies: vec![0.0; n],
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.masses.iter().sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.velocities
            .iter()
            .zip(&self.masses)
            .map(|(v, &m)| m * v.norm_squared())
            .sum::<f64>()
            * 0.5
    }

    pub fn potential_energy(&self) -> f64 {
        self.potential_energies.iter().sum()
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    /// Instantaneous temperature from `KE = (3/2) N k_B T`.
    pub fn temperature(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.kinetic_energy() * 2.0 / (3.0 * BOLTZMANN * self.len() as f64)
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocities
            .iter()
            .zip(&self.masses)
            .map(|(v, &m)| v * m)
            .sum()
    }

    pub fn net_force(&self) -> Vector3<f64> {
        self.forces.iter().sum()
    }

    pub(crate) fn clear_forces(&mut self) {
        self.forces.fill(Vector3::zeros());
        self.potential_energies.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_particles() -> ParticleEnsemble {
        ParticleEnsemble::new(
            vec![2.0, 4.0],
            vec![Vector3::zeros(), Vector3::new(1.0, 0.0, 0.0)],
        )
        .unwrap()
    }

    #[test]
    fn new_initializes_state_at_rest() {
        let ensemble = two_particles();
        assert_eq!(ensemble.len(), 2);
        assert_eq!(ensemble.kinetic_energy(), 0.0);
        assert_eq!(ensemble.net_force(), Vector3::zeros());
        assert_eq!(ensemble.potential_energies, vec![0.0, 0.0]);
    }

    #[test]
    fn new_rejects_mismatched_lengths() {
        let result = ParticleEnsemble::new(vec![1.0], vec![]);
        assert_eq!(
            result,
            Err(EnsembleError::LengthMismatch {
                masses: 1,
                positions: 0
            })
        );
    }

    #[test]
    fn new_rejects_non_positive_mass() {
        let result = ParticleEnsemble::new(vec![1.0, 0.0], vec![Vector3::zeros(); 2]);
        assert_eq!(result, Err(EnsembleError::NonPositiveMass(1)));
    }

    #[test]
    fn kinetic_energy_and_momentum_use_masses() {
        let mut ensemble = two_particles();
        ensemble.velocities[0] = Vector3::new(1.0, 0.0, 0.0);
        ensemble.velocities[1] = Vector3::new(-0.5, 0.0, 0.0);
        assert!((ensemble.kinetic_energy() - 1.5).abs() < 1e-12);
        assert!(ensemble.momentum().norm() < 1e-12);
    }

    #[test]
    fn temperature_follows_equipartition() {
        let mut ensemble = two_particles();
        ensemble.velocities[0] = Vector3::new(1.0, 1.0, 1.0);
        let expected = ensemble.kinetic_energy() * 2.0 / (3.0 * BOLTZMANN * 2.0);
        assert!((ensemble.temperature() - expected).abs() < 1e-9);
    }
}
