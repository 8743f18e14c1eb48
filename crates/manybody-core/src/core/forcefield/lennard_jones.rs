use super::params::LennardJonesParams;
use super::potentials::lennard_jones_12_6;
use super::term::ForceReport;
use crate::core::models::ensemble::ParticleEnsemble;
use crate::core::models::simulation_box::SimulationBox;
use crate::core::neighbor::NeighborTable;

#[derive(Debug, Clone)]
pub struct LennardJones {
    params: LennardJonesParams,
}

impl LennardJones {
    pub fn new(params: LennardJonesParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LennardJonesParams {
        &self.params
    }

    /// Adds pair forces and energies to `ensemble`.
    ///
    /// Each unordered pair in `table` is visited once. Its energy is split
    /// evenly between the two particles.
    pub fn accumulate(
        &self,
        ensemble: &mut ParticleEnsemble,
        sim_box: &SimulationBox,
        table: &NeighborTable,
    ) -> ForceReport {
        let LennardJonesParams {
            epsilon,
            sigma,
            cutoff,
        } = self.params;
        let cutoff_sq = cutoff * cutoff;
        let mut report = ForceReport::default();

        for (i, j) in table.pairs() {
            let r_ij = sim_box.minimum_image(&(ensemble.positions[j] - ensemble.positions[i]));
            let r_sq = r_ij.norm_squared();
            if r_sq > cutoff_sq {
                continue;
            }
            let (energy, factor) = lennard_jones_12_6(r_sq, epsilon, sigma);
            let force = r_ij * factor;

            ensemble.forces[i] += force;
            ensemble.forces[j] -= force;
            ensemble.potential_energies[i] += 0.5 * energy;
            ensemble.potential_energies[j] += 0.5 * energy;

            let mean_velocity = (ensemble.velocities[i] + ensemble.velocities[j]) * 0.5;
            report.potential_energy += energy;
            report.virial -= force.component_mul(&r_ij);
            report.heat_current -= r_ij * force.dot(&mean_velocity);
        }
        report
    }
}
