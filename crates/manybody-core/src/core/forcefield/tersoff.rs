use super::params::TersoffParams;
use super::potentials::{
    tersoff_angular, tersoff_attractive, tersoff_bond_order, tersoff_cutoff, tersoff_repulsive,
};
use super::term::ForceReport;
use crate::core::models::ensemble::ParticleEnsemble;
use crate::core::models::simulation_box::SimulationBox;
use crate::core::neighbor::NeighborTable;
use nalgebra::Vector3;

/// Radial data of one directed bond `i -> j`.
#[derive(Debug, Clone, Copy, Default)]
struct Bond {
    r: Vector3<f64>,
    d: f64,
    fc: f64,
    fcp: f64,
    fa: f64,
    fap: f64,
    fr: f64,
    frp: f64,
}

/// Per-slot scratch arrays, aligned with the neighbor table's global slot
/// numbering and reused across evaluations.
#[derive(Debug, Clone, Default)]
struct BondOrderCache {
    offsets: Vec<usize>,
    bonds: Vec<Bond>,
    b: Vec<f64>,
    bp: Vec<f64>,
}

impl BondOrderCache {
    #[inline]
    fn slot(&self, particle: usize, local: usize) -> usize {
        self.offsets[particle] + local
    }
}

#[derive(Debug, Clone)]
pub struct Tersoff {
    params: TersoffParams,
    cache: BondOrderCache,
}

impl Tersoff {
    pub fn new(params: TersoffParams) -> Self {
        Self {
            params,
            cache: BondOrderCache::default(),
        }
    }

    pub fn params(&self) -> &TersoffParams {
        &self.params
    }

    /// Adds bond-order forces and energies to `ensemble`.
    pub fn accumulate(
        &mut self,
        ensemble: &mut ParticleEnsemble,
        sim_box: &SimulationBox,
        table: &NeighborTable,
    ) -> ForceReport {
        self.prepare_bonds(ensemble, sim_box, table);
        self.compute_bond_orders(table);
        self.accumulate_forces(ensemble, table)
    }

    fn prepare_bonds(
        &mut self,
        ensemble: &ParticleEnsemble,
        sim_box: &SimulationBox,
        table: &NeighborTable,
    ) {
        let p = &self.params;
        let cache = &mut self.cache;
        cache.offsets = table.slot_offsets();
        cache.bonds.clear();
        cache.bonds.reserve(table.total_slots());

        for i in 0..table.num_particles() {
            for slot in table.neighbors(i) {
                let r = sim_box.minimum_image(&(ensemble.positions[slot.index] - ensemble.positions[i]));
                let d = r.norm();
                let (fc, fcp) = tersoff_cutoff(d, p.r1, p.r2);
                let (fa, fap) = tersoff_attractive(d, p.b, p.mu);
                let (fr, frp) = tersoff_repulsive(d, p.a, p.lambda);
                cache.bonds.push(Bond {
                    r,
                    d,
                    fc,
                    fcp,
                    fa,
                    fap,
                    fr,
                    frp,
                });
            }
        }
    }

    /// Fills `b` and `bp` for every directed bond.
    fn compute_bond_orders(&mut self, table: &NeighborTable) {
        let p = &self.params;
        let cache = &mut self.cache;
        let total = cache.bonds.len();
        cache.b.clear();
        cache.b.resize(total, 1.0);
        cache.bp.clear();
        cache.bp.resize(total, 0.0);

        for i in 0..table.num_particles() {
            let count = table.count(i);
            for s12 in 0..count {
                let bond12 = cache.bonds[cache.slot(i, s12)];
                if bond12.d >= p.r2 {
                    continue;
                }
                let mut zeta = 0.0;
                for s13 in 0..count {
                    if s13 == s12 {
                        continue;
                    }
                    let bond13 = cache.bonds[cache.slot(i, s13)];
                    if bond13.d >= p.r2 {
                        continue;
                    }
                    let cos = bond12.r.dot(&bond13.r) / (bond12.d * bond13.d);
                    let (g, _) = tersoff_angular(cos, p.c, p.d, p.h);
                    zeta += bond13.fc * g;
                }
                let (b, bp) = tersoff_bond_order(zeta, p.beta, p.n);
                let index = cache.slot(i, s12);
                cache.b[index] = b;
                cache.bp[index] = bp;
            }
        }
    }

    fn accumulate_forces(
        &self,
        ensemble: &mut ParticleEnsemble,
        table: &NeighborTable,
    ) -> ForceReport {
        let p = &self.params;
        let cache = &self.cache;
        let mut report = ForceReport::default();

        for n1 in 0..table.num_particles() {
            for (s12, slot) in table.neighbors(n1).iter().enumerate() {
                let n2 = slot.index;
                if n2 < n1 {
                    continue;
                }
                let i12 = cache.slot(n1, s12);
                let i21 = cache.slot(n2, slot.reverse);
                let bond = cache.bonds[i12];
                if bond.d >= p.r2 {
                    continue;
                }
                let (r12, d12) = (bond.r, bond.d);
                let (b12, bp12) = (cache.b[i12], cache.bp[i12]);
                let (b21, bp21) = (cache.b[i21], cache.bp[i21]);

                let factor1_12 = bond.fr - b12 * bond.fa;
                let factor2_12 = bond.frp - b12 * bond.fap;
                let factor3_12 = (bond.fcp * factor1_12 + bond.fc * factor2_12) / d12;
                let factor1_21 = bond.fr - b21 * bond.fa;
                let factor2_21 = bond.frp - b21 * bond.fap;
                let factor3_21 = (bond.fcp * factor1_21 + bond.fc * factor2_21) / d12;

                let mut f12 = r12 * (factor3_12 * 0.5);
                let mut f21 = r12 * (-factor3_21 * 0.5);

                for s13 in 0..table.count(n1) {
                    if s13 == s12 {
                        continue;
                    }
                    let i13 = cache.slot(n1, s13);
                    let b13 = cache.bonds[i13];
                    if b13.d >= p.r2 {
                        continue;
                    }
                    let d1213 = d12 * b13.d;
                    let cos = r12.dot(&b13.r) / d1213;
                    let cos_grad = b13.r / d1213 - r12 * (cos / (d12 * d12));
                    let (g, gp) = tersoff_angular(cos, p.c, p.d, p.h);
                    let bp13 = cache.bp[i13];
                    let factor_a = (-bp12 * bond.fc * bond.fa * b13.fc
                        - bp13 * b13.fc * b13.fa * bond.fc)
                        * gp;
                    let factor_b = -bp13 * b13.fc * b13.fa * bond.fcp * g / d12;
                    f12 += (r12 * factor_b + cos_grad * factor_a) * 0.5;
                }

                for s23 in 0..table.count(n2) {
                    if s23 == slot.reverse {
                        continue;
                    }
                    let i23 = cache.slot(n2, s23);
                    let b23 = cache.bonds[i23];
                    if b23.d >= p.r2 {
                        continue;
                    }
                    let d1223 = d12 * b23.d;
                    let cos = -r12.dot(&b23.r) / d1223;
                    let cos_grad = b23.r / d1223 + r12 * (cos / (d12 * d12));
                    let (g, gp) = tersoff_angular(cos, p.c, p.d, p.h);
                    let bp23 = cache.bp[i23];
                    let factor_a = (-bp21 * bond.fc * bond.fa * b23.fc
                        - bp23 * b23.fc * b23.fa * bond.fc)
                        * gp;
                    let factor_b = -bp23 * b23.fc * b23.fa * bond.fcp * g / d12;
                    f21 += (r12 * -factor_b + cos_grad * factor_a) * 0.5;
                }

                let force = f12 - f21;
                ensemble.forces[n1] += force;
                ensemble.forces[n2] -= force;

                let p12 = factor1_12 * bond.fc;
                let p21 = factor1_21 * bond.fc;
                ensemble.potential_energies[n1] += 0.5 * p12;
                ensemble.potential_energies[n2] += 0.5 * p21;

                let v1 = ensemble.velocities[n1];
                let v2 = ensemble.velocities[n2];
                report.potential_energy += 0.5 * (p12 + p21);
                report.virial -= force.component_mul(&r12);
                report.heat_current -= r12 * (f12.dot(&v2) - f21.dot(&v1));
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::{LatticeBuilder, LatticeKind};
    use crate::core::neighbor::{NeighborAlgorithm, NeighborList};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const DIAMOND_LATTICE_CONSTANT: f64 = 3.567;
    const CARBON_MASS: f64 = 12.011;

    fn neighbor_table(ensemble: &mut ParticleEnsemble, sim_box: &SimulationBox) -> NeighborTable {
        let mut list = NeighborList::new(NeighborAlgorithm::LinkedCell, 3.1, ensemble.len(), 100);
        list.rebuild(sim_box, &mut ensemble.positions).unwrap();
        list.table().clone()
    }

    fn evaluate(
        ensemble: &mut ParticleEnsemble,
        sim_box: &SimulationBox,
        table: &NeighborTable,
    ) -> ForceReport {
        ensemble.clear_forces();
        Tersoff::new(TersoffParams::default()).accumulate(ensemble, sim_box, table)
    }

    fn assert_forces_match_finite_differences(
        ensemble: &ParticleEnsemble,
        sim_box: &SimulationBox,
        table: &NeighborTable,
        particles: impl Iterator<Item = usize>,
    ) {
        let h = 1e-5;
        let mut analytic = ensemble.clone();
        evaluate(&mut analytic, sim_box, table);
        for particle in particles {
            for axis in 0..3 {
                let mut plus = ensemble.clone();
                plus.positions[particle][axis] += h;
                let e_plus = evaluate(&mut plus, sim_box, table).potential_energy;
                let mut minus = ensemble.clone();
                minus.positions[particle][axis] -= h;
                let e_minus = evaluate(&mut minus, sim_box, table).potential_energy;
                let numeric = -(e_plus - e_minus) / (2.0 * h);
                let force = analytic.forces[particle][axis];
                assert!(
                    (numeric - force).abs() < 1e-5 * (1.0 + force.abs()),
                    "particle {particle} axis {axis}: analytic {force}, numeric {numeric}"
                );
            }
        }
    }

    fn perturbed_diamond(seed: u64) -> (SimulationBox, ParticleEnsemble) {
        let crystal = LatticeBuilder::new(LatticeKind::Diamond, DIAMOND_LATTICE_CONSTANT, CARBON_MASS)
            .cells(2)
            .build()
            .unwrap();
        let mut ensemble = crystal.ensemble;
        let mut rng = StdRng::seed_from_u64(seed);
        for r in &mut ensemble.positions {
            *r += Vector3::new(
                rng.gen_range(-0.05..0.05),
                rng.gen_range(-0.05..0.05),
                rng.gen_range(-0.05..0.05),
            );
        }
        (crystal.sim_box, ensemble)
    }

    fn two_atoms(x0: f64, x1: f64) -> ParticleEnsemble {
        ParticleEnsemble::new(
            vec![CARBON_MASS; 2],
            vec![Vector3::new(x0, 4.0, 4.0), Vector3::new(x1, 4.0, 4.0)],
        )
        .unwrap()
    }

    #[test]
    fn ideal_diamond_is_bound_and_force_free() {
        let crystal = LatticeBuilder::new(LatticeKind::Diamond, DIAMOND_LATTICE_CONSTANT, CARBON_MASS)
            .cells(2)
            .build()
            .unwrap();
        let sim_box = crystal.sim_box;
        let mut ensemble = crystal.ensemble;
        let table = neighbor_table(&mut ensemble, &sim_box);
        let report = evaluate(&mut ensemble, &sim_box, &table);

        let per_atom = report.potential_energy / ensemble.len() as f64;
        assert!(per_atom < -6.0 && per_atom > -9.0, "energy per atom {per_atom}");
        assert!((ensemble.potential_energy() - report.potential_energy).abs() < 1e-9);
        for force in &ensemble.forces {
            assert!(force.norm() < 1e-9);
        }
    }

    #[test]
    fn net_force_vanishes_for_perturbed_crystal() {
        let (sim_box, mut ensemble) = perturbed_diamond(21);
        let table = neighbor_table(&mut ensemble, &sim_box);
        evaluate(&mut ensemble, &sim_box, &table);
        assert!(ensemble.net_force().norm() < 1e-9);
        assert!(ensemble.forces.iter().any(|f| f.norm() > 1e-3));
    }

    #[test]
    fn forces_match_finite_differences_in_perturbed_crystal() {
        let (sim_box, mut ensemble) = perturbed_diamond(5);
        let table = neighbor_table(&mut ensemble, &sim_box);
        assert_forces_match_finite_differences(&ensemble, &sim_box, &table, (0..64).step_by(7));
    }

    /// Five atoms whose bonds straddle both cutoff radii, far from any boundary.
    fn isolated_cluster() -> (SimulationBox, ParticleEnsemble) {
        let sim_box = SimulationBox::cubic(20.0).unwrap();
        let offset = Vector3::new(8.0, 8.0, 8.0);
        let positions = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.95, 0.0, 0.0),
            Vector3::new(0.3, 1.85, 0.1),
            Vector3::new(1.0, 0.6, 1.7),
            Vector3::new(1.0, -1.0, -0.9),
        ]
        .map(|r| r + offset);
        let ensemble = ParticleEnsemble::new(vec![CARBON_MASS; 5], positions.to_vec()).unwrap();
        (sim_box, ensemble)
    }

    #[test]
    fn forces_match_finite_differences_in_cutoff_transition_region() {
        let (sim_box, mut ensemble) = isolated_cluster();
        let table = neighbor_table(&mut ensemble, &sim_box);

        let mut evaluated = ensemble.clone();
        let report = evaluate(&mut evaluated, &sim_box, &table);
        assert!(report.potential_energy < 0.0);
        assert!(evaluated.net_force().norm() < 1e-10);

        assert_forces_match_finite_differences(&ensemble, &sim_box, &table, 0..5);
    }

    #[test]
    fn virial_equals_sum_of_position_times_force() {
        let (sim_box, mut ensemble) = isolated_cluster();
        let table = neighbor_table(&mut ensemble, &sim_box);
        let report = evaluate(&mut ensemble, &sim_box, &table);

        let expected: Vector3<f64> = ensemble
            .positions
            .iter()
            .zip(&ensemble.forces)
            .map(|(x, f)| x.component_mul(f))
            .sum();
        assert!(report.virial.norm() > 1e-3);
        assert!(
            (report.virial - expected).norm() < 1e-9,
            "{:?} vs {:?}",
            report.virial,
            expected
        );
    }

    #[test]
    fn pair_heat_current_follows_mean_velocity_along_the_bond() {
        let sim_box = SimulationBox::cubic(16.0).unwrap();
        let mut ensemble = two_atoms(0.5, 2.25);
        ensemble.velocities[0] = Vector3::new(0.3, -0.1, 0.2);
        ensemble.velocities[1] = Vector3::new(-0.7, 0.5, 0.1);
        let table = neighbor_table(&mut ensemble, &sim_box);
        let report = evaluate(&mut ensemble, &sim_box, &table);

        let p = TersoffParams::default();
        let d = 1.75f64;
        let dudr = -p.lambda * p.a * (-p.lambda * d).exp() + p.mu * p.b * (-p.mu * d).exp();
        let mean_vx = 0.5 * (0.3 - 0.7);
        let expected = Vector3::new(-d * dudr * mean_vx, 0.0, 0.0);
        assert!(
            (report.heat_current - expected).norm() < 1e-10,
            "{:?} vs {:?}",
            report.heat_current,
            expected
        );
    }

    #[test]
    fn pair_exactly_at_outer_cutoff_contributes_nothing() {
        let sim_box = SimulationBox::cubic(16.0).unwrap();
        let mut ensemble = two_atoms(0.5, 2.6);
        let table = neighbor_table(&mut ensemble, &sim_box);
        assert!(table.contains(0, 1));

        let report = evaluate(&mut ensemble, &sim_box, &table);
        assert_eq!(report.potential_energy, 0.0);
        assert_eq!(ensemble.net_force(), Vector3::zeros());
        assert_eq!(ensemble.forces[0], Vector3::zeros());
    }

    #[test]
    fn pair_inside_inner_cutoff_uses_full_weight() {
        let sim_box = SimulationBox::cubic(16.0).unwrap();
        let mut ensemble = two_atoms(0.5, 2.25);
        let table = neighbor_table(&mut ensemble, &sim_box);
        let report = evaluate(&mut ensemble, &sim_box, &table);

        let p = TersoffParams::default();
        let d = 1.75f64;
        let expected = p.a * (-p.lambda * d).exp() - p.b * (-p.mu * d).exp();
        assert!((report.potential_energy - expected).abs() < 1e-12);

        let dudr = -p.lambda * p.a * (-p.lambda * d).exp() + p.mu * p.b * (-p.mu * d).exp();
        assert!((ensemble.forces[0].x - dudr).abs() < 1e-10);
        assert!((ensemble.forces[1].x + dudr).abs() < 1e-10);
    }

    #[test]
    fn cache_is_reused_across_evaluations_with_different_tables() {
        let (sim_box, mut ensemble) = perturbed_diamond(8);
        let table = neighbor_table(&mut ensemble, &sim_box);
        let mut engine = Tersoff::new(TersoffParams::default());

        ensemble.clear_forces();
        let first = engine.accumulate(&mut ensemble, &sim_box, &table);

        let mut pair = two_atoms(0.5, 2.25);
        let pair_table = neighbor_table(&mut pair, &sim_box);
        pair.clear_forces();
        engine.accumulate(&mut pair, &sim_box, &pair_table);

        ensemble.clear_forces();
        let again = engine.accumulate(&mut ensemble, &sim_box, &table);
        assert_eq!(first.potential_energy, again.potential_energy);
    }
}
