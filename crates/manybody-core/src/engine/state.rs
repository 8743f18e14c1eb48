use super::integrator::{HalfStep, VelocityVerlet};
use crate::core::forcefield::ForceField;
use crate::core::forcefield::term::ForceReport;
use crate::core::models::ensemble::ParticleEnsemble;
use crate::core::models::simulation_box::SimulationBox;
use crate::core::neighbor::{NeighborError, NeighborList};

/// Everything that evolves during a run, owned in one place.
///
/// Components only ever see the pieces they need for one call, so the box,
/// particles, neighbor list and force field can be borrowed independently.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub sim_box: SimulationBox,
    pub ensemble: ParticleEnsemble,
    neighbors: NeighborList,
    force_field: ForceField,
    integrator: VelocityVerlet,
    report: ForceReport,
}

impl SimulationState {
    pub fn new(
        sim_box: SimulationBox,
        ensemble: ParticleEnsemble,
        neighbors: NeighborList,
        force_field: ForceField,
        integrator: VelocityVerlet,
    ) -> Self {
        Self {
            sim_box,
            ensemble,
            neighbors,
            force_field,
            integrator,
            report: ForceReport::default(),
        }
    }

    pub fn neighbors(&self) -> &NeighborList {
        &self.neighbors
    }

    /// Observables of the most recent force evaluation.
    pub fn report(&self) -> &ForceReport {
        &self.report
    }

    /// Rebuilds the neighbor list if any particle has moved too far.
    pub fn refresh_neighbors(&mut self) -> Result<bool, NeighborError> {
        self.neighbors
            .refresh(&self.sim_box, &mut self.ensemble.positions)
    }

    pub fn compute_forces(&mut self) -> ForceReport {
        self.report = self.force_field.compute(
            &mut self.ensemble,
            &self.sim_box,
            self.neighbors.table(),
        );
        self.report
    }

    /// Builds the neighbor list and evaluates forces for the initial
    /// configuration, so the first kick of [`SimulationState::step`] uses
    /// real forces.
    pub fn prime(&mut self) -> Result<ForceReport, NeighborError> {
        self.refresh_neighbors()?;
        Ok(self.compute_forces())
    }

    /// Advances the system by one velocity-Verlet step.
    pub fn step(&mut self) -> Result<(), NeighborError> {
        self.refresh_neighbors()?;
        self.integrator.apply(HalfStep::Predict, &mut self.ensemble);
        self.compute_forces();
        self.integrator.apply(HalfStep::Correct, &mut self.ensemble);
        Ok(())
    }
}
