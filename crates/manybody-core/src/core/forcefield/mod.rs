//! # Force Field Module
//!
//! Interatomic potentials and the machinery to evaluate them over a neighbor
//! table.
//!
//! ## Overview
//!
//! Two short-range potentials are supported:
//!
//! - **Lennard-Jones 12-6** ([`lennard_jones`]) for noble-gas style pair
//!   interactions.
//! - **Tersoff** ([`tersoff`]) for covalent bond-order interactions, with the
//!   three-body angular terms and their derivatives.
//!
//! Both engines write per-particle forces and potential energies into a
//! [`ParticleEnsemble`] and return the bulk observables of the evaluation as
//! a [`ForceReport`].
//!
//! ## Key Components
//!
//! - [`params`] - Parameter sets, built-in presets and TOML loading
//! - [`potentials`] - Pure functional forms and their derivatives
//! - [`term`] - Accumulated potential energy, virial and heat current
//!
//! ## Usage
//!
//! ```ignore
//! use manybody::core::forcefield::{ForceField, params::PotentialParams};
//!
//! let mut force_field = ForceField::new(&PotentialParams::preset("tersoff-carbon")?);
//! let report = force_field.compute(&mut ensemble, &sim_box, neighbors.table());
//! ```

pub mod lennard_jones;
pub mod params;
pub mod potentials;
pub mod tersoff;
pub mod term;

use crate::core::models::ensemble::ParticleEnsemble;
use crate::core::models::simulation_box::SimulationBox;
use crate::core::neighbor::NeighborTable;
use lennard_jones::LennardJones;
use params::PotentialParams;
use term::ForceReport;
use tersoff::Tersoff;

/// The potential driving a simulation.
#[derive(Debug, Clone)]
pub enum ForceField {
    LennardJones(LennardJones),
    Tersoff(Tersoff),
}

impl ForceField {
    pub fn new(params: &PotentialParams) -> Self {
        match params {
            PotentialParams::LennardJones(p) => ForceField::LennardJones(LennardJones::new(*p)),
            PotentialParams::Tersoff(p) => ForceField::Tersoff(Tersoff::new(*p)),
        }
    }

    /// Interaction range of the potential.
    pub fn cutoff(&self) -> f64 {
        match self {
            ForceField::LennardJones(lj) => lj.params().cutoff,
            ForceField::Tersoff(t) => t.params().r2,
        }
    }

    /// Replaces the forces and per-particle energies in `ensemble` with those
    /// of the current configuration.
    pub fn compute(
        &mut self,
        ensemble: &mut ParticleEnsemble,
        sim_box: &SimulationBox,
        table: &NeighborTable,
    ) -> ForceReport {
        ensemble.clear_forces();
        match self {
            ForceField::LennardJones(lj) => lj.accumulate(ensemble, sim_box, table),
            ForceField::Tersoff(t) => t.accumulate(ensemble, sim_box, table),
        }
    }
}
