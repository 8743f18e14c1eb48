//! # Neighbor Module
//!
//! Builds and maintains the per-particle neighbor lists consumed by the force
//! engines.
//!
//! A [`NeighborList`] owns a [`NeighborTable`] together with the positions it
//! was last built from. Between rebuilds the table is reused as long as no
//! particle has moved further than half the skin; the check is
//! [`NeighborList::needs_rebuild`] and the rebuild itself is
//! [`NeighborList::rebuild`]. Two search strategies produce the same neighbor
//! relation: a direct all-pairs search and a linked-cell search.

mod cell_list;
mod direct;
pub mod table;

pub use table::{NeighborSlot, NeighborTable};

use crate::core::models::simulation_box::SimulationBox;
use nalgebra::Vector3;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Displacement since the last rebuild that makes the list stale.
pub const REBUILD_DISPLACEMENT: f64 = 0.5;
pub const REBUILD_DISPLACEMENT_SQUARED: f64 = REBUILD_DISPLACEMENT * REBUILD_DISPLACEMENT;

/// Smallest margin between the neighbor cutoff and the potential cutoff.
///
/// Two particles that each move just under [`REBUILD_DISPLACEMENT`] toward
/// each other close their distance by up to this much before a rebuild.
pub const MIN_SKIN: f64 = 2.0 * REBUILD_DISPLACEMENT;

/// Default number of slots per particle.
pub const DEFAULT_CAPACITY: usize = 1000;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NeighborError {
    #[error(
        "Neighbor list of particle {particle} exceeds its capacity of {capacity}; \
         increase the capacity or reduce the cutoff"
    )]
    CapacityExceeded { particle: usize, capacity: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NeighborAlgorithm {
    /// All-pairs search, O(N²).
    Direct,
    /// Cell-list search, O(N).
    #[default]
    LinkedCell,
}

impl std::fmt::Display for NeighborAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NeighborAlgorithm::Direct => write!(f, "direct"),
            NeighborAlgorithm::LinkedCell => write!(f, "linked-cell"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NeighborList {
    algorithm: NeighborAlgorithm,
    cutoff: f64,
    table: NeighborTable,
    reference: Option<Vec<Vector3<f64>>>,
    num_updates: usize,
}

impl NeighborList {
    pub fn new(
        algorithm: NeighborAlgorithm,
        cutoff: f64,
        num_particles: usize,
        capacity: usize,
    ) -> Self {
        Self {
            algorithm,
            cutoff,
            table: NeighborTable::new(num_particles, capacity),
            reference: None,
            num_updates: 0,
        }
    }

    pub fn algorithm(&self) -> NeighborAlgorithm {
        self.algorithm
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn table(&self) -> &NeighborTable {
        &self.table
    }

    /// Number of rebuilds performed so far.
    pub fn num_updates(&self) -> usize {
        self.num_updates
    }

    /// Returns `true` if the list has never been built or if any particle has
    /// moved by more than the skin budget since the last rebuild.
    pub fn needs_rebuild(&self, positions: &[Vector3<f64>]) -> bool {
        match &self.reference {
            None => true,
            Some(reference) => positions
                .iter()
                .zip(reference)
                .any(|(r, r0)| (r - r0).norm_squared() > REBUILD_DISPLACEMENT_SQUARED),
        }
    }

    /// Wraps `positions` into the primary cell and rebuilds the table from them.
    ///
    /// # Errors
    ///
    /// Returns [`NeighborError::CapacityExceeded`] if any particle has more
    /// neighbors than the table can hold.
    pub fn rebuild(
        &mut self,
        sim_box: &SimulationBox,
        positions: &mut [Vector3<f64>],
    ) -> Result<(), NeighborError> {
        self.num_updates += 1;
        for r in positions.iter_mut() {
            *r = sim_box.wrap(r);
        }

        match self.algorithm {
            NeighborAlgorithm::Direct => {
                direct::build(sim_box, positions, self.cutoff, &mut self.table)?
            }
            NeighborAlgorithm::LinkedCell => {
                cell_list::build(sim_box, positions, self.cutoff, &mut self.table)?
            }
        }

        self.reference = Some(positions.to_vec());
        debug!(
            update = self.num_updates,
            algorithm = %self.algorithm,
            slots = self.table.total_slots(),
            "Rebuilt neighbor list"
        );
        Ok(())
    }

    /// Rebuilds the table if it is stale.
    ///
    /// # Return
    ///
    /// `true` if a rebuild took place.
    pub fn refresh(
        &mut self,
        sim_box: &SimulationBox,
        positions: &mut [Vector3<f64>],
    ) -> Result<bool, NeighborError> {
        if !self.needs_rebuild(positions) {
            return Ok(false);
        }
        self.rebuild(sim_box, positions)?;
        Ok(true)
    }
}
