//! # Core Models Module
//!
//! Data structures describing the simulated system.
//!
//! - [`simulation_box`] - The periodic cell, minimum-image displacements and wrapping
//! - [`ensemble`] - Per-particle masses, positions, velocities, forces and energies
//! - [`builder`] - Crystal lattice construction (FCC and diamond)
//!
//! ```ignore
//! use manybody::core::models::builder::{LatticeBuilder, LatticeKind};
//!
//! let crystal = LatticeBuilder::new(LatticeKind::Fcc, 5.385, 40.0).cells(4).build()?;
//! assert_eq!(crystal.ensemble.len(), 256);
//! ```

pub mod builder;
pub mod ensemble;
pub mod simulation_box;
