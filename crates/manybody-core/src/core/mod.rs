//! # Core Module
//!
//! Stateless building blocks of the molecular-dynamics engine.
//!
//! ## Architecture
//!
//! - **System Representation** ([`models`]) - Simulation box, particle ensemble and lattice builder
//! - **Neighbor Search** ([`neighbor`]) - Bounded symmetric neighbor tables, direct and linked-cell builders
//! - **Interatomic Potentials** ([`forcefield`]) - Lennard-Jones and Tersoff force evaluation
//! - **Output** ([`io`]) - Energy file writer
//! - **Units** ([`units`]) - Physical constants of the Å/eV/amu unit system
//!
//! Everything here is free of simulation-loop state. The stateful pieces (the
//! integrator, the step loop and the configuration) live in [`crate::engine`].

pub mod forcefield;
pub mod io;
pub mod models;
pub mod neighbor;
pub mod units;
