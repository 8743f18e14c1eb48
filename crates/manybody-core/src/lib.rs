//! # ManyBody Core Library
//!
//! A classical molecular-dynamics engine for short-range interatomic
//! potentials under periodic boundary conditions, covering pairwise
//! Lennard-Jones and the three-body Tersoff bond-order potential.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture with a clear separation of concerns.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`SimulationBox`,
//!   `ParticleEnsemble`), neighbor search, the pure functional forms of the
//!   potentials and their force engines, and output utilities.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer: the velocity-Verlet
//!   integrator, velocity initialization, the `SimulationState` aggregate that
//!   owns the box, particles, neighbor list and force field, plus configuration
//!   and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into
//!   a complete run: build the crystal, thermalize it, integrate, sample the
//!   energies and summarize.

pub mod core;
pub mod engine;
pub mod workflows;
