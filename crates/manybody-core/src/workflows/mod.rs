//! # Workflows Module
//!
//! High-level entry points that run a complete simulation from a
//! [`SimulationConfig`](crate::engine::config::SimulationConfig).
//!
//! ## Architecture
//!
//! - **Simulation Workflow** ([`simulate`]) - Builds the crystal, draws initial
//!   velocities, runs the velocity-Verlet loop and records sampled energies.

pub mod simulate;
