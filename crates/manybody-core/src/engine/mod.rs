//! # Engine Module
//!
//! The stateful layer of the library: everything needed to advance a system
//! through time.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Run parameters and their builder
//! - **State** ([`state`]) - The `SimulationState` aggregate and the per-step sequence
//! - **Integration** ([`integrator`]) - Velocity-Verlet half steps
//! - **Initialization** ([`velocity`]) - Seeded random velocities at a target temperature
//! - **Progress Monitoring** ([`progress`]) - Progress reporting to the caller
//! - **Error Handling** ([`error`]) - The engine error type wrapping every layer below
//!
//! One step refreshes the neighbor list when it has gone stale, then runs
//! the predict half step, the force evaluation and the correct half step, in
//! that order.

pub mod config;
pub mod error;
pub mod integrator;
pub mod progress;
pub mod state;
pub mod velocity;
