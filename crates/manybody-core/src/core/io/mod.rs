//! Output of simulation results.
//!
//! The energy file is a plain-text table with one record per sampled step,
//! written through [`thermo::ThermoWriter`].

pub mod thermo;
