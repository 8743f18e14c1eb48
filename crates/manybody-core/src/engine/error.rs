use thiserror::Error;

use super::config::ConfigError;
use crate::core::forcefield::params::ParamLoadError;
use crate::core::io::thermo::ThermoOutputError;
use crate::core::models::builder::LatticeError;
use crate::core::neighbor::NeighborError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to build the initial lattice: {source}")]
    Lattice {
        #[from]
        source: LatticeError,
    },

    #[error("Neighbor list construction failed: {source}")]
    Neighbor {
        #[from]
        source: NeighborError,
    },

    #[error("Failed to load potential parameters: {source}")]
    Params {
        #[from]
        source: ParamLoadError,
    },

    #[error("Failed to write energies: {source}")]
    Output {
        #[from]
        source: ThermoOutputError,
    },

    #[error("Simulation became unstable at step {step}: energy is no longer finite")]
    Unstable { step: usize },
}
