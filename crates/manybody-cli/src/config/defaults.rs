use manybody::core::models::builder::LatticeKind;
use manybody::core::neighbor::{DEFAULT_CAPACITY, NeighborAlgorithm};
use manybody::engine::config::{
    DEFAULT_LATTICE_CONSTANT, DEFAULT_MASS, DEFAULT_SAMPLE_INTERVAL, DEFAULT_SKIN,
};
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub lattice_kind: LatticeKind,
    pub lattice_constant: f64,
    pub mass: f64,
    pub potential: String,
    pub neighbor_algorithm: NeighborAlgorithm,
    pub skin: f64,
    pub neighbor_capacity: usize,
    pub output_path: PathBuf,
    pub sample_interval: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            lattice_kind: LatticeKind::Fcc,
            lattice_constant: DEFAULT_LATTICE_CONSTANT,
            mass: DEFAULT_MASS,
            potential: "tersoff-carbon".to_string(),
            neighbor_algorithm: NeighborAlgorithm::LinkedCell,
            skin: DEFAULT_SKIN,
            neighbor_capacity: DEFAULT_CAPACITY,
            output_path: PathBuf::from("energy.txt"),
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
        }
    }
}
