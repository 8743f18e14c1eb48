use crate::core::forcefield::params::PotentialParams;
use crate::core::models::builder::LatticeKind;
use crate::core::neighbor::{DEFAULT_CAPACITY, MIN_SKIN, NeighborAlgorithm};
use thiserror::Error;

/// Extra distance added to the potential cutoff when none is configured.
pub const DEFAULT_SKIN: f64 = MIN_SKIN;
pub const DEFAULT_SAMPLE_INTERVAL: usize = 100;
pub const DEFAULT_LATTICE_CONSTANT: f64 = 5.385;
pub const DEFAULT_MASS: f64 = 40.0;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LatticeConfig {
    pub kind: LatticeKind,
    /// Conventional cells along each axis.
    pub cells: usize,
    pub lattice_constant: f64,
    pub mass: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NeighborConfig {
    pub algorithm: NeighborAlgorithm,
    /// Neighbor search radius (potential cutoff plus skin).
    pub cutoff: f64,
    /// Maximum number of neighbors per particle.
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationConfig {
    pub num_steps: usize,
    /// Target initial temperature in K.
    pub temperature: f64,
    /// Time step in fs.
    pub time_step_fs: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub lattice: LatticeConfig,
    pub potential: PotentialParams,
    pub neighbors: NeighborConfig,
    pub integration: IntegrationConfig,
    /// Energies are sampled on every step divisible by this interval.
    pub sample_interval: usize,
    /// Seed for the initial velocities; `None` draws one from the OS.
    pub seed: Option<u64>,
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    lattice_kind: Option<LatticeKind>,
    cells: Option<usize>,
    lattice_constant: Option<f64>,
    mass: Option<f64>,
    potential: Option<PotentialParams>,
    neighbor_algorithm: Option<NeighborAlgorithm>,
    neighbor_cutoff: Option<f64>,
    neighbor_capacity: Option<usize>,
    num_steps: Option<usize>,
    temperature: Option<f64>,
    time_step_fs: Option<f64>,
    sample_interval: Option<usize>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lattice_kind(mut self, kind: LatticeKind) -> Self {
        self.lattice_kind = Some(kind);
        self
    }
    pub fn cells(mut self, cells: usize) -> Self {
        self.cells = Some(cells);
        self
    }
    pub fn lattice_constant(mut self, a: f64) -> Self {
        self.lattice_constant = Some(a);
        self
    }
    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }
    pub fn potential(mut self, params: PotentialParams) -> Self {
        self.potential = Some(params);
        self
    }
    pub fn neighbor_algorithm(mut self, algorithm: NeighborAlgorithm) -> Self {
        self.neighbor_algorithm = Some(algorithm);
        self
    }
    pub fn neighbor_cutoff(mut self, cutoff: f64) -> Self {
        self.neighbor_cutoff = Some(cutoff);
        self
    }
    pub fn neighbor_capacity(mut self, capacity: usize) -> Self {
        self.neighbor_capacity = Some(capacity);
        self
    }
    pub fn num_steps(mut self, steps: usize) -> Self {
        self.num_steps = Some(steps);
        self
    }
    pub fn temperature(mut self, kelvin: f64) -> Self {
        self.temperature = Some(kelvin);
        self
    }
    pub fn time_step_fs(mut self, fs: f64) -> Self {
        self.time_step_fs = Some(fs);
        self
    }
    pub fn sample_interval(mut self, interval: usize) -> Self {
        self.sample_interval = Some(interval);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let lattice = LatticeConfig {
            kind: self.lattice_kind.unwrap_or_default(),
            cells: self.cells.ok_or(ConfigError::MissingParameter("cells"))?,
            lattice_constant: self.lattice_constant.unwrap_or(DEFAULT_LATTICE_CONSTANT),
            mass: self.mass.unwrap_or(DEFAULT_MASS),
        };
        let potential = self.potential.unwrap_or_default();
        let neighbors = NeighborConfig {
            algorithm: self.neighbor_algorithm.unwrap_or_default(),
            cutoff: self
                .neighbor_cutoff
                .unwrap_or(potential.cutoff() + DEFAULT_SKIN),
            capacity: self.neighbor_capacity.unwrap_or(DEFAULT_CAPACITY),
        };
        let integration = IntegrationConfig {
            num_steps: self
                .num_steps
                .ok_or(ConfigError::MissingParameter("num_steps"))?,
            temperature: self
                .temperature
                .ok_or(ConfigError::MissingParameter("temperature"))?,
            time_step_fs: self
                .time_step_fs
                .ok_or(ConfigError::MissingParameter("time_step_fs"))?,
        };
        let config = SimulationConfig {
            lattice,
            potential,
            neighbors,
            integration,
            sample_interval: self.sample_interval.unwrap_or(DEFAULT_SAMPLE_INTERVAL),
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

impl SimulationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |name: &'static str, reason: String| {
            Err(ConfigError::InvalidParameter { name, reason })
        };
        if self.lattice.cells == 0 {
            return invalid("cells", "must be at least 1".to_string());
        }
        if !(self.lattice.lattice_constant > 0.0) {
            return invalid("lattice_constant", "must be positive".to_string());
        }
        if !(self.lattice.mass > 0.0) {
            return invalid("mass", "must be positive".to_string());
        }
        let temperature = self.integration.temperature;
        if !(temperature.is_finite() && temperature >= 0.0) {
            return invalid("temperature", format!("must be non-negative, got {temperature}"));
        }
        let dt = self.integration.time_step_fs;
        if !(dt.is_finite() && dt > 0.0) {
            return invalid("time_step_fs", format!("must be positive, got {dt}"));
        }
        let min_cutoff = self.potential.cutoff() + MIN_SKIN;
        if !(self.neighbors.cutoff >= min_cutoff) {
            return invalid(
                "neighbor_cutoff",
                format!(
                    "{} leaves less than {} A of skin over the potential cutoff {}",
                    self.neighbors.cutoff,
                    MIN_SKIN,
                    self.potential.cutoff()
                ),
            );
        }
        if self.neighbors.capacity == 0 {
            return invalid("neighbor_capacity", "must be at least 1".to_string());
        }
        if self.sample_interval == 0 {
            return invalid("sample_interval", "must be at least 1".to_string());
        }
        Ok(())
    }
}
