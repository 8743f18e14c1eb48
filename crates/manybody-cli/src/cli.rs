use clap::{ArgAction, Parser, ValueEnum};
use manybody::core::models::builder::LatticeKind;
use manybody::core::neighbor::NeighborAlgorithm;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "ManyBody CLI - Constant-energy molecular dynamics of a periodic crystal with Tersoff or Lennard-Jones interactions.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    // --- Positional Arguments ---
    /// Number of unit cells along each lattice vector.
    #[arg(value_name = "CELLS")]
    pub cells: usize,

    /// Number of integration steps.
    #[arg(value_name = "STEPS")]
    pub steps: usize,

    /// Initial temperature in kelvin.
    #[arg(value_name = "TEMPERATURE")]
    pub temperature: f64,

    /// Integration time step in femtoseconds.
    #[arg(value_name = "TIME_STEP_FS")]
    pub time_step: f64,

    // --- Logging ---
    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Simulation Overrides ---
    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Interatomic potential.
    /// Can be a built-in name ('tersoff-carbon', 'lj-argon') or a TOML parameter file.
    #[arg(short, long, value_name = "NAME_OR_PATH")]
    pub potential: Option<String>,

    /// Neighbor list construction algorithm.
    #[arg(long, value_enum, value_name = "ALGORITHM")]
    pub neighbor_algorithm: Option<NeighborAlgorithmArg>,

    /// Crystal structure of the initial configuration.
    #[arg(long, value_enum, value_name = "KIND")]
    pub lattice: Option<LatticeArg>,

    /// Path of the energy output file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Seed for the initial velocities. A random seed is used when omitted.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output.sample-interval=10
    #[arg(
        short = 'S',
        long = "set",
        value_name = "KEY=VALUE",
        num_args(1),
        action = ArgAction::Append
    )]
    pub set_values: Vec<String>,

    /// Do not draw the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborAlgorithmArg {
    /// Test every pair of particles.
    Direct,
    /// Bin particles into cells no smaller than the cutoff.
    LinkedCell,
}

impl From<NeighborAlgorithmArg> for NeighborAlgorithm {
    fn from(arg: NeighborAlgorithmArg) -> Self {
        match arg {
            NeighborAlgorithmArg::Direct => NeighborAlgorithm::Direct,
            NeighborAlgorithmArg::LinkedCell => NeighborAlgorithm::LinkedCell,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeArg {
    /// Face-centered cubic.
    Fcc,
    /// Diamond cubic.
    Diamond,
}

impl From<LatticeArg> for LatticeKind {
    fn from(arg: LatticeArg) -> Self {
        match arg {
            LatticeArg::Fcc => LatticeKind::Fcc,
            LatticeArg::Diamond => LatticeKind::Diamond,
        }
    }
}
