use crate::core::forcefield::ForceField;
use crate::core::forcefield::term::ForceReport;
use crate::core::io::thermo::ThermoWriter;
use crate::core::models::builder::LatticeBuilder;
use crate::core::neighbor::NeighborList;
use crate::engine::config::SimulationConfig;
use crate::engine::error::EngineError;
use crate::engine::integrator::VelocityVerlet;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::SimulationState;
use crate::engine::velocity::initialize_velocities;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Observables recorded at one sampled step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermoSample {
    pub step: usize,
    pub kinetic: f64,
    pub potential: f64,
    /// Virial pressure in eV/Å³.
    pub pressure: f64,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub num_particles: usize,
    /// How many times the neighbor list was built, including the first build.
    pub num_neighbor_updates: usize,
    pub samples: Vec<ThermoSample>,
    pub final_report: ForceReport,
    pub final_temperature: f64,
    /// Pressure averaged over the samples, `None` when nothing was sampled.
    pub mean_pressure: Option<f64>,
    /// Wall-clock time of the neighbor, force and integration loop.
    pub elapsed: Duration,
}

/// Runs a full simulation and streams each sample to `output`.
///
/// A sample is taken after every step whose index is a multiple of the
/// configured interval, starting with step 0.
#[instrument(skip_all, name = "simulation_workflow")]
pub fn run<W: Write>(
    config: &SimulationConfig,
    reporter: &ProgressReporter,
    output: &mut ThermoWriter<W>,
) -> Result<RunSummary, EngineError> {
    // === Phase 0: Preparation ===
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    let mut state = prepare_state(config)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 1: Time integration ===
    reporter.report(Progress::PhaseStart {
        name: "Integration",
    });
    let num_steps = config.integration.num_steps;
    let interval = config.sample_interval;
    let mut samples = Vec::with_capacity(num_steps / interval + 1);

    let volume = state.sim_box.volume();
    let started = Instant::now();
    state.prime()?;

    reporter.report(Progress::TaskStart {
        total_steps: num_steps as u64,
    });
    for step in 0..num_steps {
        state.step()?;

        if step % interval == 0 {
            let kinetic = state.ensemble.kinetic_energy();
            let sample = ThermoSample {
                step,
                kinetic,
                potential: state.ensemble.potential_energy(),
                pressure: state.report().pressure(kinetic, volume),
            };
            if !(sample.kinetic.is_finite() && sample.potential.is_finite()) {
                return Err(EngineError::Unstable { step });
            }
            output.write_sample(sample.kinetic, sample.potential)?;
            debug!(
                step,
                kinetic = sample.kinetic,
                potential = sample.potential,
                pressure = sample.pressure,
                "Recorded energy sample."
            );
            reporter.report(Progress::Sample {
                step,
                kinetic: sample.kinetic,
                potential: sample.potential,
            });
            samples.push(sample);
        }
        reporter.report(Progress::TaskIncrement);
    }
    output.flush()?;
    let elapsed = started.elapsed();
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let mean_pressure = (!samples.is_empty())
        .then(|| samples.iter().map(|s| s.pressure).sum::<f64>() / samples.len() as f64);
    let summary = RunSummary {
        num_particles: state.ensemble.len(),
        num_neighbor_updates: state.neighbors().num_updates(),
        samples,
        final_report: *state.report(),
        final_temperature: state.ensemble.temperature(),
        mean_pressure,
        elapsed,
    };
    info!(
        "Simulation complete: {} steps, {} neighbor list updates in {:.3} s.",
        num_steps,
        summary.num_neighbor_updates,
        summary.elapsed.as_secs_f64()
    );
    if let Some(pressure) = summary.mean_pressure {
        info!("Mean virial pressure: {:.6e} eV/A^3.", pressure);
    }
    Ok(summary)
}

fn prepare_state(config: &SimulationConfig) -> Result<SimulationState, EngineError> {
    let lattice = &config.lattice;
    info!(
        "Building {} lattice with {}x{}x{} unit cells (a = {} A).",
        lattice.kind, lattice.cells, lattice.cells, lattice.cells, lattice.lattice_constant
    );
    let crystal = LatticeBuilder::new(lattice.kind, lattice.lattice_constant, lattice.mass)
        .cells(lattice.cells)
        .build()?;
    let sim_box = crystal.sim_box;
    let mut ensemble = crystal.ensemble;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    initialize_velocities(&mut ensemble, config.integration.temperature, &mut rng);

    let neighbors_config = &config.neighbors;
    let min_thickness = sim_box.thickness().min();
    if neighbors_config.cutoff > 0.5 * min_thickness {
        warn!(
            "Neighbor cutoff {} A exceeds half the smallest box thickness ({} A); only the nearest image of each pair is seen.",
            neighbors_config.cutoff,
            0.5 * min_thickness
        );
    }

    let force_field = ForceField::new(&config.potential);
    let neighbors = NeighborList::new(
        neighbors_config.algorithm,
        neighbors_config.cutoff,
        ensemble.len(),
        neighbors_config.capacity,
    );
    info!(
        "Prepared {} particles with the {} potential and a {} neighbor list (cutoff {} A).",
        ensemble.len(),
        config.potential.name(),
        neighbors.algorithm(),
        neighbors.cutoff()
    );

    Ok(SimulationState::new(
        sim_box,
        ensemble,
        neighbors,
        force_field,
        VelocityVerlet::from_femtoseconds(config.integration.time_step_fs),
    ))
}
