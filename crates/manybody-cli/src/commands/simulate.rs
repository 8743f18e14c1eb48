use crate::cli::Cli;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use manybody::core::io::thermo::ThermoWriter;
use manybody::engine::error::EngineError;
use manybody::engine::progress::ProgressReporter;
use manybody::workflows::{self, simulate::RunSummary};
use tracing::info;

pub fn run(args: &Cli) -> Result<RunSummary> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = build_config(args)?;

    let progress_handler = if app_config.show_progress {
        CliProgressHandler::new()
    } else {
        CliProgressHandler::hidden()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Writing energies to {:?}", &app_config.output_path);
    let mut writer = ThermoWriter::create(&app_config.output_path).map_err(EngineError::from)?;

    info!("Invoking the core simulation workflow...");
    let summary = workflows::simulate::run(&app_config.core_config, &reporter, &mut writer)?;

    info!(
        "Workflow finished: {} particles, {} samples, final temperature {:.2} K.",
        summary.num_particles,
        summary.samples.len(),
        summary.final_temperature
    );
    Ok(summary)
}
