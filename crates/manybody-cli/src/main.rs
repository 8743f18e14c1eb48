mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use clap::Parser;
use clap::error::ErrorKind;
use tracing::{debug, error, info};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run_app(&cli) {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app(cli: &Cli) -> Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!(
        "🚀 ManyBody CLI v{} starting up.",
        env!("CARGO_PKG_VERSION")
    );
    debug!("Full CLI arguments parsed: {:?}", cli);

    match commands::simulate::run(cli) {
        Ok(summary) => {
            println!("{} neighbor list updates", summary.num_neighbor_updates);
            println!("Time used = {} s", summary.elapsed.as_secs_f64());
            info!("✅ Simulation completed successfully.");
            Ok(())
        }
        Err(e) => {
            error!("❌ Simulation failed: {}", e);
            Err(e)
        }
    }
}
