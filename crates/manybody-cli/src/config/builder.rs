use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::{Cli, LatticeArg, NeighborAlgorithmArg};
use crate::error::{CliError, Result};
use clap::ValueEnum;
use manybody::core::forcefield::params::PotentialParams;
use manybody::engine::config::SimulationConfigBuilder;
use manybody::core::neighbor::MIN_SKIN;
use manybody::engine::error::EngineError;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

pub fn build_config(args: &Cli) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let lattice_file = file_config.lattice.take().unwrap_or_default();
    let neighbors_file = file_config.neighbors.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let potential_name = args
        .potential
        .as_deref()
        .or(file_config.potential.as_deref())
        .unwrap_or(&defaults.potential);
    let potential = PotentialParams::resolve(potential_name).map_err(EngineError::from)?;
    debug!("Resolved potential '{}' to {:?}", potential_name, potential);

    let skin = neighbors_file.skin.unwrap_or(defaults.skin);
    if !(skin.is_finite() && skin >= MIN_SKIN) {
        return Err(CliError::Config(format!(
            "`neighbors.skin` must be at least {}, got {}",
            MIN_SKIN, skin
        )));
    }
    let neighbor_cutoff = potential.cutoff() + skin;

    let core_config = SimulationConfigBuilder::new()
        .lattice_kind(
            args.lattice
                .map(Into::into)
                .or(lattice_file.kind)
                .unwrap_or(defaults.lattice_kind),
        )
        .cells(args.cells)
        .lattice_constant(
            lattice_file
                .lattice_constant
                .unwrap_or(defaults.lattice_constant),
        )
        .mass(lattice_file.mass.unwrap_or(defaults.mass))
        .potential(potential)
        .neighbor_algorithm(
            args.neighbor_algorithm
                .map(Into::into)
                .or(neighbors_file.algorithm)
                .unwrap_or(defaults.neighbor_algorithm),
        )
        .neighbor_cutoff(neighbor_cutoff)
        .neighbor_capacity(
            neighbors_file
                .capacity
                .unwrap_or(defaults.neighbor_capacity),
        )
        .num_steps(args.steps)
        .temperature(args.temperature)
        .time_step_fs(args.time_step)
        .sample_interval(
            output_file
                .sample_interval
                .unwrap_or(defaults.sample_interval),
        )
        .seed(args.seed.or(file_config.seed))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let output_path = args
        .output
        .clone()
        .or(output_file.path)
        .unwrap_or(defaults.output_path);

    Ok(AppConfig {
        output_path,
        show_progress: !args.no_progress,
        core_config,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn parse_choice<T: ValueEnum>(key: &str, value: &str) -> Result<T> {
    T::from_str(value, true)
        .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "potential" => config.potential = Some(value_str.to_string()),
            "seed" => config.seed = Some(parse_value(key, value_str, "integer")?),
            "lattice.kind" => {
                let kind: LatticeArg = parse_choice(key, value_str)?;
                config.lattice.get_or_insert_with(Default::default).kind = Some(kind.into());
            }
            "lattice.lattice-constant" => {
                config
                    .lattice
                    .get_or_insert_with(Default::default)
                    .lattice_constant = Some(parse_value(key, value_str, "float")?);
            }
            "lattice.mass" => {
                config.lattice.get_or_insert_with(Default::default).mass =
                    Some(parse_value(key, value_str, "float")?);
            }
            "neighbors.algorithm" => {
                let algorithm: NeighborAlgorithmArg = parse_choice(key, value_str)?;
                config
                    .neighbors
                    .get_or_insert_with(Default::default)
                    .algorithm = Some(algorithm.into());
            }
            "neighbors.skin" => {
                config.neighbors.get_or_insert_with(Default::default).skin =
                    Some(parse_value(key, value_str, "float")?);
            }
            "neighbors.capacity" => {
                config.neighbors.get_or_insert_with(Default::default).capacity =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "output.path" => {
                config.output.get_or_insert_with(Default::default).path =
                    Some(PathBuf::from(value_str));
            }
            "output.sample-interval" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .sample_interval = Some(parse_value(key, value_str, "integer")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
