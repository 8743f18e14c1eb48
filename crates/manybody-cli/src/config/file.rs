use crate::error::{CliError, Result};
use manybody::core::models::builder::LatticeKind;
use manybody::core::neighbor::NeighborAlgorithm;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileLatticeConfig {
    pub kind: Option<LatticeKind>,
    pub lattice_constant: Option<f64>,
    pub mass: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileNeighborConfig {
    pub algorithm: Option<NeighborAlgorithm>,
    /// Distance added to the potential cutoff.
    pub skin: Option<f64>,
    pub capacity: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub path: Option<PathBuf>,
    pub sample_interval: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    /// Built-in potential name or path to a parameter file.
    pub potential: Option<String>,
    pub seed: Option<u64>,
    pub lattice: Option<FileLatticeConfig>,
    pub neighbors: Option<FileNeighborConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_file_is_parsed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(
            &path,
            r#"
            potential = "lj-argon"
            seed = 9

            [lattice]
            kind = "diamond"
            lattice-constant = 3.567
            mass = 12.011

            [neighbors]
            algorithm = "direct"
            skin = 0.5
            capacity = 64

            [output]
            path = "out.txt"
            sample-interval = 10
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        assert_eq!(config.potential.as_deref(), Some("lj-argon"));
        assert_eq!(config.seed, Some(9));
        let lattice = config.lattice.unwrap();
        assert_eq!(lattice.kind, Some(LatticeKind::Diamond));
        assert_eq!(lattice.lattice_constant, Some(3.567));
        let neighbors = config.neighbors.unwrap();
        assert_eq!(neighbors.algorithm, Some(NeighborAlgorithm::Direct));
        assert_eq!(neighbors.capacity, Some(64));
        let output = config.output.unwrap();
        assert_eq!(output.path, Some(PathBuf::from("out.txt")));
        assert_eq!(output.sample_interval, Some(10));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[lattice]\nspacing = 4.0\n").unwrap();
        assert!(matches!(
            FileConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
