use phf::{Map, phf_map};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const TERSOFF_CARBON: &str = r#"
type = "tersoff"
a = 1393.6
b = 430.0
lambda = 3.4879
mu = 2.2119
beta = 1.5724e-7
n = 0.72751
c = 38049.0
d = 4.3484
h = -0.930
r1 = 1.8
r2 = 2.1
"#;

const LJ_ARGON: &str = r#"
type = "lennard-jones"
epsilon = 1.032e-2
sigma = 3.405
cutoff = 9.0
"#;

/// Built-in parameter sets, addressable by name from the command line.
pub static PRESETS: Map<&'static str, &'static str> = phf_map! {
    "tersoff-carbon" => TERSOFF_CARBON,
    "lj-argon" => LJ_ARGON,
};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct LennardJonesParams {
    /// Well depth in eV.
    pub epsilon: f64,
    /// Zero-crossing distance in Å.
    pub sigma: f64,
    /// Interaction cutoff in Å.
    pub cutoff: f64,
}

impl Default for LennardJonesParams {
    fn default() -> Self {
        Self {
            epsilon: 1.032e-2,
            sigma: 3.405,
            cutoff: 9.0,
        }
    }
}

/// Single-species Tersoff parameters.
///
/// The defaults are the optimized carbon set of Lindsay and Broido.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct TersoffParams {
    pub a: f64,
    pub b: f64,
    pub lambda: f64,
    pub mu: f64,
    pub beta: f64,
    pub n: f64,
    pub c: f64,
    pub d: f64,
    pub h: f64,
    /// Inner cutoff radius: the smooth cutoff is 1 below it.
    pub r1: f64,
    /// Outer cutoff radius: the smooth cutoff is 0 from it on.
    pub r2: f64,
}

impl Default for TersoffParams {
    fn default() -> Self {
        Self {
            a: 1393.6,
            b: 430.0,
            lambda: 3.4879,
            mu: 2.2119,
            beta: 1.5724e-7,
            n: 0.72751,
            c: 38049.0,
            d: 4.3484,
            h: -0.930,
            r1: 1.8,
            r2: 2.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PotentialParams {
    LennardJones(LennardJonesParams),
    Tersoff(TersoffParams),
}

impl Default for PotentialParams {
    fn default() -> Self {
        PotentialParams::Tersoff(TersoffParams::default())
    }
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Unknown potential preset '{0}'")]
    UnknownPreset(String),
    #[error("Invalid potential parameter '{name}': {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl PotentialParams {
    /// Distance beyond which the potential contributes nothing.
    pub fn cutoff(&self) -> f64 {
        match self {
            PotentialParams::LennardJones(p) => p.cutoff,
            PotentialParams::Tersoff(p) => p.r2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PotentialParams::LennardJones(_) => "lennard-jones",
            PotentialParams::Tersoff(_) => "tersoff",
        }
    }

    /// Looks up one of the built-in [`PRESETS`].
    pub fn preset(name: &str) -> Result<Self, ParamLoadError> {
        let source = PRESETS
            .get(name)
            .ok_or_else(|| ParamLoadError::UnknownPreset(name.to_string()))?;
        Self::from_toml_str(source, name)
    }

    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path.to_string_lossy())
    }

    /// Resolves `name_or_path` as a preset name first and as a file otherwise.
    pub fn resolve(name_or_path: &str) -> Result<Self, ParamLoadError> {
        if PRESETS.contains_key(name_or_path) {
            Self::preset(name_or_path)
        } else if Path::new(name_or_path).exists() {
            Self::load(Path::new(name_or_path))
        } else {
            Err(ParamLoadError::UnknownPreset(name_or_path.to_string()))
        }
    }

    fn from_toml_str(content: &str, origin: &str) -> Result<Self, ParamLoadError> {
        let params: Self = toml::from_str(content).map_err(|e| ParamLoadError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<(), ParamLoadError> {
        let invalid = |name, reason: &str| {
            Err(ParamLoadError::Invalid {
                name,
                reason: reason.to_string(),
            })
        };
        match self {
            PotentialParams::LennardJones(p) => {
                if !(p.sigma > 0.0) {
                    return invalid("sigma", "must be positive");
                }
                if !(p.cutoff > 0.0) {
                    return invalid("cutoff", "must be positive");
                }
            }
            PotentialParams::Tersoff(p) => {
                if !(p.r1 >= 0.0 && p.r2 > p.r1) {
                    return invalid("r2", "must be greater than r1");
                }
                if !(p.n > 0.0) {
                    return invalid("n", "must be positive");
                }
                if p.d == 0.0 {
                    return invalid("d", "must be non-zero");
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn presets_match_defaults() {
        assert_eq!(
            PotentialParams::preset("tersoff-carbon").unwrap(),
            PotentialParams::Tersoff(TersoffParams::default())
        );
        assert_eq!(
            PotentialParams::preset("lj-argon").unwrap(),
            PotentialParams::LennardJones(LennardJonesParams::default())
        );
    }

    #[test]
    fn preset_fails_for_unknown_name() {
        let result = PotentialParams::preset("stillinger-weber");
        assert!(matches!(result, Err(ParamLoadError::UnknownPreset(name)) if name == "stillinger-weber"));
    }

    #[test]
    fn cutoff_is_outer_radius_for_tersoff() {
        assert_eq!(PotentialParams::default().cutoff(), 2.1);
        assert_eq!(
            PotentialParams::LennardJones(LennardJonesParams::default()).cutoff(),
            9.0
        );
    }

    #[test]
    fn load_succeeds_with_valid_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("krypton.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(
            file,
            r#"
            type = "lennard-jones"
            epsilon = 0.0140
            sigma = 3.65
            cutoff = 10.0
            "#
        )
        .unwrap();

        let params = PotentialParams::load(&file_path).unwrap();
        assert_eq!(
            params,
            PotentialParams::LennardJones(LennardJonesParams {
                epsilon: 0.0140,
                sigma: 3.65,
                cutoff: 10.0,
            })
        );
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("non_existent.toml");
        let result = PotentialParams::load(&file_path);
        assert!(matches!(result, Err(ParamLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("malformed.toml");
        fs::write(&file_path, "this is not toml").unwrap();
        let result = PotentialParams::load(&file_path);
        assert!(matches!(result, Err(ParamLoadError::Toml { .. })));
    }

    #[test]
    fn load_fails_for_missing_field() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        fs::write(&file_path, "type = \"tersoff\"\na = 1.0\n").unwrap();
        let result = PotentialParams::load(&file_path);
        assert!(matches!(result, Err(ParamLoadError::Toml { .. })));
    }

    #[test]
    fn load_rejects_inverted_cutoff_radii() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("inverted.toml");
        let content = TERSOFF_CARBON.replace("r2 = 2.1", "r2 = 1.5");
        fs::write(&file_path, content).unwrap();
        let result = PotentialParams::load(&file_path);
        assert!(matches!(result, Err(ParamLoadError::Invalid { name: "r2", .. })));
    }

    #[test]
    fn resolve_prefers_presets_and_falls_back_to_files() {
        assert!(PotentialParams::resolve("lj-argon").is_ok());

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("carbon.toml");
        fs::write(&file_path, TERSOFF_CARBON).unwrap();
        let params = PotentialParams::resolve(file_path.to_str().unwrap()).unwrap();
        assert_eq!(params.name(), "tersoff");

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            PotentialParams::resolve(missing.to_str().unwrap()),
            Err(ParamLoadError::UnknownPreset(_))
        ));
    }
}
