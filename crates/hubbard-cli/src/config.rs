//! Run configuration for the `evolve` command.
//!
//! Values come from, lowest to highest precedence:
//! 1. Defaults
//! 2. A YAML configuration file
//! 3. Environment variables (with HUBBARD_ prefix)
//! 4. Command-line flags

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use hubbard_chem::{FermionTransform, TrotterMode, bravyi_kitaev, jordan_wigner, singlet_paramsize};

/// Fermion-to-qubit mapping selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TransformKind {
    #[default]
    JordanWigner,
    BravyiKitaev,
}

impl TransformKind {
    /// The mapping function.
    pub fn transform(self) -> &'static FermionTransform {
        match self {
            TransformKind::JordanWigner => &jordan_wigner,
            TransformKind::BravyiKitaev => &bravyi_kitaev,
        }
    }
}

impl FromStr for TransformKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jordan-wigner" | "jw" => Ok(TransformKind::JordanWigner),
            "bravyi-kitaev" | "bk" => Ok(TransformKind::BravyiKitaev),
            other => Err(ConfigError::ValidationError(format!(
                "Unknown transform: {other}"
            ))),
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformKind::JordanWigner => write!(f, "jordan-wigner"),
            TransformKind::BravyiKitaev => write!(f, "bravyi-kitaev"),
        }
    }
}

/// Parameters of a singlet evolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Number of spin-orbitals (qubits)
    #[serde(default = "default_qubits")]
    pub qubits: u32,

    /// Number of electrons
    #[serde(default = "default_electrons")]
    pub electrons: u32,

    /// Packed amplitudes; when absent every amplitude is `initial_amplitude`
    #[serde(default)]
    pub amplitudes: Option<Vec<f64>>,

    /// Fill value for missing amplitudes
    #[serde(default = "default_initial_amplitude")]
    pub initial_amplitude: f64,

    /// "suzuki", "lie" or "trotter"
    #[serde(default = "default_trotter_mode")]
    pub trotter_mode: String,

    /// Number of Trotter slices
    #[serde(default = "default_reps")]
    pub reps: usize,

    /// Fermion-to-qubit mapping
    #[serde(default)]
    pub transform: TransformKind,
}

fn default_qubits() -> u32 {
    4
}

fn default_electrons() -> u32 {
    2
}

fn default_initial_amplitude() -> f64 {
    0.01
}

fn default_trotter_mode() -> String {
    "suzuki".to_string()
}

fn default_reps() -> usize {
    2
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            qubits: default_qubits(),
            electrons: default_electrons(),
            amplitudes: None,
            initial_amplitude: default_initial_amplitude(),
            trotter_mode: default_trotter_mode(),
            reps: default_reps(),
            transform: TransformKind::default(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load the file (or defaults) and apply environment overrides.
    ///
    /// The result is not validated: command-line flags still go on top,
    /// so callers validate once every layer is merged.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => RunConfig::default(),
        };
        config.merge_env(|key| std::env::var(key).ok())
    }

    /// Override fields from variables that `lookup` finds.
    ///
    /// Unlike unset variables, a set but unparsable variable is an error.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("HUBBARD_QUBITS") {
            self.qubits = parse_env("HUBBARD_QUBITS", &v)?;
        }
        if let Some(v) = lookup("HUBBARD_ELECTRONS") {
            self.electrons = parse_env("HUBBARD_ELECTRONS", &v)?;
        }
        if let Some(v) = lookup("HUBBARD_AMPLITUDES") {
            self.amplitudes = Some(parse_list(&v)?);
        }
        if let Some(v) = lookup("HUBBARD_TROTTER_MODE") {
            self.trotter_mode = v;
        }
        if let Some(v) = lookup("HUBBARD_REPS") {
            self.reps = parse_env("HUBBARD_REPS", &v)?;
        }
        if let Some(v) = lookup("HUBBARD_TRANSFORM") {
            self.transform = v.parse()?;
        }
        Ok(self)
    }

    /// Number of amplitudes this problem takes.
    pub fn paramsize(&self) -> Result<usize, ConfigError> {
        singlet_paramsize(self.qubits, self.electrons)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// The amplitudes to evolve with.
    pub fn resolved_amplitudes(&self) -> Result<Vec<f64>, ConfigError> {
        match &self.amplitudes {
            Some(amps) => Ok(amps.clone()),
            None => Ok(vec![self.initial_amplitude; self.paramsize()?]),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let expected = self.paramsize()?;

        self.trotter_mode
            .parse::<TrotterMode>()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if self.reps == 0 {
            return Err(ConfigError::ValidationError(
                "reps must be greater than 0".to_string(),
            ));
        }

        if let Some(ref amps) = self.amplitudes {
            if amps.len() != expected {
                return Err(ConfigError::ValidationError(format!(
                    "expected {expected} amplitudes for {} electrons in {} qubits, got {}",
                    self.electrons,
                    self.qubits,
                    amps.len()
                )));
            }
            if amps.iter().any(|a| !a.is_finite()) {
                return Err(ConfigError::ValidationError(
                    "amplitudes must be finite".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::ParseError(format!("{key}: cannot parse {value:?}")))
}

fn parse_list(value: &str) -> Result<Vec<f64>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_env("HUBBARD_AMPLITUDES", s))
        .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
