//! Configuration for the qctk CLI.
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables (`QCTK_` prefix)
//! 3. Configuration file (`--config PATH`, else `~/.config/qctk/config.yaml`)
//! 4. Default values
//!
//! ```yaml
//! output:
//!   format: table
//!   color: true
//! coupling: linear:5
//! wiring:
//!   method: swaps
//! optimize:
//!   level: 2
//! ```

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use qctk_compile::{CouplingMap, WiringMethod};

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How results are printed.
    #[serde(default)]
    pub output: OutputConfig,

    /// Default coupling-map spec, e.g. `linear:5` or `grid:3x3`.
    #[serde(default)]
    pub coupling: Option<String>,

    /// Wiring synthesis settings.
    #[serde(default)]
    pub wiring: WiringConfig,

    /// Optimization settings.
    #[serde(default)]
    pub optimize: OptimizeConfig,
}

/// Result printing format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Styled terminal output.
    #[serde(default = "default_true")]
    pub color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WiringConfig {
    #[serde(default)]
    pub method: WiringMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizeConfig {
    /// Optimization level (0-3).
    #[serde(default = "default_level")]
    pub level: u8,
}

fn default_true() -> bool {
    true
}

fn default_level() -> u8 {
    1
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: default_true(),
        }
    }
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text. An empty document gives defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// The default configuration file, `~/.config/qctk/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("qctk").join("config.yaml"))
    }

    /// Load configuration: file (explicit path, else the default path if it
    /// exists), then environment overrides, then validation.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    debug!(path = %path.display(), "loading configuration");
                    Self::from_file(path)?
                }
                None => Self::default(),
            },
        };

        let config = config.merge_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `QCTK_*` overrides read through `var`.
    ///
    /// Only variables that are set override the current values; values that
    /// do not parse are ignored with a warning.
    pub fn merge_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = var("QCTK_FORMAT") {
            match OutputFormat::from_str(&v, true) {
                Ok(format) => self.output.format = format,
                Err(_) => warn!("ignoring QCTK_FORMAT={v}"),
            }
        }
        if let Some(v) = var("QCTK_COLOR") {
            match v.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "always" => self.output.color = true,
                "0" | "false" | "no" | "never" => self.output.color = false,
                _ => warn!("ignoring QCTK_COLOR={v}"),
            }
        }
        if let Some(v) = var("QCTK_COUPLING") {
            self.coupling = Some(v);
        }
        if let Some(v) = var("QCTK_WIRING_METHOD") {
            match v.parse() {
                Ok(method) => self.wiring.method = method,
                Err(_) => warn!("ignoring QCTK_WIRING_METHOD={v}"),
            }
        }
        if let Some(v) = var("QCTK_OPTIMIZE_LEVEL") {
            match v.parse() {
                Ok(level) => self.optimize.level = level,
                Err(_) => warn!("ignoring QCTK_OPTIMIZE_LEVEL={v}"),
            }
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.optimize.level > 3 {
            return Err(ConfigError::ValidationError(format!(
                "optimization level must be 0-3, got {}",
                self.optimize.level
            )));
        }
        if let Some(spec) = &self.coupling {
            CouplingMap::parse(spec)
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }
        Ok(())
    }

    /// The configured coupling map, if any.
    pub fn coupling_map(&self) -> Result<Option<CouplingMap>, ConfigError> {
        self.coupling
            .as_deref()
            .map(CouplingMap::parse)
            .transpose()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(config.output.color);
        assert_eq!(config.wiring.method, WiringMethod::Swaps);
        assert_eq!(config.optimize.level, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial() {
        let config = Config::from_yaml("optimize:\n  level: 3\ncoupling: ring:4\n").unwrap();
        assert_eq!(config.optimize.level, 3);
        assert_eq!(config.coupling.as_deref(), Some("ring:4"));
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.coupling_map().unwrap().unwrap().num_qubits(), 4);
    }

    #[test]
    fn test_yaml_full() {
        let config = Config::from_yaml(
            "output:\n  format: json\n  color: false\nwiring:\n  method: gauss\n",
        )
        .unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color);
        assert_eq!(config.wiring.method, WiringMethod::Gauss);
    }

    #[test]
    fn test_yaml_rejects_unknown_keys() {
        assert!(matches!(
            Config::from_yaml("optimise:\n  level: 2\n"),
            Err(ConfigError::ParseError(_))
        ));
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let file = Config::from_yaml("optimize:\n  level: 3\noutput:\n  format: json\n").unwrap();
        let config = file.merge_env(env(&[
            ("QCTK_OPTIMIZE_LEVEL", "0"),
            ("QCTK_COLOR", "never"),
            ("QCTK_WIRING_METHOD", "gauss"),
        ]));
        assert_eq!(config.optimize.level, 0);
        assert!(!config.output.color);
        assert_eq!(config.wiring.method, WiringMethod::Gauss);
        // Unset variables leave file values alone.
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_env_bad_values_ignored() {
        let config = Config::default().merge_env(env(&[
            ("QCTK_OPTIMIZE_LEVEL", "high"),
            ("QCTK_FORMAT", "xml"),
        ]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.optimize.level = 4;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = Config::default();
        config.coupling = Some("hexagon:7".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "coupling: grid:2x3\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.coupling_map().unwrap().unwrap().num_qubits(), 6);

        let missing = Config::from_file(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(ConfigError::IoError(_))));
    }
}
