//! Configuration management for Slabkit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, stored by default in the platform config directory.
//!
//! Configuration is organized into sections:
//! - Geometry tolerances used by the outline engine
//! - Unit preferences (measurement system, fraction precision)
//! - Output preferences for the command line front end

pub use slabkit_core::units::MeasurementSystem;
use serde::{Deserialize, Serialize};
use slabkit_core::{format_fraction_with, format_length, Tolerances};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Measurement display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitSettings {
    /// Measurement system for input text and display
    pub system: MeasurementSystem,
    /// Imperial values are rounded to 1/n of an inch
    pub fraction_denominator: u32,
}

impl Default for UnitSettings {
    fn default() -> Self {
        Self {
            system: MeasurementSystem::Imperial,
            fraction_denominator: slabkit_core::units::DEFAULT_DENOMINATOR,
        }
    }
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full geometry as JSON
    #[default]
    Json,
    /// SVG path data of the outline and holes
    Svg,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Svg => write!(f, "svg"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "svg" => Ok(Self::Svg),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Engine tolerances
    pub geometry: Tolerances,
    /// Unit preferences
    pub units: UnitSettings,
    /// Output preferences
    pub output: OutputSettings,
}

/// File format picked from a path's extension.
enum FileFormat {
    Json,
    Toml,
}

fn file_format(path: &Path) -> SettingsResult<FileFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(FileFormat::Json),
        Some("toml") => Ok(FileFormat::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("none").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/slabkit/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("slabkit").join("config.toml"))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = file_format(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise the default location when it exists,
    /// otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(default) if default.exists() => Self::load_from_file(&default),
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match file_format(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if let Some(reason) = self.geometry.check() {
            return Err(SettingsError::invalid("geometry", reason));
        }

        let denominator = self.units.fraction_denominator;
        if denominator == 0 || !denominator.is_power_of_two() {
            return Err(ConfigError::ValueOutOfRange {
                key: "units.fraction_denominator".to_string(),
                value: denominator.to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Formats a length in inches using the unit preferences.
    pub fn format_measurement(&self, inches: f64) -> String {
        match self.units.system {
            MeasurementSystem::Imperial => {
                format_fraction_with(inches, self.units.fraction_denominator)
            }
            MeasurementSystem::Metric => format_length(inches, MeasurementSystem::Metric),
        }
    }
}
