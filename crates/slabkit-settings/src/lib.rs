//! Slabkit Settings Crate
//!
//! Handles configuration files: engine tolerances, measurement display and
//! output preferences.

pub mod config;
pub mod error;

pub use config::{Config, OutputFormat, OutputSettings, UnitSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
