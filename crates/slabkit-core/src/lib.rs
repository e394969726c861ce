//! # Slabkit Core
//!
//! Core types and utilities shared by the Slabkit crates.
//! Provides the unified error type, the measurement service that turns
//! length text into inches, and the numeric tolerances used by the
//! outline engine.

pub mod error;
pub mod tolerance;
pub mod units;

pub use error::{Error, PieceError, Result, UnitsError};
pub use tolerance::Tolerances;
pub use units::{
    format_fraction, format_fraction_with, format_length, get_unit_label, parse_length,
    MeasurementSystem, MM_PER_INCH,
};
