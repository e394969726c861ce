//! Error handling for Slabkit
//!
//! Provides error types for the layers that can actually fail:
//! - Measurement errors (free-form length text that cannot be parsed)
//! - Piece errors (descriptions rejected before geometry is computed)
//!
//! The geometry engine itself never fails: malformed modifiers are left
//! inert and logged. All error types use `thiserror`.

use thiserror::Error;

/// Measurement error type
///
/// Raised by the measurement service when length text cannot be
/// turned into a number of inches.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitsError {
    /// Text is not a number, fraction or mixed number
    #[error("Invalid length '{input}': {reason}")]
    InvalidLength {
        /// The text that failed to parse.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Fraction with a zero denominator
    #[error("Division by zero in '{input}'")]
    DivisionByZero {
        /// The text containing the fraction.
        input: String,
    },

    /// Fraction that is not `numerator/denominator`
    #[error("Invalid fraction '{fraction}'")]
    InvalidFraction {
        /// The offending fraction token.
        fraction: String,
    },
}

/// Piece description error type
///
/// Raised when a piece description is structurally unusable, for example a
/// non-positive nominal size. Modifier problems are never reported here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PieceError {
    /// Nominal width or height is zero, negative or not finite
    #[error("Invalid {dimension}: {value}")]
    InvalidDimension {
        /// Which dimension ("width" or "height").
        dimension: String,
        /// The rejected value.
        value: f64,
    },

    /// A modifier value is not a finite number
    #[error("Non-finite value in {field}")]
    NonFinite {
        /// Field path of the offending value.
        field: String,
    },

    /// A shape kind name was not recognised
    #[error("Unknown shape kind: {0}")]
    UnknownShape(String),
}

/// Main error type for Slabkit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Measurement error
    #[error(transparent)]
    Units(#[from] UnitsError),

    /// Piece description error
    #[error(transparent)]
    Piece(#[from] PieceError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a measurement error
    pub fn is_units_error(&self) -> bool {
        matches!(self, Error::Units(_))
    }

    /// Check if this is a piece description error
    pub fn is_piece_error(&self) -> bool {
        matches!(self, Error::Piece(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
