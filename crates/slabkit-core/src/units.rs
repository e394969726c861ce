//! Measurement service
//!
//! Turns free-form length text into inches and inches back into
//! fractional display strings. This is the only place text enters the
//! geometry pipeline; everything downstream works on plain `f64` inches.
//!
//! Imperial input accepts integers, decimals, simple fractions and mixed
//! numbers (`1 1/2` or `1-1/2`), an optional sign and an optional `"` or
//! `in` suffix. Metric input is millimetres.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnitsError;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Default display denominator (sixteenths of an inch)
pub const DEFAULT_DENOMINATOR: u32 = 16;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    Metric,
    /// Imperial system (inches)
    #[default]
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Parse length text to inches
///
/// * `input` - Text to parse
/// * `system` - Measurement system the text is written in
pub fn parse_length(input: &str, system: MeasurementSystem) -> Result<f64, UnitsError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    match system {
        MeasurementSystem::Metric => {
            let body = trimmed
                .strip_suffix("mm")
                .unwrap_or(trimmed)
                .trim_end();
            let mm = parse_number(body, input)?;
            Ok(mm / MM_PER_INCH)
        }
        MeasurementSystem::Imperial => parse_inches(trimmed, input),
    }
}

fn parse_inches(text: &str, input: &str) -> Result<f64, UnitsError> {
    let mut body = text;
    if let Some(rest) = body.strip_suffix('"') {
        body = rest;
    } else if body.len() > 2
        && body.is_char_boundary(body.len() - 2)
        && body[body.len() - 2..].eq_ignore_ascii_case("in")
    {
        body = &body[..body.len() - 2];
    }
    let body = body.trim();

    let (negative, body) = match body.chars().next() {
        Some('-') => (true, body[1..].trim_start()),
        Some('+') => (false, body[1..].trim_start()),
        _ => (false, body),
    };

    if body.is_empty() {
        return Err(invalid(input, "missing number"));
    }

    // Mixed numbers may be written "1-1/2"
    let normalized = if body.contains('/') {
        body.replace('-', " ")
    } else {
        body.to_string()
    };

    let parts: Vec<&str> = normalized.split_whitespace().collect();
    let magnitude = match parts.as_slice() {
        [single] if single.contains('/') => parse_fraction(single, input)?,
        [single] => parse_number(single, input)?,
        [whole, fraction] if !whole.contains('/') && fraction.contains('/') => {
            let whole = parse_number(whole, input)?;
            if whole < 0.0 {
                return Err(invalid(input, "sign inside mixed number"));
            }
            whole + parse_fraction(fraction, input)?
        }
        _ => return Err(invalid(input, "expected number, fraction or mixed number")),
    };

    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_fraction(token: &str, input: &str) -> Result<f64, UnitsError> {
    let frac_parts: Vec<&str> = token.split('/').collect();
    if frac_parts.len() != 2 {
        return Err(UnitsError::InvalidFraction {
            fraction: token.to_string(),
        });
    }

    let num = frac_parts[0]
        .parse::<f64>()
        .map_err(|_| UnitsError::InvalidFraction {
            fraction: token.to_string(),
        })?;
    let den = frac_parts[1]
        .parse::<f64>()
        .map_err(|_| UnitsError::InvalidFraction {
            fraction: token.to_string(),
        })?;
    if num < 0.0 || den < 0.0 {
        return Err(UnitsError::InvalidFraction {
            fraction: token.to_string(),
        });
    }
    if den == 0.0 {
        return Err(UnitsError::DivisionByZero {
            input: input.to_string(),
        });
    }
    Ok(num / den)
}

fn parse_number(token: &str, input: &str) -> Result<f64, UnitsError> {
    let value = token
        .parse::<f64>()
        .map_err(|e| invalid(input, &e.to_string()))?;
    if !value.is_finite() {
        return Err(invalid(input, "not a finite number"));
    }
    Ok(value)
}

fn invalid(input: &str, reason: &str) -> UnitsError {
    UnitsError::InvalidLength {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

/// Format inches as a reduced fraction with a 16ths denominator
///
/// `1.5` becomes `"1 1/2"`, `0.0625` becomes `"1/16"`.
pub fn format_fraction(inches: f64) -> String {
    format_fraction_with(inches, DEFAULT_DENOMINATOR)
}

/// Format inches as a reduced fraction rounded to `1/denominator`
pub fn format_fraction_with(inches: f64, denominator: u32) -> String {
    if !inches.is_finite() || denominator == 0 {
        return "0".to_string();
    }

    let den = denominator as i64;
    let total = (inches.abs() * den as f64).round() as i64;
    if total == 0 {
        return "0".to_string();
    }

    let whole = total / den;
    let mut num = total % den;
    let mut reduced_den = den;
    let divisor = gcd(num, reduced_den);
    if divisor > 1 {
        num /= divisor;
        reduced_den /= divisor;
    }

    let sign = if inches < 0.0 { "-" } else { "" };
    match (whole, num) {
        (w, 0) => format!("{}{}", sign, w),
        (0, n) => format!("{}{}/{}", sign, n, reduced_den),
        (w, n) => format!("{}{} {}/{}", sign, w, n, reduced_den),
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a.abs()
    } else {
        gcd(b, a % b)
    }
}

/// Format a length given in inches for display
///
/// * `inches` - Value in inches
/// * `system` - Target measurement system
pub fn format_length(inches: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.3}", inches * MM_PER_INCH),
        MeasurementSystem::Imperial => format_fraction(inches),
    }
}

/// Get the unit label for the given system ("mm" or "in")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}
