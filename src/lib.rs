//! # Slabkit
//!
//! Outline geometry for fabricated slab pieces (countertops, vanity tops,
//! islands): notches, chamfered corners, curved edges and corner radii.
//!
//! ## Architecture
//!
//! Slabkit is organized as a workspace with multiple crates:
//!
//! 1. **slabkit-core** - Error types, measurement parsing, tolerances
//! 2. **slabkit-geometry** - Piece model and the outline engine
//! 3. **slabkit-settings** - Configuration files
//! 4. **slabkit** - Command line front end that integrates all crates
//!
//! This crate adds the pieces the binary needs around the engine: logging
//! setup, loading piece files whose sizes may be written as measurement
//! text, and SVG rendering of computed geometry.

use anyhow::{bail, Context};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

pub use slabkit_core::{parse_length, MeasurementSystem};
pub use slabkit_geometry::{compute_outline, OutlineEngine, PieceGeometry, PieceSpec};
pub use slabkit_settings::{Config, OutputFormat};

/// Build date injected by the build script.
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so stdout stays machine readable
/// - RUST_LOG environment variable support (default `info`)
/// - JSON lines when `json` is set
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(base.json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(base)
            .try_init()?;
    }

    Ok(())
}

/// Fields that hold lengths, per modifier list.
const LENGTH_FIELDS: &[(&str, &[&str])] = &[
    ("cutouts", &["width", "height", "center_x", "center_y"]),
    ("curved_edges", &["radius"]),
    ("corner_radii", &["radius"]),
    ("angle_cuts", &["offset_in", "offset_out"]),
];

fn resolve_length(value: &mut Value, field: &str, system: MeasurementSystem) -> anyhow::Result<()> {
    if let Value::String(text) = value {
        let inches = parse_length(text, system).with_context(|| format!("in field '{}'", field))?;
        *value = serde_json::json!(inches);
    }
    Ok(())
}

/// Replaces measurement text (`"25 1/2"`, `"3/4\""`, `"650mm"`) with inches.
fn resolve_lengths(piece: &mut Value, system: MeasurementSystem) -> anyhow::Result<()> {
    let Some(object) = piece.as_object_mut() else {
        bail!("Piece description must be an object");
    };
    for field in ["width", "height"] {
        if let Some(value) = object.get_mut(field) {
            resolve_length(value, field, system)?;
        }
    }
    for (list, fields) in LENGTH_FIELDS {
        let Some(Value::Array(items)) = object.get_mut(*list) else {
            continue;
        };
        for (i, item) in items.iter_mut().enumerate() {
            for field in *fields {
                if let Some(value) = item.get_mut(*field) {
                    resolve_length(value, &format!("{}[{}].{}", list, i, field), system)?;
                }
            }
        }
    }
    Ok(())
}

/// Parses a piece description from JSON or TOML text.
pub fn parse_piece(text: &str, toml: bool, system: MeasurementSystem) -> anyhow::Result<PieceSpec> {
    let mut value: Value = if toml {
        toml::from_str(text).context("Invalid TOML piece description")?
    } else {
        serde_json::from_str(text).context("Invalid JSON piece description")?
    };
    resolve_lengths(&mut value, system)?;
    let piece: PieceSpec =
        serde_json::from_value(value).context("Piece description does not match the model")?;
    piece.validate()?;
    Ok(piece)
}

/// Loads a piece description file (`.json` or `.toml`).
pub fn load_piece(path: &Path, system: MeasurementSystem) -> anyhow::Result<PieceSpec> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read piece file {}", path.display()))?;
    let toml = path.extension().is_some_and(|ext| ext == "toml");
    let piece = parse_piece(&text, toml, system)
        .with_context(|| format!("Failed to load piece {}", path.display()))?;
    debug!(
        "Loaded {} piece {}x{} from {}",
        piece.kind,
        piece.width,
        piece.height,
        path.display()
    );
    Ok(piece)
}

/// Standalone SVG document with the outline and its holes as one path.
pub fn render_svg(geometry: &PieceGeometry) -> String {
    let mut d = geometry.outline.to_svg_path();
    for hole in &geometry.holes {
        d.push(' ');
        d.push_str(&hole.outline.to_svg_path());
    }
    let (x, y, w, h) = match geometry.bounds() {
        Some(b) => (b.min_x, b.min_y, b.width(), b.height()),
        None => (0.0, 0.0, geometry.width, geometry.height),
    };
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">\n  <path d=\"{}\" fill=\"none\" fill-rule=\"evenodd\" stroke=\"black\" stroke-width=\"0.05\"/>\n</svg>\n",
        x, y, w, h, d
    )
}
