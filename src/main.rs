use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use slabkit::{init_logging, load_piece, parse_length, render_svg, Config, OutlineEngine, OutputFormat};

#[derive(Parser)]
#[command(name = "slabkit")]
#[command(about = "Outline geometry for slab pieces", long_about = None)]
#[command(version, after_help = concat!("Built ", env!("BUILD_DATE")))]
struct Cli {
    /// Configuration file (.json or .toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the outline of a piece description
    Outline {
        /// Piece description (.json or .toml)
        piece: PathBuf,
        /// Output format, overrides the config file
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },
    /// Parse a length and print it in inches
    Measure {
        /// Length text, e.g. "25 1/2" or "650mm"
        text: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json)?;

    let config = Config::load_or_default(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Outline { piece, format } => {
            let spec = load_piece(&piece, config.units.system)?;
            let geometry = OutlineEngine::new(config.geometry).compute(&spec);
            info!(
                "Computed outline with {} segments and {} corners",
                geometry.segments.len(),
                geometry.corners.len()
            );
            match format.unwrap_or(config.output.format) {
                OutputFormat::Json if config.output.pretty => {
                    println!("{}", serde_json::to_string_pretty(&geometry)?)
                }
                OutputFormat::Json => println!("{}", serde_json::to_string(&geometry)?),
                OutputFormat::Svg => print!("{}", render_svg(&geometry)),
            }
        }
        Commands::Measure { text } => {
            let inches = parse_length(&text, config.units.system)
                .with_context(|| format!("Cannot parse '{}'", text))?;
            println!("{} in ({})", inches, config.format_measurement(inches));
        }
    }

    Ok(())
}
