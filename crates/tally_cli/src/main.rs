//! Tally CLI
//!
//! Interactive playground for the number, pattern and pin code inputs.
//! Each subcommand reads one event per stdin line and prints the new state.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tally_core::{NumberEngine, PatternInput};
use tally_widgets::{PinCode, DEFAULT_PIN_LENGTH};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod session;

use config::{Overrides, PlaygroundConfig};
use session::OutputFormat;

#[derive(Parser)]
#[command(name = "tally")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tally input playground", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print every state as a JSON line
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Type into a number input (`:inc [n]`, `:dec [n]`, `:clear`, or raw text)
    Number {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Decimal precision
        #[arg(long, allow_negative_numbers = true)]
        digits: Option<i32>,

        /// Inclusive lower bound
        #[arg(long, allow_negative_numbers = true)]
        min: Option<f64>,

        /// Inclusive upper bound
        #[arg(long, allow_negative_numbers = true)]
        max: Option<f64>,

        /// Decoration template, e.g. "$xxx kg"
        #[arg(long)]
        decoration: Option<String>,

        /// Slot marker inside the decoration
        #[arg(long)]
        decoration_symbol: Option<String>,

        /// Reject out-of-range edits instead of clamping
        #[arg(long)]
        ignore_overflow: bool,

        /// Initial value
        #[arg(long, allow_negative_numbers = true)]
        default_value: Option<f64>,

        /// Offset for `:inc` / `:dec` without an argument
        #[arg(long)]
        step: Option<f64>,
    },

    /// Type into a pattern mask (`<segment> <key>` per line)
    Pattern {
        /// Template such as "xx/xx/xxxx"
        template: String,
    },

    /// Type into a pin code (`<cell> <digit>` per line, `<cell>` clears)
    Pin {
        /// Number of cells
        #[arg(short, long, default_value_t = DEFAULT_PIN_LENGTH)]
        cells: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match cli.command {
        Commands::Number {
            config,
            digits,
            min,
            max,
            decoration,
            decoration_symbol,
            ignore_overflow,
            default_value,
            step,
        } => cmd_number(
            config,
            Overrides {
                digits,
                min,
                max,
                decoration,
                decoration_symbol,
                ignore_overflow,
                default_value,
                step,
            },
            format,
        ),

        Commands::Pattern { template } => cmd_pattern(&template, format),

        Commands::Pin { cells } => cmd_pin(cells, format),
    }
}

fn cmd_number(path: Option<PathBuf>, overrides: Overrides, format: OutputFormat) -> Result<()> {
    let config = match path {
        Some(path) => PlaygroundConfig::load_from_path(&path)?,
        None => PlaygroundConfig::default(),
    }
    .with_overrides(overrides);

    debug!(?config, "number playground config");
    let mut engine = NumberEngine::new(config.number)?;
    info!("Number input ready, display {:?}", engine.display());

    session::run_number(
        &mut engine,
        config.step,
        io::stdin().lock(),
        io::stdout().lock(),
        format,
    )
}

fn cmd_pattern(template: &str, format: OutputFormat) -> Result<()> {
    let mut pattern = PatternInput::new(template);
    info!(
        "Pattern ready with {} segments: {}",
        pattern.segments().len(),
        pattern.value()
    );

    session::run_pattern(&mut pattern, io::stdin().lock(), io::stdout().lock(), format)
}

fn cmd_pin(cells: usize, format: OutputFormat) -> Result<()> {
    let mut pin = PinCode::new(cells)?.on_completion(|code| info!("Pin entered: {}", code));
    info!("Pin code ready with {} cells", pin.len());

    session::run_pin(&mut pin, io::stdin().lock(), io::stdout().lock(), format)
}
