// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `GivEnergy` chart CLI - runs the chart plugin against the live API.
//!
//! # Examples
//!
//! ```bash
//! # Credentials from the environment
//! GIVENERGY_API_TOKEN=... GIVENERGY_INVERTER_ID=CE1234 givenergy-chart
//!
//! # Input object from a file, pretty output
//! givenergy-chart --input input.json --pretty
//!
//! # Input object from stdin
//! echo '{"hours_to_show": 24}' | givenergy-chart --input -
//!
//! # Cursor pagination, monochrome theme, axis clamped to 5 kW
//! givenergy-chart --pagination cursor --theme monochrome --max-axis-power 5000
//! ```

mod context;
mod input;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use givenergy_fetch::FetchError;
use givenergy_plugin::{ChartPlugin, PluginError};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use context::ConnectionArgs;
use input::InputFlags;

// ============================================================================
// CLI Definition
// ============================================================================

/// `GivEnergy` chart - two days of inverter power flows as an ECharts config.
#[derive(Parser, Debug)]
#[command(name = "givenergy-chart")]
#[command(about = "Fetch two days of GivEnergy inverter data and print an ECharts config")]
#[command(long_about = r#"
Fetches yesterday's and today's power-flow readings from the GivEnergy
cloud API and prints {"chart": ..., "theme": ...} as JSON on stdout.

Credentials come from the input object, then the flags, then the
GIVENERGY_API_TOKEN and GIVENERGY_INVERTER_ID environment variables.

Examples:
  givenergy-chart --input input.json      # Input object from a file
  givenergy-chart --input - < input.json  # Input object from stdin
  givenergy-chart --hours-to-show 24      # Last 24 hours only
"#)]
#[command(version)]
pub struct Cli {
    /// Input object JSON file, or "-" for stdin.
    #[arg(long, short, value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub flags: InputFlags,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode (no logging, no error message).
    #[arg(long, short)]
    pub quiet: bool,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Token or inverter id missing.
    MissingCredentials = 2,
    /// Input object or configuration invalid.
    InvalidInput = 3,
    /// The API request or response failed.
    Upstream = 4,
}

impl ExitCode {
    /// Classifies a run failure.
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<PluginError>() {
            Some(PluginError::Credentials(_)) => Self::MissingCredentials,
            Some(PluginError::Input(_) | PluginError::Fetch(FetchError::InvalidConfig(_))) => {
                Self::InvalidInput
            }
            // A chart failure is a reading the API sent that cannot be read.
            Some(PluginError::Fetch(_) | PluginError::Chart(_)) => Self::Upstream,
            Some(PluginError::Output(_)) | None => match err.downcast_ref::<FetchError>() {
                Some(FetchError::InvalidConfig(_)) => Self::InvalidInput,
                _ => Self::Error,
            },
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("givenergy=debug,info")
    } else {
        EnvFilter::new("givenergy=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli).await {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}

/// Loads the input, runs the plugin and prints the output.
async fn run(cli: &Cli) -> Result<()> {
    let raw = input::read_input(cli.input.as_deref())?;
    let input = input::apply_flags(input::parse_input(&raw)?, &cli.flags);

    let plugin = ChartPlugin::new(context::build_context(&cli.connection)?);
    let output = plugin.run(&input).await?;
    debug!(series = output.chart.series.len(), "Run complete");

    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");

    Ok(())
}
