//! Plugin input loading and flag merging.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use givenergy_core::PluginInput;
use givenergy_plugin::PluginError;
use tracing::debug;

/// Input fields that can also be given on the command line.
///
/// A field present in the input object always wins over its flag.
#[derive(Args, Debug, Clone, Default)]
pub struct InputFlags {
    /// API token (falls back to `GIVENERGY_API_TOKEN`).
    #[arg(long)]
    pub api_token: Option<String>,

    /// Inverter serial number (falls back to `GIVENERGY_INVERTER_ID`).
    #[arg(long)]
    pub inverter_id: Option<String>,

    /// Only chart the most recent N hours.
    #[arg(long)]
    pub hours_to_show: Option<f64>,

    /// Clamp the power axis to +/- this many watts.
    #[arg(long)]
    pub max_axis_power: Option<f64>,

    /// Theme name ("monochrome" or default).
    #[arg(long)]
    pub theme: Option<String>,
}

/// Reads the raw input JSON from a file, or stdin for `-`.
///
/// With no source the input is the empty object.
pub fn read_input(source: Option<&Path>) -> Result<String> {
    match source {
        None => Ok("{}".to_string()),
        Some(path) if path.as_os_str() == "-" => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read input from stdin")?;
            Ok(raw)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
    }
}

/// Parses the input object. Blank input is the empty object.
pub fn parse_input(raw: &str) -> Result<PluginInput, PluginError> {
    if raw.trim().is_empty() {
        return Ok(PluginInput::default());
    }
    serde_json::from_str(raw).map_err(PluginError::Input)
}

/// Fills fields the input left unset from the command-line flags.
pub fn apply_flags(mut input: PluginInput, flags: &InputFlags) -> PluginInput {
    fill_text(&mut input.api_token, flags.api_token.as_ref());
    fill_text(&mut input.inverter_id, flags.inverter_id.as_ref());
    fill_text(&mut input.theme, flags.theme.as_ref());
    fill_number(&mut input.hours_to_show, flags.hours_to_show);
    fill_number(&mut input.max_axis_power, flags.max_axis_power);

    debug!(%input, "Merged input with flags");
    input
}

fn fill_text(field: &mut Option<String>, flag: Option<&String>) {
    if field.as_deref().is_none_or(str::is_empty) {
        if let Some(value) = flag {
            *field = Some(value.clone());
        }
    }
}

// Zero is the same as unset.
fn fill_number(field: &mut Option<f64>, flag: Option<f64>) {
    if (*field).is_none_or(|v| v == 0.0) && flag.is_some() {
        *field = flag;
    }
}
