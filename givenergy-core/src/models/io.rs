//! Plugin input and output objects.

use serde::{Deserialize, Serialize};

/// The single input object handed to the plugin.
///
/// Every field is optional. Credentials fall back to environment
/// variables; the display options are skipped when absent or zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginInput {
    /// Bearer token for the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Inverter serial number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverter_id: Option<String>,
    /// Only chart the most recent N hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_to_show: Option<f64>,
    /// Clamp the power axis to +/- this many watts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_axis_power: Option<f64>,
    /// Named theme (`"monochrome"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl PluginInput {
    /// `hours_to_show`, with zero treated as unset.
    pub fn hours_window(&self) -> Option<f64> {
        self.hours_to_show.filter(|h| *h != 0.0)
    }

    /// `max_axis_power`, with zero treated as unset.
    pub fn power_limit(&self) -> Option<f64> {
        self.max_axis_power.filter(|l| *l != 0.0)
    }
}

impl std::fmt::Display for PluginInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the token.
        write!(
            f,
            "inverter={} hours_to_show={:?} max_axis_power={:?} theme={:?}",
            self.inverter_id.as_deref().unwrap_or("<env>"),
            self.hours_to_show,
            self.max_axis_power,
            self.theme
        )
    }
}

/// The single output object produced by the plugin.
///
/// Generic over the chart and theme documents so this crate stays free of
/// chart-library types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginOutput<C, T> {
    /// Chart configuration document.
    pub chart: C,
    /// Style override document.
    pub theme: T,
}
