//! Plugin error types.

use givenergy_chart::ChartError;
use givenergy_fetch::{CredentialError, FetchError};
use thiserror::Error;

/// Any failure of a plugin run. No variant carries a partial chart.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The input JSON did not match the input object.
    #[error("Failed to deserialize input.")]
    Input(#[source] serde_json::Error),

    /// The output could not be serialized.
    #[error("Failed to serialize output.")]
    Output(#[source] serde_json::Error),

    /// Token or inverter id missing.
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// Fetching the readings failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Building the chart failed.
    #[error(transparent)]
    Chart(#[from] ChartError),
}

impl PluginError {
    /// Returns true if the run failed before any request was made.
    pub fn is_before_network(&self) -> bool {
        matches!(
            self,
            Self::Input(_) | Self::Credentials(_) | Self::Fetch(FetchError::InvalidConfig(_))
        )
    }
}
