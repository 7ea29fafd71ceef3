//! Chart error types.

use givenergy_core::CoreError;
use thiserror::Error;

/// Errors that can occur while turning readings into a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A reading could not be interpreted.
    #[error(transparent)]
    Reading(#[from] CoreError),
}
