//! Core error types for the `GivEnergy` crates.

use thiserror::Error;

/// Core error type for model operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A reading carried a timestamp that is not RFC 3339.
    #[error("Invalid reading timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        /// The raw `time` field.
        value: String,
        /// Parser message.
        reason: String,
    },
}
