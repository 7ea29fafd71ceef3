//! Fetch error types.

use thiserror::Error;

use crate::host::HostResponse;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
///
/// Every variant is fatal for the run: nothing is retried and no partial
/// readings are returned.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The host failed to perform a request.
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),

    /// A response body was not the expected JSON document.
    #[error("Failed to parse response from {url}: {source}")]
    Parse {
        /// URL that produced the body.
        url: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed but is unusable.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// ============================================================================
// Request Error
// ============================================================================

/// Error reported by a host's `fetch_text`.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request never produced a response.
    #[error("Request to {url} failed: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport error message.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("Request to {url} returned HTTP {}", response.status)]
    Status {
        /// Requested URL.
        url: String,
        /// The full response, body included.
        response: HostResponse,
    },

    /// The request options could not be applied.
    #[error("Invalid request options: {0}")]
    InvalidOptions(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// The HTTP client could not be built.
    #[error("HTTP client unavailable: {0}")]
    Client(String),
}

impl RequestError {
    /// Returns the response attached to the error, if the server answered.
    pub fn response(&self) -> Option<&HostResponse> {
        match self {
            Self::Status { response, .. } => Some(response),
            _ => None,
        }
    }
}

// ============================================================================
// Credential Error
// ============================================================================

/// Error type for credential resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Neither the input field nor the environment variable had a value.
    #[error("No {what} provided. Use the input field or the {env_var} environment variable.")]
    Missing {
        /// Human-readable name of the value.
        what: &'static str,
        /// Input field name.
        field: &'static str,
        /// Environment variable fallback.
        env_var: &'static str,
    },
}
