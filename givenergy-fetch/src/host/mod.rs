//! Host APIs for the plugin.
//!
//! The plugin never touches the network, the process environment or a log
//! sink directly. Everything goes through [`HostApi`], which a runtime
//! supplies:
//!
//! - [`http`] - Production host over `reqwest` with an optional domain allowlist

pub mod http;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RequestError;

// Re-export key types
pub use http::HttpHost;

// ============================================================================
// Host API Trait
// ============================================================================

/// Capabilities the runtime injects into the plugin.
///
/// ## Implementing a Host
///
/// ```ignore
/// struct RecordingHost { /* ... */ }
///
/// #[async_trait]
/// impl HostApi for RecordingHost {
///     async fn fetch_text(&self, url: &str, options: &RequestOptions)
///         -> Result<HostResponse, RequestError> {
///         // Serve canned pages
///     }
///
///     fn env(&self, name: &str) -> Option<String> {
///         self.vars.get(name).cloned()
///     }
///
///     fn log_info(&self, message: &str) {
///         self.lines.lock().unwrap().push(message.to_string());
///     }
/// }
/// ```
#[async_trait]
pub trait HostApi: Send + Sync {
    /// Performs a request and returns the body as text.
    ///
    /// A non-success status is reported as [`RequestError::Status`].
    async fn fetch_text(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<HostResponse, RequestError>;

    /// Reads an environment variable.
    fn env(&self, name: &str) -> Option<String>;

    /// Writes an informational line to the host log.
    fn log_info(&self, message: &str);
}

// ============================================================================
// Request Options
// ============================================================================

/// Options passed with every request.
///
/// Built once per run and shared read-only by every page fetch.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// HTTP method; `GET` when absent.
    pub method: Option<String>,
    /// Request headers in order.
    pub headers: Option<Vec<(String, String)>>,
    /// Request body.
    pub body: Option<String>,
    /// Per-request timeout; the host default applies when absent.
    pub timeout_ms: Option<u32>,
}

impl RequestOptions {
    /// Bearer-authenticated JSON `GET` with no body and no timeout.
    pub fn bearer_json(token: &str) -> Self {
        Self {
            method: Some("GET".to_string()),
            headers: Some(vec![
                ("Authorization".to_string(), format!("Bearer {token}")),
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ]),
            body: None,
            timeout_ms: None,
        }
    }

    /// Returns the method, defaulting to `GET`.
    pub fn method(&self) -> &str {
        self.method.as_deref().unwrap_or("GET")
    }

    /// Looks up a header value (case-insensitive name).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()?
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Option<Vec<(&str, &str)>> = self.headers.as_ref().map(|headers| {
            headers
                .iter()
                .map(|(key, value)| {
                    if key.eq_ignore_ascii_case("authorization") {
                        (key.as_str(), "<redacted>")
                    } else {
                        (key.as_str(), value.as_str())
                    }
                })
                .collect()
        });

        f.debug_struct("RequestOptions")
            .field("method", &self.method)
            .field("headers", &headers)
            .field("body", &self.body)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

// ============================================================================
// Host Response
// ============================================================================

/// A completed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: String,
}

impl HostResponse {
    /// A `200 OK` response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ============================================================================
// Tests
// ============================================================================
