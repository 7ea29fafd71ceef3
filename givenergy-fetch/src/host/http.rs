//! HTTP host with tracing and domain allowlist.
//!
//! This module provides the production [`HostApi`] implementation:
//! - Requests through a shared `reqwest` client
//! - Domain allowlist for security
//! - Process environment for `env`
//! - `tracing` as the log sink

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::{debug, info, instrument};
use url::Url;

use super::{HostApi, HostResponse, RequestOptions};
use crate::error::RequestError;

/// User agent string for the plugin.
const USER_AGENT: &str = concat!("givenergy-chart/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Host
// ============================================================================

/// Host backed by `reqwest`, the process environment and `tracing`.
#[derive(Debug, Clone)]
pub struct HttpHost {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpHost {
    /// Creates a host with no client-level timeout.
    pub fn new() -> Result<Self, RequestError> {
        Self::with_timeout(None)
    }

    /// Creates a host with an optional client-level timeout.
    ///
    /// A request's own `timeout_ms` takes precedence.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, RequestError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RequestError::Client(e.to_string()))?;

        Ok(Self {
            inner: client,
            allowed_domains: None,
        })
    }

    /// Restricts requests to the given domains and their subdomains.
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &str) -> Result<(), RequestError> {
        let Some(ref allowed) = self.allowed_domains else {
            return Ok(()); // No restrictions
        };

        let parsed = Url::parse(url).map_err(|e| RequestError::InvalidUrl(e.to_string()))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| RequestError::InvalidUrl("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(RequestError::DomainNotAllowed(host.to_string()))
        }
    }
}

#[async_trait]
impl HostApi for HttpHost {
    #[instrument(skip(self, options), fields(url = %url, method = %options.method()))]
    async fn fetch_text(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<HostResponse, RequestError> {
        self.is_domain_allowed(url)?;

        let method = Method::from_bytes(options.method().as_bytes())
            .map_err(|e| RequestError::InvalidOptions(e.to_string()))?;

        let mut request = self.inner.request(method, url);
        for (name, value) in options.headers.iter().flatten() {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(ref body) = options.body {
            request = request.body(body.clone());
        }
        if let Some(timeout_ms) = options.timeout_ms {
            request = request.timeout(Duration::from_millis(u64::from(timeout_ms)));
        }

        let transport = |e: reqwest::Error| RequestError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        debug!(status = %status, "Response received");

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(transport)?;

        let response = HostResponse {
            status: status.as_u16(),
            headers,
            body,
        };

        if response.is_success() {
            Ok(response)
        } else {
            Err(RequestError::Status {
                url: url.to_string(),
                response,
            })
        }
    }

    fn env(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn log_info(&self, message: &str) {
        info!("{message}");
    }
}

// ============================================================================
// Tests
// ============================================================================
