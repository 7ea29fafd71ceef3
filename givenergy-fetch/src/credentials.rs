//! Credential resolution.
//!
//! Token and inverter id come from two sources, in priority order:
//!
//! 1. **Input** - the `api_token` / `inverter_id` fields of the plugin input
//! 2. **Environment** - `GIVENERGY_API_TOKEN` / `GIVENERGY_INVERTER_ID`, read through the host
//!
//! Empty strings count as missing. Resolution happens before any request.

use std::fmt;

use tracing::{debug, instrument};

use crate::error::CredentialError;
use crate::host::{HostApi, RequestOptions};

// ============================================================================
// Constants
// ============================================================================

/// Environment variable for the API token.
pub const API_TOKEN_ENV: &str = "GIVENERGY_API_TOKEN";

/// Environment variable for the inverter id.
pub const INVERTER_ID_ENV: &str = "GIVENERGY_INVERTER_ID";

// ============================================================================
// Credentials
// ============================================================================

/// Resolved API token and inverter id.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_token: String,
    inverter_id: String,
}

impl Credentials {
    /// Creates credentials from known values.
    pub fn new(api_token: impl Into<String>, inverter_id: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            inverter_id: inverter_id.into(),
        }
    }

    /// Resolves both values from input fields with environment fallback.
    ///
    /// The token is resolved first, so a run missing both reports the token.
    #[instrument(skip_all)]
    pub fn resolve<H: HostApi + ?Sized>(
        api_token: Option<&str>,
        inverter_id: Option<&str>,
        host: &H,
    ) -> Result<Self, CredentialError> {
        let api_token = pick(api_token, API_TOKEN_ENV, host).ok_or(CredentialError::Missing {
            what: "API token",
            field: "api_token",
            env_var: API_TOKEN_ENV,
        })?;

        let inverter_id =
            pick(inverter_id, INVERTER_ID_ENV, host).ok_or(CredentialError::Missing {
                what: "inverter ID",
                field: "inverter_id",
                env_var: INVERTER_ID_ENV,
            })?;

        Ok(Self {
            api_token,
            inverter_id,
        })
    }

    /// The inverter id.
    pub fn inverter_id(&self) -> &str {
        &self.inverter_id
    }

    /// Request options shared by every page fetch.
    pub fn request_options(&self) -> RequestOptions {
        RequestOptions::bearer_json(&self.api_token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"<redacted>")
            .field("inverter_id", &self.inverter_id)
            .finish()
    }
}

fn pick<H: HostApi + ?Sized>(input: Option<&str>, env_var: &str, host: &H) -> Option<String> {
    if let Some(value) = input.filter(|v| !v.is_empty()) {
        debug!(source = "input", env_var, "Resolved credential");
        return Some(value.to_string());
    }

    let value = host.env(env_var).filter(|v| !v.is_empty())?;
    debug!(source = "env", env_var, "Resolved credential");
    Some(value)
}

// ============================================================================
// Tests
// ============================================================================
