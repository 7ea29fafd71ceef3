//! Fetch context providing access to the host and settings.
//!
//! The fetch context is passed to every strategy and gives unified access
//! to the injected host plus the deployment settings.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::{format_day, ActiveZone};
use crate::error::FetchError;
use crate::host::{HostApi, HttpHost};
use crate::strategy::PaginationMode;

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.givenergy.cloud";

/// Environment variable naming the active time zone.
pub const TZ_ENV: &str = "TZ";

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for fetch operations, fixed per deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    /// API base URL without a trailing slash.
    pub api_base: String,
    /// Pagination strategy.
    pub pagination: PaginationMode,
    /// Explicit zone; `TZ` from the host is consulted when absent.
    pub zone: Option<ActiveZone>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            pagination: PaginationMode::default(),
            zone: None,
        }
    }
}

impl FetchSettings {
    /// Creates settings with a custom API base.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Creates settings with a pagination strategy.
    pub fn with_pagination(mut self, pagination: PaginationMode) -> Self {
        self.pagination = pagination;
        self
    }

    /// Creates settings with an explicit zone.
    pub fn with_zone(mut self, zone: ActiveZone) -> Self {
        self.zone = Some(zone);
        self
    }

    /// URL of one page of a day's data points.
    pub fn day_url(&self, inverter_id: &str, day: NaiveDate, page: u32) -> String {
        format!(
            "{}/v1/inverter/{}/data-points/{}?page={}",
            self.api_base,
            inverter_id,
            format_day(day),
            page
        )
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context provided to fetch strategies.
pub struct FetchContext {
    /// Injected host capabilities.
    pub host: Arc<dyn HostApi>,
    /// Fetch settings.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a context over the given host with default settings.
    pub fn new(host: Arc<dyn HostApi>) -> Self {
        Self {
            host,
            settings: FetchSettings::default(),
        }
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Resolves the zone: explicit setting, then the host's `TZ`, then local.
    pub fn zone(&self) -> Result<ActiveZone, FetchError> {
        if let Some(zone) = self.settings.zone {
            return Ok(zone);
        }
        match self.host.env(TZ_ENV) {
            Some(name) => {
                let zone = ActiveZone::parse(&name)?;
                debug!(zone = %zone, "Using zone from TZ");
                Ok(zone)
            }
            None => Ok(ActiveZone::Local),
        }
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a `FetchContext`.
#[derive(Default)]
pub struct FetchContextBuilder {
    host: Option<Arc<dyn HostApi>>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host implementation.
    pub fn host(mut self, host: Arc<dyn HostApi>) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the fetch settings.
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the API base URL.
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.settings = self.settings.with_api_base(api_base);
        self
    }

    /// Sets the pagination strategy.
    pub fn pagination(mut self, pagination: PaginationMode) -> Self {
        self.settings.pagination = pagination;
        self
    }

    /// Sets an explicit zone.
    pub fn zone(mut self, zone: ActiveZone) -> Self {
        self.settings.zone = Some(zone);
        self
    }

    /// Builds the fetch context, defaulting to an [`HttpHost`].
    pub fn build(self) -> Result<FetchContext, FetchError> {
        let host: Arc<dyn HostApi> = match self.host {
            Some(host) => host,
            None => Arc::new(HttpHost::new()?),
        };
        Ok(FetchContext {
            host,
            settings: self.settings,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
