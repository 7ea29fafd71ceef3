//! The plugin run: credentials, two-day fetch, chart.
//!
//! # Example
//!
//! ```ignore
//! let plugin = ChartPlugin::new(FetchContext::builder().build()?);
//! let output = plugin.run_json(r#"{"hours_to_show": 24}"#).await?;
//! ```

use chrono::{DateTime, Utc};
use givenergy_chart::{retain_recent, ChartBuilder, ChartDocument, Theme};
use givenergy_core::{PluginInput, PluginOutput};
use givenergy_fetch::{Credentials, DayRange, DayRangeFetcher, FetchContext};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::error::PluginError;

/// Output of a run: the chart plus the resolved theme overrides.
pub type ChartOutput = PluginOutput<ChartDocument, Value>;

// ============================================================================
// Plugin
// ============================================================================

/// Runs the chart plugin against a fetch context.
#[derive(Debug)]
pub struct ChartPlugin {
    ctx: FetchContext,
}

impl ChartPlugin {
    /// Creates a plugin over the given context.
    pub fn new(ctx: FetchContext) -> Self {
        Self { ctx }
    }

    /// Runs with the current wall-clock time.
    pub async fn run(&self, input: &PluginInput) -> Result<ChartOutput, PluginError> {
        self.run_at(input, Utc::now()).await
    }

    /// Runs as if the current instant were `now`.
    ///
    /// `now` selects the two fetched days and anchors the `hours_to_show`
    /// window. Credentials are resolved before any request is made.
    #[instrument(skip(self, input), fields(pagination = %self.ctx.settings.pagination))]
    pub async fn run_at(
        &self,
        input: &PluginInput,
        now: DateTime<Utc>,
    ) -> Result<ChartOutput, PluginError> {
        let creds = Credentials::resolve(
            input.api_token.as_deref(),
            input.inverter_id.as_deref(),
            self.ctx.host.as_ref(),
        )?;

        let zone = self.ctx.zone()?;
        let range = DayRange::ending_at(now, zone)?;
        let host = self.ctx.host.as_ref();
        host.log_info(&format!("Timezone: {zone}"));
        host.log_info(&format!("Today: {}", range.today));
        host.log_info(&format!("Yesterday: {}", range.yesterday));

        let outcome = DayRangeFetcher::for_mode(self.ctx.settings.pagination)
            .fetch(&self.ctx, creds.inverter_id(), range, &creds.request_options())
            .await?;

        let mut readings = outcome.readings;
        if let Some(hours) = input.hours_window() {
            readings = retain_recent(readings, hours, now)?;
            host.log_info(&format!("Filtered to {} data points.", readings.len()));
        }

        let chart = ChartBuilder::new()
            .max_axis_power(input.power_limit())
            .build(&readings)?;
        let theme = Theme::from_name(input.theme.as_deref());

        info!(
            readings = readings.len(),
            fetch = ?outcome.duration,
            theme = %theme,
            "Chart built"
        );

        Ok(PluginOutput {
            chart,
            theme: theme.overrides(),
        })
    }

    /// String entry point: input JSON in, output JSON out.
    pub async fn run_json(&self, input: &str) -> Result<String, PluginError> {
        self.run_json_at(input, Utc::now()).await
    }

    /// [`run_json`](Self::run_json) with a fixed `now`.
    pub async fn run_json_at(
        &self,
        input: &str,
        now: DateTime<Utc>,
    ) -> Result<String, PluginError> {
        let input: PluginInput = serde_json::from_str(input).map_err(PluginError::Input)?;
        debug!(%input, "Parsed input");

        let output = self.run_at(&input, now).await?;
        serde_json::to_string(&output).map_err(PluginError::Output)
    }
}
