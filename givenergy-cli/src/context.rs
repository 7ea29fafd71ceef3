//! Fetch context from command-line flags.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use givenergy_fetch::{
    context::DEFAULT_API_BASE, ActiveZone, FetchContext, FetchSettings, HttpHost, PaginationMode,
};
use tracing::debug;

/// Deployment settings for the HTTP host and fetcher.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Pagination strategy.
    #[arg(long, default_value = "parallel")]
    pub pagination: PaginationMode,

    /// IANA time zone deciding "today" (defaults to `TZ`, then local time).
    #[arg(long)]
    pub tz: Option<String>,

    /// API base URL.
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Only allow requests to these domains (repeatable).
    #[arg(long = "allow-domain", value_name = "DOMAIN")]
    pub allow_domains: Vec<String>,

    /// Client-level request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Default for ConnectionArgs {
    fn default() -> Self {
        Self {
            pagination: PaginationMode::default(),
            tz: None,
            api_base: DEFAULT_API_BASE.to_string(),
            allow_domains: Vec::new(),
            timeout_secs: None,
        }
    }
}

/// Builds the fetch context over a real HTTP host.
pub fn build_context(args: &ConnectionArgs) -> Result<FetchContext> {
    let mut host = HttpHost::with_timeout(args.timeout_secs.map(Duration::from_secs))?;
    if !args.allow_domains.is_empty() {
        host = host.with_allowed_domains(args.allow_domains.clone());
    }

    let mut settings = FetchSettings::default()
        .with_api_base(&args.api_base)
        .with_pagination(args.pagination);
    if let Some(tz) = &args.tz {
        settings = settings.with_zone(ActiveZone::parse(tz)?);
    }

    debug!(?settings, "Fetch settings");

    Ok(FetchContext::builder()
        .host(Arc::new(host))
        .settings(settings)
        .build()?)
}
