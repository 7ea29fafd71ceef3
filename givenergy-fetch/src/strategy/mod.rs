//! Pagination strategy trait and types.
//!
//! A strategy is one way of collecting every page of a single day. The two
//! implementations are interchangeable and must return identical readings
//! for identical upstream pages:
//!
//! - [`ParallelPages`] - reads `meta.last_page` from page 1, fans out the rest
//! - [`CursorPages`] - follows `links.next` one page at a time

mod cursor;
mod parallel;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use givenergy_core::{PageResponse, Reading};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::context::FetchContext;
use crate::error::FetchError;
use crate::host::RequestOptions;

pub use cursor::CursorPages;
pub use parallel::ParallelPages;

// ============================================================================
// Pagination Mode
// ============================================================================

/// Which pagination strategy a deployment uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationMode {
    /// Page-count pagination with concurrent page and day fetches.
    #[default]
    Parallel,
    /// Cursor pagination, strictly sequential.
    Cursor,
}

impl PaginationMode {
    /// Returns all modes.
    pub fn all() -> &'static [PaginationMode] {
        &[Self::Parallel, Self::Cursor]
    }

    /// Returns the name used in settings and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Parallel => "parallel",
            Self::Cursor => "cursor",
        }
    }

    /// Creates the strategy for this mode.
    pub fn strategy(&self) -> Box<dyn PageStrategy> {
        match self {
            Self::Parallel => Box::new(ParallelPages::new()),
            Self::Cursor => Box::new(CursorPages::new()),
        }
    }
}

impl fmt::Display for PaginationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PaginationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown pagination mode: {s} (expected parallel or cursor)"))
    }
}

// ============================================================================
// Day Query
// ============================================================================

/// Everything a strategy needs to fetch one day.
#[derive(Debug, Clone, Copy)]
pub struct DayQuery<'a> {
    /// Inverter serial number.
    pub inverter_id: &'a str,
    /// Calendar day to fetch.
    pub day: NaiveDate,
    /// Request options shared by every call of the run.
    pub options: &'a RequestOptions,
}

impl DayQuery<'_> {
    /// URL of page 1 for this day.
    pub fn first_page_url(&self, ctx: &FetchContext) -> String {
        ctx.settings.day_url(self.inverter_id, self.day, 1)
    }
}

// ============================================================================
// Page Strategy Trait
// ============================================================================

/// A way of fetching all pages of one day.
///
/// ## Implementing a Strategy
///
/// ```ignore
/// struct SinglePage;
///
/// #[async_trait]
/// impl PageStrategy for SinglePage {
///     fn id(&self) -> &str {
///         "pages.single"
///     }
///
///     fn mode(&self) -> PaginationMode {
///         PaginationMode::Cursor
///     }
///
///     async fn fetch_day(&self, ctx: &FetchContext, query: &DayQuery<'_>)
///         -> Result<Vec<Reading>, FetchError> {
///         let page = fetch_page(ctx, &query.first_page_url(ctx), query.options).await?;
///         Ok(page.data)
///     }
/// }
/// ```
#[async_trait]
pub trait PageStrategy: Send + Sync {
    /// Unique identifier for this strategy (e.g., "pages.parallel").
    fn id(&self) -> &str;

    /// The mode this strategy implements.
    fn mode(&self) -> PaginationMode;

    /// Whether yesterday and today may be fetched concurrently.
    fn concurrent_days(&self) -> bool {
        false
    }

    /// Fetches every reading of one day, in page order.
    async fn fetch_day(
        &self,
        ctx: &FetchContext,
        query: &DayQuery<'_>,
    ) -> Result<Vec<Reading>, FetchError>;
}

// ============================================================================
// Page Fetch
// ============================================================================

/// Fetches and parses one page.
///
/// The URL is written to the host log before the request is made.
pub async fn fetch_page(
    ctx: &FetchContext,
    url: &str,
    options: &RequestOptions,
) -> Result<PageResponse, FetchError> {
    ctx.host.log_info(&format!("Calling: {url}"));

    let response = ctx.host.fetch_text(url, options).await?;
    let page: PageResponse = serde_json::from_str(&response.body).map_err(|e| {
        warn!(url = %url, error = %e, "Failed to parse page");
        FetchError::Parse {
            url: url.to_string(),
            source: e,
        }
    })?;

    debug!(url = %url, readings = page.data.len(), "Page received");
    Ok(page)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page_json, MockHost};
    use std::sync::Arc;

    #[test]
    fn test_mode_names() {
        assert_eq!(PaginationMode::default(), PaginationMode::Parallel);
        assert_eq!("cursor".parse::<PaginationMode>().unwrap(), PaginationMode::Cursor);
        assert_eq!("PARALLEL".parse::<PaginationMode>().unwrap(), PaginationMode::Parallel);
        assert!("pages".parse::<PaginationMode>().is_err());
        assert_eq!(PaginationMode::Cursor.to_string(), "cursor");
    }

    #[test]
    fn test_mode_builds_matching_strategy() {
        for mode in PaginationMode::all() {
            assert_eq!(mode.strategy().mode(), *mode);
        }
        assert!(PaginationMode::Parallel.strategy().concurrent_days());
        assert!(!PaginationMode::Cursor.strategy().concurrent_days());
    }

    #[tokio::test]
    async fn test_fetch_page_logs_url() {
        let host = Arc::new(MockHost::new().with_page(
            "http://h/p?page=1",
            page_json(&["2024-05-01T00:00:00Z"], None, None),
        ));
        let ctx = FetchContext::new(host.clone());
        let options = RequestOptions::bearer_json("t");

        let page = fetch_page(&ctx, "http://h/p?page=1", &options).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(host.logs(), vec!["Calling: http://h/p?page=1".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_non_json() {
        let host = Arc::new(MockHost::new().with_page("http://h/p", "<html>oops</html>"));
        let ctx = FetchContext::new(host);
        let options = RequestOptions::bearer_json("t");

        let err = fetch_page(&ctx, "http://h/p", &options).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { ref url, .. } if url == "http://h/p"));
    }

    #[tokio::test]
    async fn test_fetch_page_propagates_host_error() {
        let host = Arc::new(MockHost::new());
        let ctx = FetchContext::new(host);
        let options = RequestOptions::bearer_json("t");

        let err = fetch_page(&ctx, "http://h/missing", &options).await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }
}
