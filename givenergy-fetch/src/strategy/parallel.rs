//! Page-count pagination with concurrent fan-out.

use async_trait::async_trait;
use futures::stream::{FuturesUnordered, TryStreamExt};
use givenergy_core::{PageResponse, Reading};
use tracing::{debug, instrument};

use super::{fetch_page, DayQuery, PageStrategy, PaginationMode};
use crate::context::FetchContext;
use crate::error::FetchError;

/// Fetches page 1, then pages `2..=last_page` concurrently.
///
/// Page 1 must complete first because it carries `meta.last_page` and
/// `meta.path`. The remaining pages are collected in completion order and
/// sorted by page number before they are appended.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelPages;

impl ParallelPages {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }
}

/// URL of page `page` under the base path from `meta.path`.
///
/// The base path is assumed stable across pages, with only the `page`
/// query differing.
fn page_url(path: &str, page: u32) -> String {
    format!("{path}?page={page}")
}

#[async_trait]
impl PageStrategy for ParallelPages {
    fn id(&self) -> &str {
        "pages.parallel"
    }

    fn mode(&self) -> PaginationMode {
        PaginationMode::Parallel
    }

    fn concurrent_days(&self) -> bool {
        true
    }

    #[instrument(skip(self, ctx, query), fields(day = %query.day))]
    async fn fetch_day(
        &self,
        ctx: &FetchContext,
        query: &DayQuery<'_>,
    ) -> Result<Vec<Reading>, FetchError> {
        let first = fetch_page(ctx, &query.first_page_url(ctx), query.options).await?;

        let last_page = match first.last_page() {
            Some(last) if last > 1 => last,
            _ => {
                debug!(readings = first.data.len(), "Single page");
                return Ok(first.data);
            }
        };

        let path = first
            .meta
            .as_ref()
            .and_then(|meta| meta.path.clone())
            .ok_or_else(|| {
                FetchError::InvalidResponse(format!(
                    "page 1 of {} reports {last_page} pages but no meta.path",
                    query.day
                ))
            })?;

        debug!(last_page, "Fetching remaining pages concurrently");

        let options = query.options;
        let mut rest: Vec<(u32, PageResponse)> = (2..=last_page)
            .map(|page| {
                let url = page_url(&path, page);
                async move {
                    let body = fetch_page(ctx, &url, options).await?;
                    Ok::<_, FetchError>((page, body))
                }
            })
            .collect::<FuturesUnordered<_>>()
            .try_collect()
            .await?;

        // Completion order is arbitrary.
        rest.sort_by_key(|(page, _)| *page);

        let mut readings = first.data;
        for (_, body) in rest {
            readings.extend(body.data);
        }
        Ok(readings)
    }
}

// ============================================================================
// Tests
// ============================================================================
