//! Cursor pagination, one page at a time.

use async_trait::async_trait;
use givenergy_core::Reading;
use tracing::{debug, instrument};

use super::{fetch_page, DayQuery, PageStrategy, PaginationMode};
use crate::context::FetchContext;
use crate::error::FetchError;

/// Follows `links.next` from page 1 until it is absent, null or empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorPages;

impl CursorPages {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PageStrategy for CursorPages {
    fn id(&self) -> &str {
        "pages.cursor"
    }

    fn mode(&self) -> PaginationMode {
        PaginationMode::Cursor
    }

    #[instrument(skip(self, ctx, query), fields(day = %query.day))]
    async fn fetch_day(
        &self,
        ctx: &FetchContext,
        query: &DayQuery<'_>,
    ) -> Result<Vec<Reading>, FetchError> {
        let mut readings = Vec::new();
        let mut pages = 0_u32;
        let mut next = Some(query.first_page_url(ctx));

        while let Some(url) = next.take() {
            let page = fetch_page(ctx, &url, query.options).await?;
            pages += 1;
            next = page.next_link().map(str::to_string);
            readings.extend(page.data);
        }

        debug!(pages, readings = readings.len(), "Cursor exhausted");
        Ok(readings)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RequestOptions;
    use crate::strategy::ParallelPages;
    use crate::testing::{page_json, MockHost};
    use chrono::NaiveDate;
    use std::sync::Arc;

    const PATH: &str = "https://api.givenergy.cloud/v1/inverter/CE1/data-points/2024-05-01";

    fn day_query(options: &RequestOptions) -> DayQuery<'_> {
        DayQuery {
            inverter_id: "CE1",
            day: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            options,
        }
    }

    /// Three pages carrying both pagination schemes at once.
    fn three_pages() -> MockHost {
        let p2 = format!("{PATH}?page=2");
        let p3 = format!("{PATH}?page=3");
        MockHost::new()
            .with_page(
                &format!("{PATH}?page=1"),
                page_json(
                    &["2024-05-01T00:00:00Z", "2024-05-01T00:05:00Z"],
                    Some((3, PATH)),
                    Some(&p2),
                ),
            )
            .with_page(
                &p2,
                page_json(
                    &["2024-05-01T00:10:00Z", "2024-05-01T00:15:00Z"],
                    Some((3, PATH)),
                    Some(&p3),
                ),
            )
            .with_page(&p3, page_json(&["2024-05-01T00:20:00Z"], Some((3, PATH)), None))
    }

    #[tokio::test]
    async fn test_follows_next_links_in_order() {
        let host = Arc::new(three_pages());
        let ctx = FetchContext::new(host.clone());
        let options = RequestOptions::bearer_json("t");
        let query = day_query(&options);

        let readings = CursorPages::new().fetch_day(&ctx, &query).await.unwrap();

        assert_eq!(readings.len(), 5);
        assert_eq!(
            host.calls(),
            vec![
                format!("{PATH}?page=1"),
                format!("{PATH}?page=2"),
                format!("{PATH}?page=3"),
            ]
        );
        assert_eq!(host.logs().len(), 3);
    }

    #[tokio::test]
    async fn test_matches_parallel_strategy() {
        let options = RequestOptions::bearer_json("t");
        let query = day_query(&options);

        let cursor_ctx = FetchContext::new(Arc::new(three_pages()));
        let parallel_ctx = FetchContext::new(Arc::new(three_pages()));

        let cursor = CursorPages::new().fetch_day(&cursor_ctx, &query).await.unwrap();
        let parallel = ParallelPages::new().fetch_day(&parallel_ctx, &query).await.unwrap();

        assert_eq!(cursor, parallel);
    }

    #[tokio::test]
    async fn test_empty_next_stops() {
        let host = Arc::new(MockHost::new().with_page(
            &format!("{PATH}?page=1"),
            r#"{"data":[],"links":{"next":""}}"#,
        ));
        let ctx = FetchContext::new(host.clone());
        let options = RequestOptions::bearer_json("t");
        let query = day_query(&options);

        let readings = CursorPages::new().fetch_day(&ctx, &query).await.unwrap();
        assert!(readings.is_empty());
        assert_eq!(host.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_broken_link_is_fatal() {
        let host = Arc::new(MockHost::new().with_page(
            &format!("{PATH}?page=1"),
            page_json(&["2024-05-01T00:00:00Z"], None, Some("https://api.givenergy.cloud/gone")),
        ));
        let ctx = FetchContext::new(host);
        let options = RequestOptions::bearer_json("t");
        let query = day_query(&options);

        assert!(CursorPages::new().fetch_day(&ctx, &query).await.is_err());
    }
}
