//! Two-day fetch pipeline.
//!
//! The pipeline runs one [`PageStrategy`] over yesterday and today and
//! concatenates the results yesterday-first. Whether the two days run
//! concurrently is up to the strategy; the order of the output never is.

use std::time::{Duration, Instant};

use givenergy_core::Reading;
use tracing::{info, instrument};

use crate::calendar::DayRange;
use crate::context::FetchContext;
use crate::error::FetchError;
use crate::host::RequestOptions;
use crate::strategy::{DayQuery, PageStrategy, PaginationMode};

// ============================================================================
// Range Outcome
// ============================================================================

/// The merged readings of a two-day fetch.
#[derive(Debug, Clone)]
pub struct RangeOutcome {
    /// Yesterday's readings followed by today's.
    pub readings: Vec<Reading>,
    /// Number of readings per day, yesterday first.
    pub per_day: [usize; 2],
    /// Wall time of the whole fetch.
    pub duration: Duration,
}

// ============================================================================
// Day Range Fetcher
// ============================================================================

/// Fetches every reading of a [`DayRange`] with one strategy.
pub struct DayRangeFetcher {
    strategy: Box<dyn PageStrategy>,
}

impl DayRangeFetcher {
    /// Creates a fetcher over the given strategy.
    pub fn new(strategy: Box<dyn PageStrategy>) -> Self {
        Self { strategy }
    }

    /// Creates a fetcher for a pagination mode.
    pub fn for_mode(mode: PaginationMode) -> Self {
        Self::new(mode.strategy())
    }

    /// Fetches both days and merges them yesterday-first.
    ///
    /// Any failure aborts the whole range; nothing partial is returned.
    #[instrument(skip(self, ctx, options), fields(strategy = self.strategy.id()))]
    pub async fn fetch(
        &self,
        ctx: &FetchContext,
        inverter_id: &str,
        range: DayRange,
        options: &RequestOptions,
    ) -> Result<RangeOutcome, FetchError> {
        let start = Instant::now();

        let yesterday = DayQuery {
            inverter_id,
            day: range.yesterday,
            options,
        };
        let today = DayQuery {
            inverter_id,
            day: range.today,
            options,
        };

        let (yesterday_data, today_data) = if self.strategy.concurrent_days() {
            futures::try_join!(
                self.strategy.fetch_day(ctx, &yesterday),
                self.strategy.fetch_day(ctx, &today),
            )?
        } else {
            let first = self.strategy.fetch_day(ctx, &yesterday).await?;
            let second = self.strategy.fetch_day(ctx, &today).await?;
            (first, second)
        };

        let per_day = [yesterday_data.len(), today_data.len()];
        let mut readings = yesterday_data;
        readings.extend(today_data);

        ctx.host.log_info(&format!("Got {} data points.", readings.len()));
        let duration = start.elapsed();
        info!(
            yesterday = per_day[0],
            today = per_day[1],
            ?duration,
            "Fetched day range"
        );

        Ok(RangeOutcome {
            readings,
            per_day,
            duration,
        })
    }
}

impl std::fmt::Debug for DayRangeFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DayRangeFetcher")
            .field("strategy", &self.strategy.id())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page_json, MockHost};
    use chrono::NaiveDate;
    use std::sync::Arc;

    const BASE: &str = "https://api.givenergy.cloud/v1/inverter/CE1/data-points";

    fn range() -> DayRange {
        DayRange {
            yesterday: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            today: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        }
    }

    /// Two single-page days; today's page answers first.
    fn host() -> MockHost {
        MockHost::new()
            .with_delayed_page(
                &format!("{BASE}/2024-05-01?page=1"),
                page_json(
                    &["2024-05-01T23:50:00Z", "2024-05-01T23:55:00Z"],
                    Some((1, &format!("{BASE}/2024-05-01"))),
                    None,
                ),
                Duration::from_millis(40),
            )
            .with_page(
                &format!("{BASE}/2024-05-02?page=1"),
                page_json(
                    &["2024-05-02T00:00:00Z"],
                    Some((1, &format!("{BASE}/2024-05-02"))),
                    None,
                ),
            )
    }

    fn times(outcome: &RangeOutcome) -> Vec<&str> {
        outcome.readings.iter().map(|r| r.time.as_str()).collect()
    }

    #[tokio::test]
    async fn test_parallel_keeps_yesterday_first() {
        let host = Arc::new(host());
        let ctx = FetchContext::new(host.clone());
        let options = RequestOptions::bearer_json("t");

        let outcome = DayRangeFetcher::for_mode(PaginationMode::Parallel)
            .fetch(&ctx, "CE1", range(), &options)
            .await
            .unwrap();

        assert_eq!(
            times(&outcome),
            vec!["2024-05-01T23:50:00Z", "2024-05-01T23:55:00Z", "2024-05-02T00:00:00Z"]
        );
        assert_eq!(outcome.per_day, [2, 1]);
        // Today really did finish first.
        assert_eq!(host.completed()[0], format!("{BASE}/2024-05-02?page=1"));
        assert_eq!(host.logs().last().map(String::as_str), Some("Got 3 data points."));
    }

    #[tokio::test]
    async fn test_cursor_runs_days_sequentially() {
        let host = Arc::new(host());
        let ctx = FetchContext::new(host.clone());
        let options = RequestOptions::bearer_json("t");

        let outcome = DayRangeFetcher::for_mode(PaginationMode::Cursor)
            .fetch(&ctx, "CE1", range(), &options)
            .await
            .unwrap();

        assert_eq!(outcome.readings.len(), 3);
        assert_eq!(outcome.per_day, [2, 1]);
        assert_eq!(host.calls(), host.completed());
        assert_eq!(host.calls()[0], format!("{BASE}/2024-05-01?page=1"));
    }

    #[tokio::test]
    async fn test_strategies_agree_on_range() {
        let options = RequestOptions::bearer_json("t");

        let parallel = DayRangeFetcher::for_mode(PaginationMode::Parallel)
            .fetch(&FetchContext::new(Arc::new(host())), "CE1", range(), &options)
            .await
            .unwrap();
        let cursor = DayRangeFetcher::for_mode(PaginationMode::Cursor)
            .fetch(&FetchContext::new(Arc::new(host())), "CE1", range(), &options)
            .await
            .unwrap();

        assert_eq!(parallel.readings, cursor.readings);
    }

    #[tokio::test]
    async fn test_one_failed_day_fails_range() {
        let host = Arc::new(MockHost::new().with_page(
            &format!("{BASE}/2024-05-01?page=1"),
            page_json(&["2024-05-01T00:00:00Z"], None, None),
        ));
        let ctx = FetchContext::new(host);
        let options = RequestOptions::bearer_json("t");

        let result = DayRangeFetcher::for_mode(PaginationMode::Parallel)
            .fetch(&ctx, "CE1", range(), &options)
            .await;
        assert!(result.is_err());
    }
}
