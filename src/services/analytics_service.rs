use chrono::Utc;
use futures::future::join_all;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::external::ads_provider::{AdsProvider, ANALYTICS_MAX_OFFSET, ANALYTICS_PAGE_SIZE};
use crate::models::{
    AnalyticsRequest, AnalyticsResponse, AnalyticsRow, DateRange, PeriodData, PivotLevel,
};
use crate::services::aggregation::{aggregate_rows, top_performers, DEFAULT_TOP_N};
use crate::services::metrics::derive_metrics;
use crate::services::pacing::budget_pacing;
use crate::services::selection::resolve_pivot;

/// Runs the whole aggregation pipeline for one dashboard request: resolve the
/// pivot, fetch both periods, reduce, derive, rank, pace.
pub async fn get_analytics(
    provider: &dyn AdsProvider,
    token: &str,
    request: AnalyticsRequest,
) -> Result<AnalyticsResponse, AppError> {
    if !request.current_range.is_valid() || !request.previous_range.is_valid() {
        return Err(AppError::Validation("date range start must not be after end".into()));
    }

    let (pivot, filter_ids) = resolve_pivot(&request.selection)
        .ok_or_else(|| AppError::Validation("entity selection is empty".into()))?;

    info!(
        "Analytics request - pivot: {}, entities: {}",
        pivot.pivot_name(),
        filter_ids.len()
    );

    // The two periods share no state; fetch them concurrently.
    let (current_data, previous_data) = tokio::join!(
        fetch_period(provider, token, pivot, filter_ids, request.current_range),
        fetch_period(provider, token, pivot, filter_ids, request.previous_range),
    );

    let current = derive_metrics(&current_data.totals);
    let previous = derive_metrics(&previous_data.totals);
    let top = top_performers(&current_data.breakdown, DEFAULT_TOP_N);
    let pacing = budget_pacing(
        &current_data.totals,
        request.current_range,
        request.budget,
        Utc::now().date_naive(),
    );

    Ok(AnalyticsResponse {
        current,
        previous,
        top_performers: top,
        budget_pacing: pacing,
    })
}

/// Collects and reduces one period. Account-pivoted requests fan out one
/// fetch per account into per-account partials merged afterwards; a single
/// shared accumulator would race. Narrower pivots filter by the whole id
/// list in one query, the way the finder expects them.
pub async fn fetch_period(
    provider: &dyn AdsProvider,
    token: &str,
    pivot: PivotLevel,
    filter_ids: &[String],
    range: DateRange,
) -> PeriodData {
    if pivot == PivotLevel::Account {
        let fetches = filter_ids.iter().map(|id| {
            let ids = std::slice::from_ref(id);
            async move {
                let rows = fetch_all_pages(provider, token, pivot, ids, range).await;
                aggregate_rows(&rows)
            }
        });

        let mut period = PeriodData::default();
        for partial in join_all(fetches).await {
            period.merge(partial);
        }
        period
    } else {
        let rows = fetch_all_pages(provider, token, pivot, filter_ids, range).await;
        aggregate_rows(&rows)
    }
}

/// Pages through the reporting finder until a short page, the offset safety
/// ceiling, or a failed page. A failed page is recoverable: whatever was
/// already collected is returned, because partial analytics beat an error
/// screen on a dashboard.
async fn fetch_all_pages(
    provider: &dyn AdsProvider,
    token: &str,
    pivot: PivotLevel,
    ids: &[String],
    range: DateRange,
) -> Vec<AnalyticsRow> {
    let mut rows = Vec::new();
    let mut start = 0;

    loop {
        match provider.fetch_analytics_page(token, pivot, ids, range, start).await {
            Ok(page) => {
                let last_page = page.len() < ANALYTICS_PAGE_SIZE;
                rows.extend(page);

                if last_page {
                    break;
                }

                start += ANALYTICS_PAGE_SIZE;
                if start >= ANALYTICS_MAX_OFFSET {
                    warn!(
                        "Analytics pagination hit offset ceiling ({}) for pivot {}",
                        ANALYTICS_MAX_OFFSET,
                        pivot.pivot_name()
                    );
                    break;
                }
            }
            Err(e) => {
                warn!(
                    "Analytics page failed at offset {} for pivot {}: {}. Returning {} rows collected so far",
                    start,
                    pivot.pivot_name(),
                    e,
                    rows.len()
                );
                break;
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::external::ads_provider::AdsProviderError;
    use crate::models::{AdAccount, Campaign, CampaignGroup, Creative, EntitySelection};

    fn range() -> DateRange {
        DateRange {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        }
    }

    fn row(urn: &str, impressions: i64, clicks: i64, cost: f64) -> AnalyticsRow {
        AnalyticsRow {
            pivot_urn: Some(urn.to_string()),
            impressions,
            clicks,
            cost,
            ..Default::default()
        }
    }

    /// Serves scripted pages keyed by (first filter id, offset); a missing
    /// script entry fails the page.
    struct ScriptedProvider {
        pages: Mutex<HashMap<(String, usize), Vec<AnalyticsRow>>>,
    }

    impl ScriptedProvider {
        fn new(pages: HashMap<(String, usize), Vec<AnalyticsRow>>) -> Self {
            Self { pages: Mutex::new(pages) }
        }
    }

    #[async_trait]
    impl AdsProvider for ScriptedProvider {
        async fn fetch_analytics_page(
            &self,
            _token: &str,
            _pivot: PivotLevel,
            ids: &[String],
            _range: DateRange,
            start: usize,
        ) -> Result<Vec<AnalyticsRow>, AdsProviderError> {
            let key = (ids[0].clone(), start);
            self.pages
                .lock()
                .unwrap()
                .get(&key)
                .cloned()
                .ok_or_else(|| AdsProviderError::BadResponse("scripted failure".into()))
        }

        async fn list_accounts(&self, _token: &str) -> Result<Vec<AdAccount>, AdsProviderError> {
            unimplemented!()
        }

        async fn list_campaign_group_ids(
            &self,
            _token: &str,
            _account_id: &str,
            _range: DateRange,
        ) -> Result<Vec<String>, AdsProviderError> {
            unimplemented!()
        }

        async fn get_campaign_group(
            &self,
            _token: &str,
            _group_id: &str,
        ) -> Result<Option<CampaignGroup>, AdsProviderError> {
            unimplemented!()
        }

        async fn list_campaigns(
            &self,
            _token: &str,
            _account_id: &str,
        ) -> Result<Vec<Campaign>, AdsProviderError> {
            unimplemented!()
        }

        async fn list_creatives(
            &self,
            _token: &str,
            _campaign_id: &str,
        ) -> Result<Vec<Creative>, AdsProviderError> {
            unimplemented!()
        }
    }

    fn full_page(start: i64) -> Vec<AnalyticsRow> {
        (0..ANALYTICS_PAGE_SIZE as i64)
            .map(|i| row(&format!("urn:li:sponsoredCampaign:{}", start + i), 10, 1, 0.5))
            .collect()
    }

    #[tokio::test]
    async fn failed_page_returns_rows_collected_so_far() {
        let mut pages = HashMap::new();
        pages.insert(("c1".to_string(), 0), full_page(0));
        // offset 100 has no entry -> scripted failure
        let provider = ScriptedProvider::new(pages);

        let ids = vec!["c1".to_string()];
        let period = fetch_period(&provider, "tok", PivotLevel::Campaign, &ids, range()).await;

        assert_eq!(period.totals.impressions, 1000);
        assert_eq!(period.totals.clicks, 100);
    }

    #[tokio::test]
    async fn short_page_ends_pagination() {
        let mut pages = HashMap::new();
        pages.insert(("c1".to_string(), 0), full_page(0));
        pages.insert(
            ("c1".to_string(), 100),
            vec![row("urn:li:sponsoredCampaign:900", 5, 1, 1.0)],
        );
        let provider = ScriptedProvider::new(pages);

        let ids = vec!["c1".to_string()];
        let period = fetch_period(&provider, "tok", PivotLevel::Campaign, &ids, range()).await;

        assert_eq!(period.totals.impressions, 1005);
    }

    #[tokio::test]
    async fn offset_ceiling_bounds_runaway_pagination() {
        let mut pages = HashMap::new();
        for start in (0..ANALYTICS_MAX_OFFSET).step_by(ANALYTICS_PAGE_SIZE) {
            pages.insert(("c1".to_string(), start), full_page(start as i64));
        }
        // An unbounded upstream would also have a page here, but the loop
        // must never request it.
        pages.insert(("c1".to_string(), ANALYTICS_MAX_OFFSET), full_page(0));
        let provider = ScriptedProvider::new(pages);

        let ids = vec!["c1".to_string()];
        let period = fetch_period(&provider, "tok", PivotLevel::Campaign, &ids, range()).await;

        assert_eq!(period.totals.impressions, (ANALYTICS_MAX_OFFSET as i64) * 10);
    }

    #[tokio::test]
    async fn account_pivot_merges_per_account_partials() {
        let mut pages = HashMap::new();
        pages.insert(
            ("a1".to_string(), 0),
            vec![row("urn:li:sponsoredCampaign:111", 1000, 20, 50.0)],
        );
        pages.insert(
            ("a2".to_string(), 0),
            vec![row("urn:li:sponsoredCampaign:222", 2000, 10, 30.0)],
        );
        let provider = ScriptedProvider::new(pages);

        let ids = vec!["a1".to_string(), "a2".to_string()];
        let period = fetch_period(&provider, "tok", PivotLevel::Account, &ids, range()).await;

        assert_eq!(period.totals.impressions, 3000);
        assert_eq!(period.totals.clicks, 30);
        assert!((period.totals.spend - 80.0).abs() < 1e-9);
        assert_eq!(period.breakdown.len(), 2);
    }

    #[tokio::test]
    async fn end_to_end_scenario_matches_expected_metrics() {
        let mut pages = HashMap::new();
        pages.insert(
            ("a1".to_string(), 0),
            vec![
                row("urn:li:sponsoredCampaign:111", 1000, 20, 50.0),
                row("urn:li:sponsoredCampaign:222", 2000, 10, 30.0),
            ],
        );
        let provider = ScriptedProvider::new(pages);

        let request = AnalyticsRequest {
            selection: EntitySelection {
                account_ids: vec!["a1".to_string()],
                ..Default::default()
            },
            current_range: range(),
            previous_range: range(),
            budget: None,
        };

        let response = get_analytics(&provider, "tok", request).await.unwrap();

        assert_eq!(response.current.impressions, 3000);
        assert_eq!(response.current.clicks, 30);
        assert!((response.current.spent - 80.0).abs() < 1e-9);
        assert!((response.current.ctr - 1.0).abs() < 1e-9);
        assert!((response.current.cpm - 26.666666666666668).abs() < 1e-6);
        assert!((response.current.cpc - 80.0 / 30.0).abs() < 1e-9);
        assert_eq!(response.top_performers[0].id, "222");
        assert_eq!(response.top_performers[0].impressions, 2000);
        assert_eq!(response.budget_pacing.days_total, 31);
    }

    #[tokio::test]
    async fn empty_selection_is_rejected_before_any_fetch() {
        let provider = ScriptedProvider::new(HashMap::new());

        let request = AnalyticsRequest {
            selection: EntitySelection::default(),
            current_range: range(),
            previous_range: range(),
            budget: None,
        };

        let err = get_analytics(&provider, "tok", request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let provider = ScriptedProvider::new(HashMap::new());

        let request = AnalyticsRequest {
            selection: EntitySelection {
                account_ids: vec!["a1".to_string()],
                ..Default::default()
            },
            current_range: DateRange { start: range().end, end: range().start },
            previous_range: range(),
            budget: None,
        };

        let err = get_analytics(&provider, "tok", request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
