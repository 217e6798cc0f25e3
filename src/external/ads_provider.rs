use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AdAccount, AnalyticsRow, Campaign, CampaignGroup, Creative, DateRange, PivotLevel};

/// Rows per analytics page; also the short-page threshold that signals the
/// last page.
pub const ANALYTICS_PAGE_SIZE: usize = 100;

/// Upper bound on the pagination offset, in case the upstream keeps handing
/// back full pages forever.
pub const ANALYTICS_MAX_OFFSET: usize = 1000;

#[derive(Debug, Error)]
pub enum AdsProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,
}

/// Read-only boundary to the ads reporting service. Every call takes the
/// caller's bearer token; this layer never obtains or refreshes credentials.
#[async_trait]
pub trait AdsProvider: Send + Sync {
    /// One page of analytics rows pivoted at `pivot`, filtered to `ids`,
    /// starting at row offset `start`. A page shorter than
    /// [`ANALYTICS_PAGE_SIZE`] is the last one.
    async fn fetch_analytics_page(
        &self,
        token: &str,
        pivot: PivotLevel,
        ids: &[String],
        range: DateRange,
        start: usize,
    ) -> Result<Vec<AnalyticsRow>, AdsProviderError>;

    async fn list_accounts(&self, token: &str) -> Result<Vec<AdAccount>, AdsProviderError>;

    /// Campaign-group ids active for `account_id` within `range`, discovered
    /// via an analytics pivot (the groups finder itself is not searchable by
    /// account on all API versions).
    async fn list_campaign_group_ids(
        &self,
        token: &str,
        account_id: &str,
        range: DateRange,
    ) -> Result<Vec<String>, AdsProviderError>;

    async fn get_campaign_group(
        &self,
        token: &str,
        group_id: &str,
    ) -> Result<Option<CampaignGroup>, AdsProviderError>;

    async fn list_campaigns(
        &self,
        token: &str,
        account_id: &str,
    ) -> Result<Vec<Campaign>, AdsProviderError>;

    async fn list_creatives(
        &self,
        token: &str,
        campaign_id: &str,
    ) -> Result<Vec<Creative>, AdsProviderError>;
}
