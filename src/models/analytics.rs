use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::EntitySelection;

/// Inclusive calendar-day range. No time-of-day component anywhere in the
/// reporting contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }
}

/// One normalized row from the reporting API: the pivot URN (absent when the
/// upstream omits it) plus every raw counter we aggregate.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsRow {
    pub pivot_urn: Option<String>,
    pub impressions: i64,
    pub clicks: i64,
    pub cost: f64,
    pub leads: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
    pub follows: i64,
    pub other_engagements: i64,
}

/// Raw counter sums for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub impressions: i64,
    pub clicks: i64,
    pub spend: f64,
    pub leads: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
    pub follows: i64,
    pub other_engagements: i64,
}

impl Totals {
    pub fn add_row(&mut self, row: &AnalyticsRow) {
        self.impressions += row.impressions;
        self.clicks += row.clicks;
        self.spend += row.cost;
        self.leads += row.leads;
        self.likes += row.likes;
        self.comments += row.comments;
        self.shares += row.shares;
        self.follows += row.follows;
        self.other_engagements += row.other_engagements;
    }

    pub fn merge(&mut self, other: &Totals) {
        self.impressions += other.impressions;
        self.clicks += other.clicks;
        self.spend += other.spend;
        self.leads += other.leads;
        self.likes += other.likes;
        self.comments += other.comments;
        self.shares += other.shares;
        self.follows += other.follows;
        self.other_engagements += other.other_engagements;
    }
}

/// One entity's aggregated counters within a period, keyed by the id parsed
/// from its pivot URN.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub id: String,
    pub impressions: i64,
    pub clicks: i64,
    pub spent: f64,
}

/// A fully aggregated period: running totals plus the per-entity breakdown in
/// first-seen order.
#[derive(Debug, Clone, Default)]
pub struct PeriodData {
    pub totals: Totals,
    pub breakdown: Vec<BreakdownRow>,
}

/// Derived display metrics for one period. Field names match the dashboard's
/// existing wire contract; `website_visits` is pinned to zero because the
/// upstream field is unreliable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSet {
    pub impressions: i64,
    pub clicks: i64,
    pub ctr: f64,
    pub spent: f64,
    pub cpm: f64,
    pub cpc: f64,
    pub website_visits: i64,
    pub leads: i64,
    pub cpl: f64,
    pub engagement_rate: f64,
    pub engagements: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    pub id: String,
    pub impressions: i64,
    pub clicks: i64,
    pub ctr: f64,
    pub spent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPacing {
    pub budget: f64,
    pub spent: f64,
    pub days_total: i64,
    pub days_elapsed: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRequest {
    #[serde(flatten)]
    pub selection: EntitySelection,
    pub current_range: DateRange,
    pub previous_range: DateRange,
    /// Optional caller-supplied budget; reported as zero/unknown when absent
    /// rather than guessed from campaign fields.
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub current: MetricSet,
    pub previous: MetricSet,
    pub top_performers: Vec<TopPerformer>,
    pub budget_pacing: BudgetPacing,
}
