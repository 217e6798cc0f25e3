use serde::{Deserialize, Serialize};

use super::analytics::{BudgetPacing, DateRange, MetricSet, TopPerformer};

/// Payload for narrative report generation: the already-aggregated dashboard
/// data plus the ranges and selection labels the prompt references.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub current: MetricSet,
    pub previous: MetricSet,
    #[serde(default)]
    pub top_performers: Vec<TopPerformer>,
    pub budget_pacing: Option<BudgetPacing>,
    pub current_range: DateRange,
    pub previous_range: DateRange,
    #[serde(default)]
    pub selected_campaigns: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub report: String,
}
