mod analytics;
mod entity;
mod report;

pub use analytics::{
    AnalyticsRequest, AnalyticsResponse, AnalyticsRow, BreakdownRow, BudgetPacing, DateRange,
    MetricSet, PeriodData, TopPerformer, Totals,
};
pub use entity::{AdAccount, Campaign, CampaignGroup, Creative, EntitySelection, PivotLevel};
pub use report::{ReportRequest, ReportResponse};
