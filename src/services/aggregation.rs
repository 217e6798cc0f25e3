use crate::models::{AnalyticsRow, BreakdownRow, PeriodData, TopPerformer};

/// Default number of top performers returned to the dashboard.
pub const DEFAULT_TOP_N: usize = 5;

/// Entity id is the trailing token of the pivot URN
/// (`urn:li:sponsoredCampaign:123` -> `123`). Empty or missing URNs are
/// unattributable.
fn entity_id(pivot_urn: Option<&str>) -> Option<String> {
    let urn = pivot_urn?;
    let id = urn.rsplit(':').next()?;
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

impl PeriodData {
    /// Folds one raw row into the running totals and the per-entity
    /// breakdown. Rows without a parseable pivot URN still count in the
    /// totals but cannot be attributed to a breakdown entry.
    pub fn add_row(&mut self, row: &AnalyticsRow) {
        self.totals.add_row(row);

        let Some(id) = entity_id(row.pivot_urn.as_deref()) else {
            return;
        };

        match self.breakdown.iter_mut().find(|b| b.id == id) {
            Some(entry) => {
                entry.impressions += row.impressions;
                entry.clicks += row.clicks;
                entry.spent += row.cost;
            }
            None => self.breakdown.push(BreakdownRow {
                id,
                impressions: row.impressions,
                clicks: row.clicks,
                spent: row.cost,
            }),
        }
    }

    /// Combines per-account partials produced by parallel fetches. Totals add
    /// elementwise; breakdown entries with the same id are summed, keeping
    /// the order entries were first seen.
    pub fn merge(&mut self, other: PeriodData) {
        self.totals.merge(&other.totals);

        for row in other.breakdown {
            match self.breakdown.iter_mut().find(|b| b.id == row.id) {
                Some(entry) => {
                    entry.impressions += row.impressions;
                    entry.clicks += row.clicks;
                    entry.spent += row.spent;
                }
                None => self.breakdown.push(row),
            }
        }
    }
}

/// Reduces one period's raw rows into totals plus breakdown. Summation is
/// order-independent; only ranking imposes an order, later.
pub fn aggregate_rows(rows: &[AnalyticsRow]) -> PeriodData {
    let mut period = PeriodData::default();
    for row in rows {
        period.add_row(row);
    }
    period
}

/// Top-N breakdown entries by impressions, descending. The sort is stable so
/// ties keep first-encountered order, and the input is never mutated.
pub fn top_performers(breakdown: &[BreakdownRow], n: usize) -> Vec<TopPerformer> {
    let mut ranked: Vec<&BreakdownRow> = breakdown.iter().collect();
    ranked.sort_by(|a, b| b.impressions.cmp(&a.impressions));

    ranked
        .into_iter()
        .take(n)
        .map(|row| TopPerformer {
            id: row.id.clone(),
            impressions: row.impressions,
            clicks: row.clicks,
            ctr: if row.impressions > 0 {
                row.clicks as f64 / row.impressions as f64 * 100.0
            } else {
                0.0
            },
            spent: row.spent,
        })
        .collect()
}
