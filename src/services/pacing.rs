use chrono::NaiveDate;

use crate::models::{BudgetPacing, DateRange, Totals};

/// Budget/time-progress summary for the current period. Day counts are
/// inclusive calendar days, so a range covering one whole month is that
/// month's length. `today` is injected rather than read from the clock so
/// the math is deterministic under test. Budget is whatever the caller
/// supplied; absent one it is reported as zero rather than guessed from
/// campaign fields.
pub fn budget_pacing(
    totals: &Totals,
    range: DateRange,
    budget: Option<f64>,
    today: NaiveDate,
) -> BudgetPacing {
    let days_total = (range.end - range.start).num_days() + 1;
    let days_elapsed = ((today - range.start).num_days() + 1).clamp(0, days_total);

    BudgetPacing {
        budget: budget.unwrap_or(0.0),
        spent: totals.spend,
        days_total,
        days_elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> DateRange {
        DateRange { start: date(2025, 1, 1), end: date(2025, 1, 31) }
    }

    #[test]
    fn fully_elapsed_range_clamps_to_total() {
        let pacing = budget_pacing(&Totals::default(), january(), None, date(2025, 2, 15));
        assert_eq!(pacing.days_total, 31);
        assert_eq!(pacing.days_elapsed, 31);
    }

    #[test]
    fn future_range_has_zero_elapsed_days() {
        let pacing = budget_pacing(&Totals::default(), january(), None, date(2024, 12, 1));
        assert_eq!(pacing.days_total, 31);
        assert_eq!(pacing.days_elapsed, 0);
    }

    #[test]
    fn mid_range_counts_the_current_day() {
        let pacing = budget_pacing(&Totals::default(), january(), None, date(2025, 1, 10));
        assert_eq!(pacing.days_elapsed, 10);
    }

    #[test]
    fn missing_budget_reports_zero_and_spend_carries_through() {
        let totals = Totals { spend: 123.45, ..Default::default() };
        let pacing = budget_pacing(&totals, january(), None, date(2025, 1, 10));
        assert_eq!(pacing.budget, 0.0);
        assert!((pacing.spent - 123.45).abs() < 1e-9);

        let with_budget = budget_pacing(&totals, january(), Some(1000.0), date(2025, 1, 10));
        assert_eq!(with_budget.budget, 1000.0);
    }

    #[test]
    fn single_day_range_is_one_day() {
        let range = DateRange { start: date(2025, 3, 5), end: date(2025, 3, 5) };
        let pacing = budget_pacing(&Totals::default(), range, None, date(2025, 3, 5));
        assert_eq!(pacing.days_total, 1);
        assert_eq!(pacing.days_elapsed, 1);
    }
}
