/// Metric derivation formulas used by the analytics dashboard.
///
/// These mirror the deriver's contract: every ratio guards its denominator
/// and is defined as zero when the denominator is zero.

#[cfg(test)]
mod ratio_metrics {
    fn ctr(clicks: i64, impressions: i64) -> f64 {
        if impressions > 0 { clicks as f64 / impressions as f64 * 100.0 } else { 0.0 }
    }

    fn cpm(spend: f64, impressions: i64) -> f64 {
        if impressions > 0 { spend / impressions as f64 * 1000.0 } else { 0.0 }
    }

    fn cpc(spend: f64, clicks: i64) -> f64 {
        if clicks > 0 { spend / clicks as f64 } else { 0.0 }
    }

    fn cpl(spend: f64, leads: i64) -> f64 {
        if leads > 0 { spend / leads as f64 } else { 0.0 }
    }

    #[test]
    fn test_ctr_known_value() {
        // 30 clicks on 3000 impressions -> 1.0%
        assert!((ctr(30, 3000) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ctr_zero_impressions() {
        assert_eq!(ctr(30, 0), 0.0);
    }

    #[test]
    fn test_cpm_known_value() {
        // 80 spend over 3000 impressions -> ~26.67
        assert!((cpm(80.0, 3000) - 26.6666).abs() < 0.001);
    }

    #[test]
    fn test_cpc_known_value() {
        assert!((cpc(80.0, 30) - 2.6666).abs() < 0.001);
    }

    #[test]
    fn test_cpc_zero_clicks_is_zero_not_infinite() {
        let value = cpc(80.0, 0);
        assert_eq!(value, 0.0);
        assert!(value.is_finite());
    }

    #[test]
    fn test_cpl_zero_leads() {
        assert_eq!(cpl(500.0, 0), 0.0);
    }
}

#[cfg(test)]
mod pacing_math {
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Inclusive day counts: a whole-month range is that month's length.
    fn days_total(start: NaiveDate, end: NaiveDate) -> i64 {
        (end - start).num_days() + 1
    }

    fn days_elapsed(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> i64 {
        ((today - start).num_days() + 1).clamp(0, days_total(start, end))
    }

    #[test]
    fn test_whole_january_is_31_days() {
        assert_eq!(days_total(date(2025, 1, 1), date(2025, 1, 31)), 31);
    }

    #[test]
    fn test_elapsed_clamps_to_total_after_range_ends() {
        let elapsed = days_elapsed(date(2025, 1, 1), date(2025, 1, 31), date(2025, 2, 15));
        assert_eq!(elapsed, 31);
    }

    #[test]
    fn test_elapsed_is_zero_before_range_starts() {
        let elapsed = days_elapsed(date(2025, 1, 1), date(2025, 1, 31), date(2024, 12, 1));
        assert_eq!(elapsed, 0);
    }

    #[test]
    fn test_elapsed_counts_current_day_mid_range() {
        let elapsed = days_elapsed(date(2025, 1, 1), date(2025, 1, 31), date(2025, 1, 10));
        assert_eq!(elapsed, 10);
    }
}
