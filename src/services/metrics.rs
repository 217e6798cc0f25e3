use crate::models::{MetricSet, Totals};

/// Derives the display metric set from raw period totals. Every ratio guards
/// its denominator and is defined as zero when the denominator is zero. No
/// rounding here; display formatting belongs to the frontend.
pub fn derive_metrics(totals: &Totals) -> MetricSet {
    let impressions = totals.impressions as f64;
    let clicks = totals.clicks as f64;
    let spend = totals.spend;
    let leads = totals.leads as f64;

    let engagements =
        totals.clicks + totals.likes + totals.comments + totals.shares + totals.follows;

    MetricSet {
        impressions: totals.impressions,
        clicks: totals.clicks,
        ctr: if totals.impressions > 0 { clicks / impressions * 100.0 } else { 0.0 },
        spent: spend,
        cpm: if totals.impressions > 0 { spend / impressions * 1000.0 } else { 0.0 },
        cpc: if totals.clicks > 0 { spend / clicks } else { 0.0 },
        website_visits: 0,
        leads: totals.leads,
        cpl: if totals.leads > 0 { spend / leads } else { 0.0 },
        engagement_rate: if totals.impressions > 0 {
            engagements as f64 / impressions * 100.0
        } else {
            0.0
        },
        engagements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_totals_yield_zero_ratios_not_nan() {
        let metrics = derive_metrics(&Totals::default());

        assert_eq!(metrics.ctr, 0.0);
        assert_eq!(metrics.cpm, 0.0);
        assert_eq!(metrics.cpc, 0.0);
        assert_eq!(metrics.cpl, 0.0);
        assert_eq!(metrics.engagement_rate, 0.0);
        assert!(metrics.ctr.is_finite());
        assert!(metrics.cpm.is_finite());
    }

    #[test]
    fn spend_without_clicks_or_leads_still_guards() {
        let totals = Totals { impressions: 500, spend: 42.0, ..Default::default() };
        let metrics = derive_metrics(&totals);

        assert_eq!(metrics.cpc, 0.0);
        assert_eq!(metrics.cpl, 0.0);
        assert!((metrics.cpm - 84.0).abs() < 1e-9);
    }

    #[test]
    fn known_totals_produce_expected_ratios() {
        // Two rows: {1000 imp, 20 clicks, 50 cost} + {2000 imp, 10 clicks, 30 cost}
        let totals = Totals {
            impressions: 3000,
            clicks: 30,
            spend: 80.0,
            ..Default::default()
        };
        let metrics = derive_metrics(&totals);

        assert!((metrics.ctr - 1.0).abs() < 1e-9);
        assert!((metrics.cpm - 80.0 / 3000.0 * 1000.0).abs() < 1e-9);
        assert!((metrics.cpc - 80.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn engagements_sum_clicks_and_social_actions() {
        let totals = Totals {
            impressions: 1000,
            clicks: 10,
            likes: 5,
            comments: 3,
            shares: 1,
            follows: 1,
            other_engagements: 99, // not part of the engagement sum
            ..Default::default()
        };
        let metrics = derive_metrics(&totals);

        assert_eq!(metrics.engagements, 20);
        assert!((metrics.engagement_rate - 2.0).abs() < 1e-9);
    }
}
