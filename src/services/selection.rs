use crate::models::{EntitySelection, PivotLevel};

/// Picks the reporting pivot for a mixed selection: the most specific
/// non-empty level wins (Ad > Campaign > CampaignGroup > Account). Returns
/// `None` only when every level is empty; callers reject that as invalid
/// input before touching the network.
pub fn resolve_pivot(selection: &EntitySelection) -> Option<(PivotLevel, &[String])> {
    if !selection.ad_ids.is_empty() {
        Some((PivotLevel::Ad, &selection.ad_ids))
    } else if !selection.campaign_ids.is_empty() {
        Some((PivotLevel::Campaign, &selection.campaign_ids))
    } else if !selection.campaign_group_ids.is_empty() {
        Some((PivotLevel::CampaignGroup, &selection.campaign_group_ids))
    } else if !selection.account_ids.is_empty() {
        Some((PivotLevel::Account, &selection.account_ids))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ad_selection_wins_over_everything() {
        let selection = EntitySelection {
            account_ids: ids(&["1"]),
            campaign_group_ids: ids(&["2"]),
            campaign_ids: ids(&["3"]),
            ad_ids: ids(&["4", "5"]),
        };

        let (pivot, filter) = resolve_pivot(&selection).unwrap();
        assert_eq!(pivot, PivotLevel::Ad);
        assert_eq!(filter, &["4".to_string(), "5".to_string()]);
    }

    #[test]
    fn campaign_selection_subsumes_group_and_account() {
        let selection = EntitySelection {
            account_ids: ids(&["1"]),
            campaign_group_ids: ids(&["2"]),
            campaign_ids: ids(&["3"]),
            ad_ids: vec![],
        };

        let (pivot, filter) = resolve_pivot(&selection).unwrap();
        assert_eq!(pivot, PivotLevel::Campaign);
        assert_eq!(filter, &["3".to_string()]);
    }

    #[test]
    fn falls_back_to_accounts() {
        let selection = EntitySelection {
            account_ids: ids(&["1", "2"]),
            ..Default::default()
        };

        let (pivot, filter) = resolve_pivot(&selection).unwrap();
        assert_eq!(pivot, PivotLevel::Account);
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn empty_selection_resolves_to_none() {
        assert!(resolve_pivot(&EntitySelection::default()).is_none());
    }
}
