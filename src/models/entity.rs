use serde::{Deserialize, Serialize};

/// Granularity the reporting API pivots returned rows by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PivotLevel {
    Account,
    CampaignGroup,
    Campaign,
    Ad,
}

impl PivotLevel {
    /// Pivot name expected by the adAnalytics finder.
    pub fn pivot_name(&self) -> &'static str {
        match self {
            PivotLevel::Account => "ACCOUNT",
            PivotLevel::CampaignGroup => "CAMPAIGN_GROUP",
            PivotLevel::Campaign => "CAMPAIGN",
            PivotLevel::Ad => "CREATIVE",
        }
    }

    /// URN prefix for ids at this level.
    pub fn urn_prefix(&self) -> &'static str {
        match self {
            PivotLevel::Account => "urn:li:sponsoredAccount",
            PivotLevel::CampaignGroup => "urn:li:sponsoredCampaignGroup",
            PivotLevel::Campaign => "urn:li:sponsoredCampaign",
            PivotLevel::Ad => "urn:li:sponsoredCreative",
        }
    }

    /// Query-parameter name the finder filters by at this level.
    pub fn filter_param(&self) -> &'static str {
        match self {
            PivotLevel::Account => "accounts",
            PivotLevel::CampaignGroup => "campaignGroups",
            PivotLevel::Campaign => "campaigns",
            PivotLevel::Ad => "creatives",
        }
    }

    pub fn urn(&self, id: &str) -> String {
        format!("{}:{}", self.urn_prefix(), id)
    }
}

/// The user's selection across all four levels. Only the most specific
/// non-empty level is used when querying analytics.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySelection {
    #[serde(default)]
    pub account_ids: Vec<String>,
    #[serde(default)]
    pub campaign_group_ids: Vec<String>,
    #[serde(default)]
    pub campaign_ids: Vec<String>,
    #[serde(default)]
    pub ad_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdAccount {
    pub id: String,
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignGroup {
    pub id: String,
    pub name: String,
    pub status: String,
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub status: String,
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Creative {
    pub id: String,
    pub name: String,
    pub status: String,
    pub campaign_id: String,
}
