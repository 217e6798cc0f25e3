use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::external::ads_provider::{AdsProvider, AdsProviderError, ANALYTICS_PAGE_SIZE};
use crate::models::{AdAccount, AnalyticsRow, Campaign, CampaignGroup, Creative, DateRange, PivotLevel};

const BASE_URL: &str = "https://api.linkedin.com";
const API_VERSION: &str = "202504";

/// Counter fields requested from adAnalytics. externalWebsiteConversions and
/// landingPageClicks are deliberately absent (unreliable upstream);
/// oneClickLeads covers native lead-gen forms.
const ANALYTICS_FIELDS: &str = "impressions,clicks,costInLocalCurrency,oneClickLeads,likes,comments,shares,follows,otherEngagements,pivotValues";

/// Client for LinkedIn's Marketing API (Rest.li protocol 2.0.0).
pub struct LinkedInProvider {
    client: reqwest::Client,
}

impl LinkedInProvider {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self { client }
    }

    async fn get_json(&self, token: &str, url: &str) -> Result<Value, AdsProviderError> {
        let resp = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Linkedin-Version", API_VERSION)
            .header("X-RestLi-Protocol-Version", "2.0.0")
            .send()
            .await
            .map_err(|e| AdsProviderError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AdsProviderError::RateLimited);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AdsProviderError::BadResponse(format!("HTTP {status}: {body}")));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| AdsProviderError::Parse(e.to_string()))
    }
}

impl Default for LinkedInProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Rest.li dateRange parameter; month/day are unpadded.
fn date_range_param(range: DateRange) -> String {
    use chrono::Datelike;
    format!(
        "dateRange=(start:(year:{},month:{},day:{}),end:(year:{},month:{},day:{}))",
        range.start.year(),
        range.start.month(),
        range.start.day(),
        range.end.year(),
        range.end.month(),
        range.end.day(),
    )
}

fn encode_urn(urn: &str) -> String {
    url::form_urlencoded::byte_serialize(urn.as_bytes()).collect()
}

fn urn_list(pivot: PivotLevel, ids: &[String]) -> String {
    ids.iter()
        .map(|id| encode_urn(&pivot.urn(id)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Ids come back as numbers on some finders and as URN strings on others.
fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => s.rsplit(':').next().map(str::to_string),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct ElementsEnvelope {
    #[serde(default)]
    elements: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AnalyticsElement {
    pivot_values: Vec<String>,
    impressions: i64,
    clicks: i64,
    cost_in_local_currency: Option<String>,
    one_click_leads: i64,
    likes: i64,
    comments: i64,
    shares: i64,
    follows: i64,
    other_engagements: i64,
}

impl From<AnalyticsElement> for AnalyticsRow {
    fn from(el: AnalyticsElement) -> Self {
        AnalyticsRow {
            pivot_urn: el.pivot_values.into_iter().next(),
            impressions: el.impressions,
            clicks: el.clicks,
            cost: el
                .cost_in_local_currency
                .and_then(|c| c.parse::<f64>().ok())
                .unwrap_or(0.0),
            leads: el.one_click_leads,
            likes: el.likes,
            comments: el.comments,
            shares: el.shares,
            follows: el.follows,
            other_engagements: el.other_engagements,
        }
    }
}

#[async_trait]
impl AdsProvider for LinkedInProvider {
    async fn fetch_analytics_page(
        &self,
        token: &str,
        pivot: PivotLevel,
        ids: &[String],
        range: DateRange,
        start: usize,
    ) -> Result<Vec<AnalyticsRow>, AdsProviderError> {
        let url = format!(
            "{BASE_URL}/rest/adAnalytics?q=analytics&pivot={}&timeGranularity=ALL&{}&{}=List({})&fields={ANALYTICS_FIELDS}&start={start}&count={ANALYTICS_PAGE_SIZE}",
            pivot.pivot_name(),
            date_range_param(range),
            pivot.filter_param(),
            urn_list(pivot, ids),
        );

        let body = self.get_json(token, &url).await?;
        let envelope: ElementsEnvelope =
            serde_json::from_value(body).map_err(|e| AdsProviderError::Parse(e.to_string()))?;

        envelope
            .elements
            .into_iter()
            .map(|el| {
                serde_json::from_value::<AnalyticsElement>(el)
                    .map(AnalyticsRow::from)
                    .map_err(|e| AdsProviderError::Parse(e.to_string()))
            })
            .collect()
    }

    async fn list_accounts(&self, token: &str) -> Result<Vec<AdAccount>, AdsProviderError> {
        let url = format!(
            "{BASE_URL}/rest/adAccounts?q=search&search=(status:(values:List(ACTIVE,DRAFT)))"
        );

        let body = self.get_json(token, &url).await?;
        let envelope: ElementsEnvelope =
            serde_json::from_value(body).map_err(|e| AdsProviderError::Parse(e.to_string()))?;

        Ok(envelope
            .elements
            .iter()
            .filter_map(|el| {
                let id = id_to_string(el.get("id")?)?;
                Some(AdAccount {
                    name: el
                        .get("name")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Account {id}")),
                    status: el
                        .get("status")
                        .and_then(Value::as_str)
                        .unwrap_or("ACTIVE")
                        .to_string(),
                    id,
                })
            })
            .collect())
    }

    async fn list_campaign_group_ids(
        &self,
        token: &str,
        account_id: &str,
        range: DateRange,
    ) -> Result<Vec<String>, AdsProviderError> {
        let account_urn = encode_urn(&PivotLevel::Account.urn(account_id));
        let url = format!(
            "{BASE_URL}/rest/adAnalytics?q=analytics&pivot=CAMPAIGN_GROUP&timeGranularity=ALL&{}&accounts=List({account_urn})&fields=impressions,pivotValues",
            date_range_param(range),
        );

        let body = self.get_json(token, &url).await?;
        let envelope: ElementsEnvelope =
            serde_json::from_value(body).map_err(|e| AdsProviderError::Parse(e.to_string()))?;

        Ok(envelope
            .elements
            .iter()
            .filter_map(|el| {
                el.get("pivotValues")
                    .and_then(Value::as_array)
                    .and_then(|vals| vals.first())
                    .and_then(id_to_string)
            })
            .collect())
    }

    async fn get_campaign_group(
        &self,
        token: &str,
        group_id: &str,
    ) -> Result<Option<CampaignGroup>, AdsProviderError> {
        let url = format!("{BASE_URL}/rest/adCampaignGroups/{group_id}");

        let detail = match self.get_json(token, &url).await {
            Ok(detail) => detail,
            // Detail lookups are best-effort name enrichment.
            Err(AdsProviderError::BadResponse(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(Some(CampaignGroup {
            id: group_id.to_string(),
            name: detail
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Campaign Group {group_id}")),
            status: detail
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or("ACTIVE")
                .to_string(),
            account_id: detail
                .get("account")
                .and_then(id_to_string)
                .unwrap_or_default(),
        }))
    }

    async fn list_campaigns(
        &self,
        token: &str,
        account_id: &str,
    ) -> Result<Vec<Campaign>, AdsProviderError> {
        let account_urn = encode_urn(&PivotLevel::Account.urn(account_id));
        let url = format!(
            "{BASE_URL}/v2/adCampaignsV2?q=search&search.account.values[0]={account_urn}&count=100"
        );

        let body = self.get_json(token, &url).await?;
        let envelope: ElementsEnvelope =
            serde_json::from_value(body).map_err(|e| AdsProviderError::Parse(e.to_string()))?;

        Ok(envelope
            .elements
            .iter()
            .filter_map(|el| {
                let id = id_to_string(el.get("id")?)?;
                Some(Campaign {
                    name: el
                        .get("name")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Campaign {id}")),
                    status: el
                        .get("status")
                        .and_then(Value::as_str)
                        .unwrap_or("UNKNOWN")
                        .to_string(),
                    account_id: account_id.to_string(),
                    id,
                })
            })
            .collect())
    }

    async fn list_creatives(
        &self,
        token: &str,
        campaign_id: &str,
    ) -> Result<Vec<Creative>, AdsProviderError> {
        let campaign_urn = encode_urn(&PivotLevel::Campaign.urn(campaign_id));
        let url = format!(
            "{BASE_URL}/rest/adCreatives?q=search&search.campaign.values[0]={campaign_urn}&count=100"
        );

        let body = self.get_json(token, &url).await?;
        let envelope: ElementsEnvelope =
            serde_json::from_value(body).map_err(|e| AdsProviderError::Parse(e.to_string()))?;

        Ok(envelope
            .elements
            .iter()
            .filter_map(|el| {
                let id = id_to_string(el.get("id")?)?;
                Some(Creative {
                    name: el
                        .get("name")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Ad {id}")),
                    status: el
                        .get("status")
                        .and_then(Value::as_str)
                        .unwrap_or("UNKNOWN")
                        .to_string(),
                    campaign_id: campaign_id.to_string(),
                    id,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range() -> DateRange {
        DateRange {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
        }
    }

    #[test]
    fn date_range_param_is_unpadded_restli() {
        assert_eq!(
            date_range_param(range()),
            "dateRange=(start:(year:2025,month:1,day:1),end:(year:2025,month:3,day:9))"
        );
    }

    #[test]
    fn urn_list_encodes_colons() {
        let ids = vec!["123".to_string(), "456".to_string()];
        assert_eq!(
            urn_list(PivotLevel::Campaign, &ids),
            "urn%3Ali%3AsponsoredCampaign%3A123,urn%3Ali%3AsponsoredCampaign%3A456"
        );
    }

    #[test]
    fn id_to_string_handles_urns_and_numbers() {
        assert_eq!(
            id_to_string(&serde_json::json!("urn:li:sponsoredCreative:789")),
            Some("789".to_string())
        );
        assert_eq!(id_to_string(&serde_json::json!(512345678)), Some("512345678".to_string()));
        assert_eq!(id_to_string(&serde_json::json!(null)), None);
    }

    #[test]
    fn analytics_element_parses_string_cost() {
        let el: AnalyticsElement = serde_json::from_value(serde_json::json!({
            "pivotValues": ["urn:li:sponsoredCampaign:42"],
            "impressions": 1000,
            "clicks": 20,
            "costInLocalCurrency": "50.25",
            "oneClickLeads": 3
        }))
        .unwrap();

        let row = AnalyticsRow::from(el);
        assert_eq!(row.pivot_urn.as_deref(), Some("urn:li:sponsoredCampaign:42"));
        assert_eq!(row.impressions, 1000);
        assert_eq!(row.clicks, 20);
        assert!((row.cost - 50.25).abs() < f64::EPSILON);
        assert_eq!(row.leads, 3);
        assert_eq!(row.likes, 0);
    }
}
