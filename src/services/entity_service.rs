use chrono::{Duration, Utc};
use futures::future::join_all;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::external::ads_provider::AdsProvider;
use crate::models::{AdAccount, Campaign, CampaignGroup, Creative, DateRange};

/// Trailing window used to discover campaign groups via the analytics pivot.
const GROUP_DISCOVERY_DAYS: i64 = 90;

pub async fn list_accounts(
    provider: &dyn AdsProvider,
    token: &str,
) -> Result<Vec<AdAccount>, AppError> {
    let accounts = provider.list_accounts(token).await?;
    info!("Fetched {} ad accounts", accounts.len());
    Ok(accounts)
}

/// Campaign groups for the selected accounts. Group ids are discovered from a
/// CAMPAIGN_GROUP analytics pivot over the trailing 90 days, deduplicated
/// across accounts, then enriched with real names. A failing account or
/// detail lookup is skipped, not fatal.
pub async fn list_campaign_groups(
    provider: &dyn AdsProvider,
    token: &str,
    account_ids: &[String],
) -> Result<Vec<CampaignGroup>, AppError> {
    let today = Utc::now().date_naive();
    let range = DateRange {
        start: today - Duration::days(GROUP_DISCOVERY_DAYS),
        end: today,
    };

    let mut groups: Vec<CampaignGroup> = Vec::new();

    for account_id in account_ids {
        let ids = match provider.list_campaign_group_ids(token, account_id, range).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!("Campaign group discovery failed for account {}: {}", account_id, e);
                continue;
            }
        };

        for id in ids {
            if groups.iter().any(|g| g.id == id) {
                continue;
            }
            groups.push(CampaignGroup {
                name: format!("Campaign Group {id}"),
                status: "ACTIVE".to_string(),
                account_id: account_id.clone(),
                id,
            });
        }
    }

    // Name enrichment in parallel; discovery only yields ids.
    let details = join_all(
        groups
            .iter()
            .map(|g| provider.get_campaign_group(token, &g.id)),
    )
    .await;

    for (group, detail) in groups.iter_mut().zip(details) {
        match detail {
            Ok(Some(found)) => {
                group.name = found.name;
                group.status = found.status;
            }
            Ok(None) => {}
            Err(e) => warn!("Campaign group detail failed for {}: {}", group.id, e),
        }
    }

    info!("Total campaign groups: {}", groups.len());
    Ok(groups)
}

pub async fn list_campaigns(
    provider: &dyn AdsProvider,
    token: &str,
    account_ids: &[String],
) -> Result<Vec<Campaign>, AppError> {
    let mut campaigns = Vec::new();

    for account_id in account_ids {
        match provider.list_campaigns(token, account_id).await {
            Ok(found) => campaigns.extend(found),
            Err(e) => warn!("Campaign listing failed for account {}: {}", account_id, e),
        }
    }

    info!("Total campaigns: {}", campaigns.len());
    Ok(campaigns)
}

pub async fn list_ads(
    provider: &dyn AdsProvider,
    token: &str,
    campaign_ids: &[String],
) -> Result<Vec<Creative>, AppError> {
    let mut ads = Vec::new();

    for campaign_id in campaign_ids {
        match provider.list_creatives(token, campaign_id).await {
            Ok(found) => ads.extend(found),
            Err(e) => warn!("Ad listing failed for campaign {}: {}", campaign_id, e),
        }
    }

    info!("Total ads: {}", ads.len());
    Ok(ads)
}
