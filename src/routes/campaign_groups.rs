use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::auth::AccessToken;
use crate::errors::AppError;
use crate::models::CampaignGroup;
use crate::services::entity_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(list_campaign_groups))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CampaignGroupsRequest {
    account_ids: Vec<String>,
}

/// POST /api/campaign-groups - campaign groups for the selected accounts
async fn list_campaign_groups(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Json(data): Json<CampaignGroupsRequest>,
) -> Result<Json<Vec<CampaignGroup>>, AppError> {
    info!(
        "POST /api/campaign-groups - {} accounts selected",
        data.account_ids.len()
    );

    if data.account_ids.is_empty() {
        return Err(AppError::Validation("accountIds must not be empty".into()));
    }

    let groups = entity_service::list_campaign_groups(
        state.ads_provider.as_ref(),
        &token,
        &data.account_ids,
    )
    .await?;
    Ok(Json(groups))
}
