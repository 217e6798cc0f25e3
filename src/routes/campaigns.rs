use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::auth::AccessToken;
use crate::errors::AppError;
use crate::models::Campaign;
use crate::services::entity_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(list_campaigns))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CampaignsRequest {
    account_ids: Vec<String>,
}

/// POST /api/campaigns - campaigns for the selected accounts
async fn list_campaigns(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Json(data): Json<CampaignsRequest>,
) -> Result<Json<Vec<Campaign>>, AppError> {
    info!("POST /api/campaigns - {} accounts selected", data.account_ids.len());

    if data.account_ids.is_empty() {
        return Err(AppError::Validation("accountIds must not be empty".into()));
    }

    let campaigns =
        entity_service::list_campaigns(state.ads_provider.as_ref(), &token, &data.account_ids)
            .await?;
    Ok(Json(campaigns))
}
