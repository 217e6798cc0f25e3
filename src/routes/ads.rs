use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::auth::AccessToken;
use crate::errors::AppError;
use crate::models::Creative;
use crate::services::entity_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(list_ads))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdsRequest {
    campaign_ids: Vec<String>,
}

/// POST /api/ads - creatives for the selected campaigns
async fn list_ads(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Json(data): Json<AdsRequest>,
) -> Result<Json<Vec<Creative>>, AppError> {
    info!("POST /api/ads - {} campaigns selected", data.campaign_ids.len());

    if data.campaign_ids.is_empty() {
        return Err(AppError::Validation("campaignIds must not be empty".into()));
    }

    let ads = entity_service::list_ads(state.ads_provider.as_ref(), &token, &data.campaign_ids)
        .await?;
    Ok(Json(ads))
}
