use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info};

use crate::auth::AccessToken;
use crate::errors::AppError;
use crate::models::{AnalyticsRequest, AnalyticsResponse};
use crate::services::analytics_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(get_analytics))
}

/// POST /api/analytics - aggregated metrics for the current and comparison
/// periods, plus top performers and budget pacing
async fn get_analytics(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Json(data): Json<AnalyticsRequest>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    info!(
        "POST /api/analytics - {} to {} vs {} to {}",
        data.current_range.start,
        data.current_range.end,
        data.previous_range.start,
        data.previous_range.end
    );

    let response = analytics_service::get_analytics(state.ads_provider.as_ref(), &token, data)
        .await
        .map_err(|e| {
            error!("Analytics request failed: {}", e);
            e
        })?;
    Ok(Json(response))
}
