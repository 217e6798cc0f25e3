use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info};

use crate::auth::AccessToken;
use crate::errors::AppError;
use crate::models::{ReportRequest, ReportResponse};
use crate::services::report_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(generate_report))
}

/// POST /api/report - LLM-generated narrative/optimisation report over the
/// already-aggregated dashboard metrics
async fn generate_report(
    State(state): State<AppState>,
    AccessToken(_token): AccessToken,
    Json(data): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    info!("POST /api/report - Generating narrative report");

    let response = report_service::generate_report(state.report_provider.as_ref(), data)
        .await
        .map_err(|e| {
            error!("Report generation failed: {}", e);
            e
        })?;
    Ok(Json(response))
}
