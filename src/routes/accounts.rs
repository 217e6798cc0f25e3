use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::auth::AccessToken;
use crate::errors::AppError;
use crate::models::AdAccount;
use crate::services::entity_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_accounts))
}

/// GET /api/accounts - all ad accounts visible to the signed-in user
async fn list_accounts(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
) -> Result<Json<Vec<AdAccount>>, AppError> {
    info!("GET /api/accounts - Listing ad accounts");
    let accounts = entity_service::list_accounts(state.ads_provider.as_ref(), &token)
        .await
        .map_err(|e| {
            error!("Failed to list ad accounts: {}", e);
            e
        })?;
    Ok(Json(accounts))
}
