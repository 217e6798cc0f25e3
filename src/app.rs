use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

use crate::routes::{accounts, ads, analytics, campaign_groups, campaigns, health, report};
use crate::state::AppState;

/// Whole-request ceiling; upstream reporting calls must never hang the
/// dashboard indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/accounts", accounts::router())
        .nest("/api/campaign-groups", campaign_groups::router())
        .nest("/api/campaigns", campaigns::router())
        .nest("/api/ads", ads::router())
        .nest("/api/analytics", analytics::router())
        .nest("/api/report", report::router())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
