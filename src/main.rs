mod app;
mod auth;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::external::anthropic::AnthropicProvider;
use crate::external::linkedin::LinkedInProvider;
use crate::external::report_provider::{DisabledReportProvider, ReportProvider};
use crate::logging::{init_logging, LoggingConfig};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_logging(LoggingConfig::from_env()).map_err(|e| anyhow::anyhow!("{e}"))?;

    let report_provider: Arc<dyn ReportProvider> = match AnthropicProvider::from_env() {
        Some(provider) => {
            tracing::info!("Report provider: Anthropic");
            Arc::new(provider)
        }
        None => {
            tracing::info!("Report provider: disabled (ANTHROPIC_API_KEY not set)");
            Arc::new(DisabledReportProvider)
        }
    };

    let state = AppState {
        ads_provider: Arc::new(LinkedInProvider::new()),
        report_provider,
    };
    let app = app::create_app(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("adlens backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
