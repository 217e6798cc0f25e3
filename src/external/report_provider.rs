use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report generation is disabled")]
    Disabled,

    #[error("network error: {0}")]
    Network(String),

    #[error("api error: {0}")]
    Api(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("rate limited")]
    RateLimited,

    #[error("timeout")]
    Timeout,
}

/// Opaque text-generation boundary: a prompt goes in, narrative text comes
/// out. The aggregation pipeline never sees the vendor behind it.
#[async_trait]
pub trait ReportProvider: Send + Sync {
    async fn generate(&self, prompt: String) -> Result<String, ReportError>;
}

/// Stand-in used when no generation provider is configured; every call fails
/// with [`ReportError::Disabled`] so the route can answer 503.
pub struct DisabledReportProvider;

#[async_trait]
impl ReportProvider for DisabledReportProvider {
    async fn generate(&self, _prompt: String) -> Result<String, ReportError> {
        Err(ReportError::Disabled)
    }
}
