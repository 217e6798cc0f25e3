use axum::response::IntoResponse;
use http::StatusCode;
use thiserror::Error;

use crate::external::ads_provider::AdsProviderError;
use crate::external::report_provider::ReportError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("External error: {0}")]
    External(String),
    #[error("Report generation is not configured")]
    ReportDisabled,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            AppError::External(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
            AppError::ReportDisabled => {
                (StatusCode::SERVICE_UNAVAILABLE, "Report generation is not configured")
                    .into_response()
            }
        }
    }
}

impl From<AdsProviderError> for AppError {
    fn from(value: AdsProviderError) -> Self {
        AppError::External(value.to_string())
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        match value {
            ReportError::Disabled => AppError::ReportDisabled,
            other => AppError::External(other.to_string()),
        }
    }
}
