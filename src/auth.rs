use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::errors::AppError;

/// Bearer access token forwarded verbatim from the `Authorization` header.
/// Obtaining and refreshing the token is the OAuth layer's job; every
/// upstream call simply relays it.
pub struct AccessToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AccessToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .filter(|token| !token.is_empty())
            .map(|token| AccessToken(token.to_string()))
            .ok_or(AppError::Unauthorized)
    }
}
