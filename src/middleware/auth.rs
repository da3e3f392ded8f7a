//! Static bearer-token gate.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

/// Token from an `Authorization: Bearer <token>` header value. Scheme is case-insensitive.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Short-circuits with 401 unless the request carries the configured token.
pub async fn require_bearer_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .is_some_and(|token| token == state.config.api_token);

    if !authorized {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "unauthorized request"
        );
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(request).await)
}
