use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::handler::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Rejects any request whose `Authorization` header is not `Bearer <api_token>`.
pub async fn require_bearer_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX));

    if !token_matches(presented, &state.api_token) {
        tracing::error!(path = %request.uri().path(), "unauthorized request");
        return ApiError::Unauthorized.into_response();
    }

    next.run(request).await
}

fn token_matches(presented: Option<&str>, expected: &str) -> bool {
    match presented {
        Some(token) => !expected.is_empty() && token == expected,
        None => false,
    }
}
