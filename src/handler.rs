use std::sync::Arc;

use axum::{Json, response::IntoResponse};
use axum::http::StatusCode;

use tracing::info;

use crate::api::{ErrorBody, HealthResponse};
use crate::config::Environment;
use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub api_token: Arc<str>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(db: Database, api_token: &str, environment: Environment) -> Self {
        AppState {
            db: Arc::new(db),
            api_token: Arc::from(api_token),
            environment,
        }
    }
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn not_found() -> impl IntoResponse {
    ErrorBody::new("Not found").into_response(StatusCode::NOT_FOUND)
}
