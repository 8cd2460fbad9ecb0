use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: String,
}

/// `{"error": {"message": "..."}}`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: ErrorMessage,
}

impl ErrorBody {
    pub fn new(msg: &str) -> Self {
        ErrorBody {
            error: ErrorMessage {
                message: msg.to_owned(),
            },
        }
    }

    pub fn into_response(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// `{"error": "..."}`, only used by the auth gate.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnauthorizedBody {
    pub error: String,
}

impl UnauthorizedBody {
    pub fn new(msg: &str) -> Self {
        UnauthorizedBody {
            error: msg.to_owned(),
        }
    }

    pub fn into_response(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
