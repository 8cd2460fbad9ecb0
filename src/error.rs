use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::{ErrorBody, UnauthorizedBody};
use crate::config::Environment;

const GENERIC_SERVER_ERROR: &str = "server error";

/// A write payload that breaks one of the bookmark field rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("'{0}' is required")]
    MissingField(&'static str),
    #[error("'url' must be a valid URL")]
    InvalidUrl,
    #[error("'rating' must be an integer between 1 and 5")]
    InvalidRating,
    #[error("Request body must contain either 'title', 'url', 'description' or 'rating'")]
    EmptyUpdate,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("bookmark not found")]
    NotFound,
    #[error("database error")]
    Database(#[from] libsql::Error),
    #[error("invalid bookmark row: {0}")]
    InvalidRow(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    MalformedBody(String),
    #[error("Bookmark does not exist")]
    NotFound,
    #[error("Unauthorized request")]
    Unauthorized,
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Maps a store failure onto the HTTP taxonomy. Outside production the full
    /// error chain is returned to the client.
    pub fn from_store(err: StoreError, environment: Environment) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            other => {
                let detail = crate::unpack_error(&other);
                tracing::error!(error = %detail, "persistence failure");
                if environment.is_production() {
                    ApiError::Internal(GENERIC_SERVER_ERROR.to_string())
                } else {
                    ApiError::Internal(detail)
                }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        use ApiError::*;
        match self {
            Validation(_) | MalformedBody(_) => StatusCode::BAD_REQUEST,
            NotFound => StatusCode::NOT_FOUND,
            Unauthorized => StatusCode::UNAUTHORIZED,
            Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        match self {
            ApiError::Unauthorized => UnauthorizedBody::new(&message).into_response(status),
            _ => ErrorBody::new(&message).into_response(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(ValidationError::InvalidRating).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_store_not_found_maps_to_api_not_found() {
        let err = ApiError::from_store(StoreError::NotFound, Environment::Production);
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn test_production_hides_store_details() {
        let err = ApiError::from_store(
            StoreError::InvalidRow("rating 9".to_string()),
            Environment::Production,
        );
        assert_eq!(err.to_string(), GENERIC_SERVER_ERROR);

        let err = ApiError::from_store(
            StoreError::InvalidRow("rating 9".to_string()),
            Environment::Development,
        );
        assert_eq!(err.to_string(), "invalid bookmark row: rating 9");
    }

    #[test]
    fn test_missing_field_message_names_the_field() {
        assert_eq!(
            ValidationError::MissingField("title").to_string(),
            "'title' is required"
        );
    }
}
