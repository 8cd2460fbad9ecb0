//! HTTP Handlers for the Bookmarks API

use axum::{
    Json,
    extract::{FromRequestParts, OriginalUri, Path, State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION, request::Parts},
    response::{IntoResponse, Response},
};

use super::sanitize;
use super::validation::{BookmarkFields, validate_create, validate_update};
use super::{Bookmark, Bookmarks};
use crate::error::ApiError;
use crate::handler::AppState;

/// A bookmark looked up from the `:id` path segment.
///
/// Every single-item route resolves through this extractor, so a missing or
/// unparseable id always ends in the same 404 before the handler body runs.
pub struct ResolvedBookmark(pub Bookmark);

#[axum::async_trait]
impl FromRequestParts<AppState> for ResolvedBookmark {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        let Ok(id) = raw_id.parse::<i64>() else {
            tracing::error!("Bookmark with id {} does not exist", raw_id);
            return Err(ApiError::NotFound);
        };

        let store = Bookmarks::new(state.db.connection());
        match store.get_by_id(id).await {
            Ok(Some(bookmark)) => Ok(ResolvedBookmark(bookmark)),
            Ok(None) => {
                tracing::error!("Bookmark with id {} does not exist", id);
                Err(ApiError::NotFound)
            }
            Err(e) => Err(ApiError::from_store(e, state.environment)),
        }
    }
}

pub async fn list_bookmarks(State(state): State<AppState>) -> Result<Response, ApiError> {
    let store = Bookmarks::new(state.db.connection());

    let bookmarks = store
        .list_all()
        .await
        .map_err(|e| ApiError::from_store(e, state.environment))?;

    tracing::info!("listed {} bookmarks", bookmarks.len());
    let served: Vec<Bookmark> = bookmarks.into_iter().map(sanitize::bookmark).collect();
    Ok((StatusCode::OK, Json(served)).into_response())
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<BookmarkFields>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(fields) = payload?;
    let draft = validate_create(fields).map_err(|e| {
        tracing::warn!("rejected bookmark create: {}", e);
        e
    })?;

    let store = Bookmarks::new(state.db.connection());
    let bookmark = store
        .insert(draft)
        .await
        .map_err(|e| ApiError::from_store(e, state.environment))?;

    tracing::info!("Bookmark with id {} created", bookmark.id);
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), bookmark.id);

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(sanitize::bookmark(bookmark)),
    )
        .into_response())
}

pub async fn get_bookmark(ResolvedBookmark(bookmark): ResolvedBookmark) -> Response {
    tracing::info!("Bookmark with id {} fetched", bookmark.id);
    (StatusCode::OK, Json(sanitize::bookmark(bookmark))).into_response()
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    ResolvedBookmark(bookmark): ResolvedBookmark,
    payload: Result<Json<BookmarkFields>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(fields) = payload?;
    let changes = validate_update(fields).map_err(|e| {
        tracing::warn!("rejected update for bookmark {}: {}", bookmark.id, e);
        e
    })?;

    let store = Bookmarks::new(state.db.connection());
    store
        .update(bookmark.id, changes)
        .await
        .map_err(|e| ApiError::from_store(e, state.environment))?;

    tracing::info!("Bookmark with id {} updated", bookmark.id);
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn delete_bookmark(
    State(state): State<AppState>,
    ResolvedBookmark(bookmark): ResolvedBookmark,
) -> Result<Response, ApiError> {
    let store = Bookmarks::new(state.db.connection());
    store
        .delete(bookmark.id)
        .await
        .map_err(|e| ApiError::from_store(e, state.environment))?;

    tracing::info!("Bookmark with id {} deleted", bookmark.id);
    Ok(StatusCode::NO_CONTENT.into_response())
}
