//! Bookmark CRUD handlers: list, create, read, update, delete.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::Bookmark;
use crate::response::{created, success_many, success_one};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{OriginalUri, Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};

/// Shared precondition of the `/:id` routes: looks the record up and hands it to the
/// handler as an `Extension<Bookmark>`, or answers 404.
pub async fn load_bookmark(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // A non-numeric id cannot name a record.
    let id: i64 = id_str.parse().map_err(|_| AppError::NotFound)?;
    let bookmark = state.store.get_by_id(id).await?.ok_or(AppError::NotFound)?;
    request.extensions_mut().insert(bookmark);
    Ok(next.run(request).await)
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bookmarks = state.store.list_all().await?;
    Ok(success_many(&bookmarks))
}

pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let new = RequestValidator::validate_create(&body)?;
    let bookmark = state.store.insert(new).await?;
    tracing::info!(id = bookmark.id, "bookmark created");
    Ok(created(uri.path(), &bookmark))
}

pub async fn read(Extension(bookmark): Extension<Bookmark>) -> impl IntoResponse {
    success_one(&bookmark)
}

pub async fn update(
    State(state): State<AppState>,
    Extension(bookmark): Extension<Bookmark>,
    JsonBody(body): JsonBody,
) -> Result<StatusCode, AppError> {
    let patch = RequestValidator::validate_update(&body)?;
    let affected = state.store.update(bookmark.id, patch).await?;
    tracing::info!(id = bookmark.id, affected, "bookmark updated");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(bookmark): Extension<Bookmark>,
) -> Result<StatusCode, AppError> {
    let affected = state.store.delete(bookmark.id).await?;
    tracing::info!(id = bookmark.id, affected, "bookmark deleted");
    Ok(StatusCode::NO_CONTENT)
}
