//! Handlers for album endpoints.

use axum::{
    Extension, Json,
    extract::State,
};

use crate::api::dto::album::{AlbumRequest, AlbumResponse};
use crate::api::dto::pagination::ListParams;
use crate::api::dto::response::{ApiResponse, PagedResponse};
use crate::api::extract::{ParsedPath, ValidatedJson, ValidatedQuery};
use crate::domain::entities::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// # Endpoint
///
/// `GET /api/albums?page=1&size=10`
pub async fn list_albums_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> Result<Json<PagedResponse<AlbumResponse>>, AppError> {
    let (page, size) = params.page_and_size();
    let albums = state.album_service.list(principal.id, page, size).await?;
    Ok(Json(PagedResponse::from_page(albums)))
}

/// # Endpoint
///
/// `GET /api/albums/fetch`
pub async fn fetch_albums_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let report = state.album_service.fetch_sync(principal.id).await?;
    Ok(Json(ApiResponse::message(report.message)))
}

/// # Endpoint
///
/// `POST /api/albums`
pub async fn create_album_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(payload): ValidatedJson<AlbumRequest>,
) -> Result<Json<ApiResponse<AlbumResponse>>, AppError> {
    let album = state
        .album_service
        .create(principal.id, payload.into_title())
        .await?;
    Ok(Json(ApiResponse::data(album.into())))
}

/// # Endpoint
///
/// `PUT /api/albums/update/{albumId}`
pub async fn update_album_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ParsedPath(album_id): ParsedPath<i64>,
    ValidatedJson(payload): ValidatedJson<AlbumRequest>,
) -> Result<Json<ApiResponse<AlbumResponse>>, AppError> {
    let album = state
        .album_service
        .update(principal.id, album_id, payload.into_title())
        .await?;
    Ok(Json(ApiResponse::data(album.into())))
}

/// Deletes an empty album.
///
/// # Endpoint
///
/// `DELETE /api/albums/delete/{albumId}`
///
/// # Errors
///
/// Returns 409 if the album still contains photos.
pub async fn delete_album_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ParsedPath(album_id): ParsedPath<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let message = state.album_service.remove(principal.id, album_id).await?;
    Ok(Json(ApiResponse::message(message)))
}
