//! Handlers for photo endpoints nested under an album.

use axum::{
    Extension, Json,
    extract::State,
};

use crate::api::dto::pagination::ListParams;
use crate::api::dto::photo::{CreatePhotoRequest, PhotoResponse, UpdatePhotoRequest};
use crate::api::dto::response::{ApiResponse, PagedResponse};
use crate::api::extract::{ParsedPath, ValidatedJson, ValidatedQuery};
use crate::domain::entities::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// # Endpoint
///
/// `GET /api/albums/{albumId}/photos?page=1&size=10`
///
/// # Errors
///
/// Returns 404 if the user owns no such album.
pub async fn list_photos_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ParsedPath(album_id): ParsedPath<i64>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> Result<Json<PagedResponse<PhotoResponse>>, AppError> {
    let (page, size) = params.page_and_size();
    let photos = state
        .photo_service
        .list(principal.id, album_id, page, size)
        .await?;
    Ok(Json(PagedResponse::from_page(photos)))
}

/// # Endpoint
///
/// `GET /api/albums/{albumId}/photos/fetch`
pub async fn fetch_photos_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ParsedPath(album_id): ParsedPath<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let report = state
        .photo_service
        .fetch_sync(principal.id, album_id)
        .await?;
    Ok(Json(ApiResponse::message(report.message)))
}

/// # Endpoint
///
/// `POST /api/albums/{albumId}/photos`
pub async fn create_photo_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ParsedPath(album_id): ParsedPath<i64>,
    ValidatedJson(payload): ValidatedJson<CreatePhotoRequest>,
) -> Result<Json<ApiResponse<PhotoResponse>>, AppError> {
    let photo = state
        .photo_service
        .create(principal.id, album_id, payload.into())
        .await?;
    Ok(Json(ApiResponse::data(photo.into())))
}

/// Partially updates a photo; absent fields stay unchanged.
///
/// # Endpoint
///
/// `PATCH /api/albums/{albumId}/photos/{photoId}`
pub async fn update_photo_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ParsedPath((album_id, photo_id)): ParsedPath<(i64, i64)>,
    ValidatedJson(payload): ValidatedJson<UpdatePhotoRequest>,
) -> Result<Json<ApiResponse<PhotoResponse>>, AppError> {
    let photo = state
        .photo_service
        .update(principal.id, album_id, photo_id, payload.into())
        .await?;
    Ok(Json(ApiResponse::data(photo.into())))
}

/// # Endpoint
///
/// `DELETE /api/albums/{albumId}/photos/{photoId}`
pub async fn delete_photo_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ParsedPath((album_id, photo_id)): ParsedPath<(i64, i64)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let message = state
        .photo_service
        .remove(principal.id, album_id, photo_id)
        .await?;
    Ok(Json(ApiResponse::message(message)))
}
