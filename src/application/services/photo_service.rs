//! Photos inside an album owned by the requesting user.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use super::{AlbumService, Page, UPSTREAM_MAX_PHOTO_ID, offset};
use crate::domain::entities::{Photo, PhotoChanges, PhotoInput, UpstreamPhoto};
use crate::domain::repositories::{AlbumRepository, PhotoRepository};
use crate::domain::sync::{SYNC_PAGE_LIMIT, SyncReconciler, SyncReport, Syncable};
use crate::error::AppError;
use crate::infrastructure::upstream::{UpstreamClient, decode};

/// Service for photos.
///
/// Every operation first resolves the parent album under the requesting
/// user, so photos of someone else's album are indistinguishable from
/// missing ones.
pub struct PhotoService<A: AlbumRepository, P: PhotoRepository> {
    albums: Arc<AlbumService<A, P>>,
    photos: Arc<P>,
    upstream: Arc<dyn UpstreamClient>,
    reconciler: Arc<SyncReconciler>,
}

impl<A: AlbumRepository, P: PhotoRepository> PhotoService<A, P> {
    pub fn new(
        albums: Arc<AlbumService<A, P>>,
        photos: Arc<P>,
        upstream: Arc<dyn UpstreamClient>,
        reconciler: Arc<SyncReconciler>,
    ) -> Self {
        Self {
            albums,
            photos,
            upstream,
            reconciler,
        }
    }

    /// Lists one page of photos in one of the user's albums.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user owns no album with this id.
    pub async fn list(
        &self,
        user_id: i64,
        album_id: i64,
        page: i64,
        size: i64,
    ) -> Result<Page<Photo>, AppError> {
        info!(user_id, album_id, page, size, "Listing photos");

        self.albums.find(user_id, album_id).await?;

        let total = self.photos.count(album_id).await?;
        let items = self.photos.list(album_id, offset(page, size), size).await?;

        Ok(Page {
            items,
            page,
            size,
            total,
        })
    }

    /// Pulls an album's photos from the upstream into the local store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user owns no album with this id.
    /// Returns [`AppError::Upstream`] if the fetch fails.
    pub async fn fetch_sync(&self, user_id: i64, album_id: i64) -> Result<SyncReport, AppError> {
        info!(user_id, album_id, "Synchronizing photos");

        self.albums.find(user_id, album_id).await?;

        let path = format!("albums/{album_id}/photos?_limit={SYNC_PAGE_LIMIT}");
        self.reconciler
            .reconcile::<UpstreamPhoto>(album_id, &path, self.photos.as_ref())
            .await
    }

    /// Finds a photo in one of the user's albums.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the album or the photo is missing.
    pub async fn find(&self, user_id: i64, album_id: i64, photo_id: i64) -> Result<Photo, AppError> {
        self.albums.find(user_id, album_id).await?;

        self.photos
            .find(album_id, photo_id)
            .await?
            .ok_or_else(|| AppError::not_found("Photo not found", json!({ "photo_id": photo_id })))
    }

    /// Creates a photo upstream and stores the echoed record in the album.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user owns no album with this id.
    /// Returns [`AppError::Upstream`] if the upstream rejects the photo.
    pub async fn create(&self, user_id: i64, album_id: i64, input: PhotoInput) -> Result<Photo, AppError> {
        info!(user_id, album_id, "Creating photo");

        self.albums.find(user_id, album_id).await?;

        let echo = self
            .upstream
            .post(
                "photos",
                json!({
                    "title": input.title,
                    "url": input.url,
                    "thumbnailUrl": input.thumbnail_url,
                    "albumId": album_id,
                }),
            )
            .await?;
        let echoed: UpstreamPhoto = decode(echo)?;

        self.photos.create(echoed.into_local(album_id)).await
    }

    /// Applies a partial update to a photo.
    ///
    /// Only the fields present in `changes` are overwritten locally.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the album or the photo is missing.
    /// Returns [`AppError::Upstream`] if the upstream rejects the update.
    pub async fn update(
        &self,
        user_id: i64,
        album_id: i64,
        photo_id: i64,
        changes: PhotoChanges,
    ) -> Result<Photo, AppError> {
        info!(user_id, album_id, photo_id, "Updating photo");

        let mut photo = self.find(user_id, album_id, photo_id).await?;

        let body = serde_json::to_value(&changes).map_err(|e| {
            AppError::internal("Failed to encode request", json!({ "reason": e.to_string() }))
        })?;
        let echo = self
            .upstream
            .patch(&format!("photos/{}", photo_id.min(UPSTREAM_MAX_PHOTO_ID)), body)
            .await?;
        let echoed: PhotoChanges = decode(echo)?;

        photo.apply_changes(changes, echoed);

        self.photos.update(&photo).await
    }

    /// Deletes a photo upstream and locally.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the album or the photo is missing.
    /// Returns [`AppError::Upstream`] if the upstream rejects the delete.
    pub async fn remove(&self, user_id: i64, album_id: i64, photo_id: i64) -> Result<String, AppError> {
        info!(user_id, album_id, photo_id, "Deleting photo");

        self.find(user_id, album_id, photo_id).await?;
        self.upstream.delete(&format!("photos/{photo_id}")).await?;

        if !self.photos.delete(album_id, photo_id).await? {
            return Err(AppError::not_found(
                "Photo not found",
                json!({ "photo_id": photo_id }),
            ));
        }

        Ok("Success delete photo".to_string())
    }
}
