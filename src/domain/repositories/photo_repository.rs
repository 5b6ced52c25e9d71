//! Repository trait for photos.

use crate::domain::entities::{NewPhoto, Photo, UpstreamPhoto};
use crate::domain::sync::SyncTarget;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for photos, scoped by parent album.
///
/// Callers verify album ownership before reaching this repository.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPhotoRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// Counts the photos in `album_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, album_id: i64) -> Result<i64, AppError>;

    /// Lists one page of photos in `album_id`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, album_id: i64, offset: i64, limit: i64) -> Result<Vec<Photo>, AppError>;

    /// Returns the titles of every photo in `album_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn titles(&self, album_id: i64) -> Result<Vec<String>, AppError>;

    /// Finds a photo by id within its album.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, album_id: i64, id: i64) -> Result<Option<Photo>, AppError>;

    /// Inserts one photo.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the album does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_photo: NewPhoto) -> Result<Photo, AppError>;

    /// Inserts a batch of photos and returns the number inserted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_many(&self, photos: Vec<NewPhoto>) -> Result<u64, AppError>;

    /// Persists `title`, `url` and `thumbnail_url` of an existing photo.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no photo matches id and album.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, photo: &Photo) -> Result<Photo, AppError>;

    /// Deletes a photo. Returns `false` when no photo matched id and album.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, album_id: i64, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
impl<R: PhotoRepository> SyncTarget<UpstreamPhoto> for R {
    async fn existing_titles(&self, album_id: i64) -> Result<Vec<String>, AppError> {
        self.titles(album_id).await
    }

    async fn insert_many(&self, photos: Vec<NewPhoto>) -> Result<u64, AppError> {
        self.create_many(photos).await
    }
}
