//! Repository trait for albums.

use crate::domain::entities::{Album, NewAlbum, UpstreamAlbum};
use crate::domain::sync::SyncTarget;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for albums, scoped by owner.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAlbumRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    /// Counts the albums owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, user_id: i64) -> Result<i64, AppError>;

    /// Lists one page of albums owned by `user_id`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, user_id: i64, offset: i64, limit: i64) -> Result<Vec<Album>, AppError>;

    /// Returns the titles of every album owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn titles(&self, user_id: i64) -> Result<Vec<String>, AppError>;

    /// Finds an album by id within the owner's scope.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, user_id: i64, id: i64) -> Result<Option<Album>, AppError>;

    /// Inserts one album.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_album: NewAlbum) -> Result<Album, AppError>;

    /// Inserts a batch of albums and returns the number inserted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_many(&self, albums: Vec<NewAlbum>) -> Result<u64, AppError>;

    /// Persists the title of an existing album.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no album matches id and owner.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, album: &Album) -> Result<Album, AppError>;

    /// Deletes an album. Returns `false` when no album matched id and owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if photos still reference the album.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
impl<R: AlbumRepository> SyncTarget<UpstreamAlbum> for R {
    async fn existing_titles(&self, user_id: i64) -> Result<Vec<String>, AppError> {
        self.titles(user_id).await
    }

    async fn insert_many(&self, albums: Vec<NewAlbum>) -> Result<u64, AppError> {
        self.create_many(albums).await
    }
}
