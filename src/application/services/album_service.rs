//! Albums of the requesting user.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::{Page, UPSTREAM_MAX_ALBUM_ID, offset};
use crate::domain::entities::{Album, UpstreamAlbum};
use crate::domain::repositories::{AlbumRepository, PhotoRepository};
use crate::domain::sync::{SYNC_PAGE_LIMIT, SyncReconciler, SyncReport, Syncable};
use crate::error::AppError;
use crate::infrastructure::upstream::{UpstreamClient, decode};

#[derive(Debug, Deserialize)]
struct AlbumEcho {
    title: Option<String>,
}

/// Service for albums owned by a user.
///
/// Holds the photo repository only to refuse deleting albums that still
/// contain photos.
pub struct AlbumService<A: AlbumRepository, P: PhotoRepository> {
    albums: Arc<A>,
    photos: Arc<P>,
    upstream: Arc<dyn UpstreamClient>,
    reconciler: Arc<SyncReconciler>,
}

impl<A: AlbumRepository, P: PhotoRepository> AlbumService<A, P> {
    pub fn new(
        albums: Arc<A>,
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

    /// Lists one page of the user's albums.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list(&self, user_id: i64, page: i64, size: i64) -> Result<Page<Album>, AppError> {
        info!(user_id, page, size, "Listing albums");

        let total = self.albums.count(user_id).await?;
        let items = self.albums.list(user_id, offset(page, size), size).await?;

        Ok(Page {
            items,
            page,
            size,
            total,
        })
    }

    /// Pulls the user's albums from the upstream into the local store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the fetch fails.
    pub async fn fetch_sync(&self, user_id: i64) -> Result<SyncReport, AppError> {
        info!(user_id, "Synchronizing albums");

        let path = format!("users/{user_id}/albums?_limit={SYNC_PAGE_LIMIT}");
        self.reconciler
            .reconcile::<UpstreamAlbum>(user_id, &path, self.albums.as_ref())
            .await
    }

    /// Finds one of the user's albums.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user owns no album with this id.
    pub async fn find(&self, user_id: i64, album_id: i64) -> Result<Album, AppError> {
        self.albums
            .find(user_id, album_id)
            .await?
            .ok_or_else(|| AppError::not_found("Album not found", json!({ "album_id": album_id })))
    }

    /// Creates an album upstream and stores the echoed record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the upstream rejects the album.
    pub async fn create(&self, user_id: i64, title: String) -> Result<Album, AppError> {
        info!(user_id, "Creating album");

        let echo = self
            .upstream
            .post("albums", json!({ "title": title, "userId": user_id }))
            .await?;
        let echoed: UpstreamAlbum = decode(echo)?;

        self.albums.create(echoed.into_local(user_id)).await
    }

    /// Renames one of the user's albums.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user owns no album with this id.
    /// Returns [`AppError::Upstream`] if the upstream rejects the update.
    pub async fn update(&self, user_id: i64, album_id: i64, title: String) -> Result<Album, AppError> {
        info!(user_id, album_id, "Updating album");

        let mut album = self.find(user_id, album_id).await?;

        let echo = self
            .upstream
            .put(
                &format!("albums/{}", album_id.min(UPSTREAM_MAX_ALBUM_ID)),
                json!({ "title": title }),
            )
            .await?;
        let echoed: AlbumEcho = decode(echo)?;
        album.title = echoed.title.unwrap_or(title);

        self.albums.update(&album).await
    }

    /// Deletes one of the user's albums upstream and locally.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user owns no album with this id.
    /// Returns [`AppError::Conflict`] if the album still contains photos;
    /// nothing is deleted and the upstream is not called.
    /// Returns [`AppError::Upstream`] if the upstream rejects the delete.
    pub async fn remove(&self, user_id: i64, album_id: i64) -> Result<String, AppError> {
        info!(user_id, album_id, "Deleting album");

        self.find(user_id, album_id).await?;

        let photos = self.photos.count(album_id).await?;
        if photos > 0 {
            warn!(album_id, photos, "Refusing to delete album with photos");
            return Err(AppError::conflict(
                "Failed to delete record because it still referenced to other records (photos)",
                json!({ "album_id": album_id, "photos": photos }),
            ));
        }

        self.upstream.delete(&format!("albums/{album_id}")).await?;

        if !self.albums.delete(user_id, album_id).await? {
            return Err(AppError::not_found(
                "Album not found",
                json!({ "album_id": album_id }),
            ));
        }

        Ok("Success delete album".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockAlbumRepository, MockPhotoRepository};
    use crate::infrastructure::cache::MemoryCache;
    use crate::infrastructure::upstream::MockUpstreamClient;

    fn album(id: i64, user_id: i64) -> Album {
        Album {
            id,
            user_id,
            title: "quidem molestiae enim".to_string(),
        }
    }

    fn service(
        albums: MockAlbumRepository,
        photos: MockPhotoRepository,
        upstream: MockUpstreamClient,
    ) -> AlbumService<MockAlbumRepository, MockPhotoRepository> {
        let upstream: Arc<dyn UpstreamClient> = Arc::new(upstream);
        let reconciler = Arc::new(SyncReconciler::new(
            Arc::new(MemoryCache::default()),
            upstream.clone(),
        ));
        AlbumService::new(Arc::new(albums), Arc::new(photos), upstream, reconciler)
    }

    #[tokio::test]
    async fn test_remove_album_with_photos_conflicts() {
        let mut albums = MockAlbumRepository::new();
        albums
            .expect_find()
            .returning(|user_id, id| Ok(Some(album(id, user_id))));
        albums.expect_delete().times(0);

        let mut photos = MockPhotoRepository::new();
        photos
            .expect_count()
            .withf(|album_id| *album_id == 4)
            .returning(|_| Ok(3));

        let mut upstream = MockUpstreamClient::new();
        upstream.expect_delete().times(0);

        let service = service(albums, photos, upstream);

        let result = service.remove(1, 4).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_remove_empty_album() {
        let mut albums = MockAlbumRepository::new();
        albums
            .expect_find()
            .returning(|user_id, id| Ok(Some(album(id, user_id))));
        albums
            .expect_delete()
            .withf(|user_id, id| *user_id == 1 && *id == 4)
            .times(1)
            .returning(|_, _| Ok(true));

        let mut photos = MockPhotoRepository::new();
        photos.expect_count().returning(|_| Ok(0));

        let mut upstream = MockUpstreamClient::new();
        upstream
            .expect_delete()
            .withf(|path| path == "albums/4")
            .times(1)
            .returning(|_| Ok(()));

        let service = service(albums, photos, upstream);

        assert_eq!(service.remove(1, 4).await.unwrap(), "Success delete album");
    }

    #[tokio::test]
    async fn test_find_other_users_album_not_found() {
        let mut albums = MockAlbumRepository::new();
        albums
            .expect_find()
            .withf(|user_id, id| *user_id == 2 && *id == 4)
            .returning(|_, _| Ok(None));

        let service = service(albums, MockPhotoRepository::new(), MockUpstreamClient::new());

        let result = service.find(2, 4).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_caps_upstream_id_and_applies_echo() {
        let mut albums = MockAlbumRepository::new();
        albums
            .expect_find()
            .returning(|user_id, id| Ok(Some(album(id, user_id))));
        albums
            .expect_update()
            .withf(|a| a.id == 120 && a.title == "renamed")
            .times(1)
            .returning(|a| Ok(a.clone()));

        let mut upstream = MockUpstreamClient::new();
        upstream
            .expect_put()
            .withf(|path, body| path == "albums/100" && body == &json!({ "title": "renamed" }))
            .times(1)
            .returning(|_, _| Ok(json!({ "id": 100, "title": "renamed" })));

        let service = service(albums, MockPhotoRepository::new(), upstream);

        let updated = service.update(1, 120, "renamed".to_string()).await.unwrap();

        assert_eq!(updated.title, "renamed");
    }

    #[tokio::test]
    async fn test_create_attaches_owner() {
        let mut albums = MockAlbumRepository::new();
        albums
            .expect_create()
            .withf(|a| a.user_id == 1 && a.title == "holiday")
            .times(1)
            .returning(|a| {
                Ok(Album {
                    id: 9,
                    user_id: a.user_id,
                    title: a.title,
                })
            });

        let mut upstream = MockUpstreamClient::new();
        upstream
            .expect_post()
            .withf(|path, body| path == "albums" && body["userId"] == 1)
            .times(1)
            .returning(|_, _| Ok(json!({ "id": 101, "userId": 1, "title": "holiday" })));

        let service = service(albums, MockPhotoRepository::new(), upstream);

        let created = service.create(1, "holiday".to_string()).await.unwrap();

        assert_eq!(created.id, 9);
    }
}
