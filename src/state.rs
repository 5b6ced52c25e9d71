//! Shared application state injected into every handler.

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{AlbumService, AuthService, PhotoService, TodoService, UserService};
use crate::domain::sync::SyncReconciler;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{
    PgAlbumRepository, PgPhotoRepository, PgTodoRepository, PgUserRepository,
};
use crate::infrastructure::upstream::UpstreamClient;
use crate::utils::jwt::JwtSigner;

/// Services wired to the PostgreSQL repositories.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub cache: Arc<dyn CacheService>,
    pub auth_service: Arc<AuthService<PgUserRepository>>,
    pub user_service: Arc<UserService<PgUserRepository>>,
    pub todo_service: Arc<TodoService<PgTodoRepository>>,
    pub album_service: Arc<AlbumService<PgAlbumRepository, PgPhotoRepository>>,
    pub photo_service: Arc<PhotoService<PgAlbumRepository, PgPhotoRepository>>,
}

impl AppState {
    pub fn new(
        pool: Arc<PgPool>,
        cache: Arc<dyn CacheService>,
        upstream: Arc<dyn UpstreamClient>,
        signer: JwtSigner,
    ) -> Self {
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let todos = Arc::new(PgTodoRepository::new(pool.clone()));
        let albums = Arc::new(PgAlbumRepository::new(pool.clone()));
        let photos = Arc::new(PgPhotoRepository::new(pool.clone()));

        let reconciler = Arc::new(SyncReconciler::new(cache.clone(), upstream.clone()));

        let auth_service = Arc::new(AuthService::new(users.clone(), cache.clone(), signer));
        let user_service = Arc::new(UserService::new(
            users,
            upstream.clone(),
            auth_service.clone(),
        ));
        let todo_service = Arc::new(TodoService::new(
            todos,
            upstream.clone(),
            reconciler.clone(),
        ));
        let album_service = Arc::new(AlbumService::new(
            albums,
            photos.clone(),
            upstream.clone(),
            reconciler.clone(),
        ));
        let photo_service = Arc::new(PhotoService::new(
            album_service.clone(),
            photos,
            upstream,
            reconciler,
        ));

        Self {
            pool,
            cache,
            auth_service,
            user_service,
            todo_service,
            album_service,
            photo_service,
        }
    }
}
