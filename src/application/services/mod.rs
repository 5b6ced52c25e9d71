//! Business logic services for the application layer.

pub mod album_service;
pub mod auth_service;
pub mod photo_service;
pub mod todo_service;
pub mod user_service;

pub use album_service::AlbumService;
pub use auth_service::AuthService;
pub use photo_service::PhotoService;
pub use todo_service::TodoService;
pub use user_service::UserService;

/// One page of a scoped listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total: i64,
}

/// Row offset of a 1-based page. Saturates, so pages past the end of any
/// table yield an empty listing.
fn offset(page: i64, size: i64) -> i64 {
    (page - 1).max(0).saturating_mul(size)
}

/// Highest ids the upstream serves for each resource. Updates against local
/// ids above these are sent to the last existing upstream record instead.
const UPSTREAM_MAX_TODO_ID: i64 = 200;
const UPSTREAM_MAX_ALBUM_ID: i64 = 100;
const UPSTREAM_MAX_PHOTO_ID: i64 = 5000;
