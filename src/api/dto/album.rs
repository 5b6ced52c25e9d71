//! DTOs for album endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Album;

/// Body of album create and update.
#[derive(Debug, Deserialize, Validate)]
pub struct AlbumRequest {
    #[validate(required, length(min = 1, max = 100))]
    pub title: Option<String>,
}

impl AlbumRequest {
    pub fn into_title(self) -> String {
        self.title.unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
}

impl From<Album> for AlbumResponse {
    fn from(album: Album) -> Self {
        Self {
            id: album.id,
            user_id: album.user_id,
            title: album.title,
        }
    }
}
