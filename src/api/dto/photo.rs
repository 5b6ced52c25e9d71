//! DTOs for photo endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Photo, PhotoChanges, PhotoInput};

/// `POST /api/albums/{albumId}/photos` body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePhotoRequest {
    #[validate(required, length(min = 1, max = 100))]
    pub title: Option<String>,

    #[validate(required, length(min = 1, max = 100))]
    pub url: Option<String>,

    #[validate(required, length(min = 1, max = 100))]
    pub thumbnail_url: Option<String>,
}

impl From<CreatePhotoRequest> for PhotoInput {
    fn from(req: CreatePhotoRequest) -> Self {
        Self {
            title: req.title.unwrap_or_default(),
            url: req.url.unwrap_or_default(),
            thumbnail_url: req.thumbnail_url.unwrap_or_default(),
        }
    }
}

/// `PATCH /api/albums/{albumId}/photos/{photoId}` body. Absent fields stay unchanged.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhotoRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub url: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub thumbnail_url: Option<String>,
}

impl From<UpdatePhotoRequest> for PhotoChanges {
    fn from(req: UpdatePhotoRequest) -> Self {
        Self {
            title: req.title,
            url: req.url,
            thumbnail_url: req.thumbnail_url,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub id: i64,
    pub album_id: i64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            album_id: photo.album_id,
            title: photo.title,
            url: photo.url,
            thumbnail_url: photo.thumbnail_url,
        }
    }
}
