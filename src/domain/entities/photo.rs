//! Photo entity, child of an album.

use serde::{Deserialize, Serialize};

use crate::domain::sync::Syncable;

/// A photo stored locally.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub id: i64,
    pub album_id: i64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

impl Photo {
    /// Applies an upstream-confirmed partial update.
    ///
    /// Only fields present in `requested` change. Each takes the value the
    /// upstream echoed for it, or the requested value when the echo omits it.
    /// Echoed fields that were not requested are ignored.
    pub fn apply_changes(&mut self, requested: PhotoChanges, echoed: PhotoChanges) {
        if let Some(title) = requested.title {
            self.title = echoed.title.unwrap_or(title);
        }
        if let Some(url) = requested.url {
            self.url = echoed.url.unwrap_or(url);
        }
        if let Some(thumbnail_url) = requested.thumbnail_url {
            self.thumbnail_url = echoed.thumbnail_url.unwrap_or(thumbnail_url);
        }
    }
}

/// Input data for inserting a photo.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPhoto {
    pub album_id: i64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

/// Validated photo content from a create request.
#[derive(Debug, Clone)]
pub struct PhotoInput {
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

/// A partial photo: the fields of an update request, or the fields the
/// upstream echoed back for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// A photo as the upstream API returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamPhoto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: String,
}

impl Syncable for UpstreamPhoto {
    type Local = NewPhoto;
    const RESOURCE: &'static str = "photo";

    fn title(&self) -> &str {
        &self.title
    }

    fn into_local(self, scope_id: i64) -> NewPhoto {
        NewPhoto {
            album_id: scope_id,
            title: self.title,
            url: self.url,
            thumbnail_url: self.thumbnail_url,
        }
    }
}
