//! Album entity, owned by a user and parent of photos.

use serde::{Deserialize, Serialize};

use crate::domain::sync::Syncable;

/// An album stored locally.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
}

/// Input data for inserting an album.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlbum {
    pub user_id: i64,
    pub title: String,
}

/// An album as the upstream API returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamAlbum {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub title: String,
}

impl Syncable for UpstreamAlbum {
    type Local = NewAlbum;
    const RESOURCE: &'static str = "album";

    fn title(&self) -> &str {
        &self.title
    }

    fn into_local(self, scope_id: i64) -> NewAlbum {
        NewAlbum {
            user_id: scope_id,
            title: self.title,
        }
    }
}
