//! PostgreSQL implementation of photo repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{NewPhoto, Photo};
use crate::domain::repositories::PhotoRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct PhotoRow {
    id: i64,
    album_id: i64,
    title: String,
    url: String,
    thumbnail_url: String,
}

impl From<PhotoRow> for Photo {
    fn from(row: PhotoRow) -> Self {
        Self {
            id: row.id,
            album_id: row.album_id,
            title: row.title,
            url: row.url,
            thumbnail_url: row.thumbnail_url,
        }
    }
}

/// PostgreSQL repository for photos, filtered on `album_id`.
pub struct PgPhotoRepository {
    pool: Arc<PgPool>,
}

impl PgPhotoRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    async fn count(&self, album_id: i64) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM photos WHERE album_id = $1")
            .bind(album_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list(&self, album_id: i64, offset: i64, limit: i64) -> Result<Vec<Photo>, AppError> {
        let rows = sqlx::query_as::<_, PhotoRow>(
            r#"
            SELECT id, album_id, title, url, thumbnail_url
            FROM photos
            WHERE album_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(album_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Photo::from).collect())
    }

    async fn titles(&self, album_id: i64) -> Result<Vec<String>, AppError> {
        let titles = sqlx::query_scalar::<_, String>("SELECT title FROM photos WHERE album_id = $1")
            .bind(album_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(titles)
    }

    async fn find(&self, album_id: i64, id: i64) -> Result<Option<Photo>, AppError> {
        let row = sqlx::query_as::<_, PhotoRow>(
            r#"
            SELECT id, album_id, title, url, thumbnail_url
            FROM photos
            WHERE id = $1 AND album_id = $2
            "#,
        )
        .bind(id)
        .bind(album_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Photo::from))
    }

    async fn create(&self, new_photo: NewPhoto) -> Result<Photo, AppError> {
        let row = sqlx::query_as::<_, PhotoRow>(
            r#"
            INSERT INTO photos (album_id, title, url, thumbnail_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, album_id, title, url, thumbnail_url
            "#,
        )
        .bind(new_photo.album_id)
        .bind(&new_photo.title)
        .bind(&new_photo.url)
        .bind(&new_photo.thumbnail_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn create_many(&self, photos: Vec<NewPhoto>) -> Result<u64, AppError> {
        if photos.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO photos (album_id, title, url, thumbnail_url) ");
        builder.push_values(photos, |mut row, photo| {
            row.push_bind(photo.album_id)
                .push_bind(photo.title)
                .push_bind(photo.url)
                .push_bind(photo.thumbnail_url);
        });

        let result = builder.build().execute(self.pool.as_ref()).await?;
        Ok(result.rows_affected())
    }

    async fn update(&self, photo: &Photo) -> Result<Photo, AppError> {
        let row = sqlx::query_as::<_, PhotoRow>(
            r#"
            UPDATE photos
            SET title = $3, url = $4, thumbnail_url = $5
            WHERE id = $1 AND album_id = $2
            RETURNING id, album_id, title, url, thumbnail_url
            "#,
        )
        .bind(photo.id)
        .bind(photo.album_id)
        .bind(&photo.title)
        .bind(&photo.url)
        .bind(&photo.thumbnail_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Photo::from)
            .ok_or_else(|| AppError::not_found("Photo not found", json!({ "photo_id": photo.id })))
    }

    async fn delete(&self, album_id: i64, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1 AND album_id = $2")
            .bind(id)
            .bind(album_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
