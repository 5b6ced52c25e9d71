//! PostgreSQL implementation of album repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{Album, NewAlbum};
use crate::domain::repositories::AlbumRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct AlbumRow {
    id: i64,
    user_id: i64,
    title: String,
}

impl From<AlbumRow> for Album {
    fn from(row: AlbumRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
        }
    }
}

/// PostgreSQL repository for albums.
///
/// Deleting an album that photos still reference fails on the foreign key
/// and surfaces as [`AppError::Conflict`].
pub struct PgAlbumRepository {
    pool: Arc<PgPool>,
}

impl PgAlbumRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlbumRepository for PgAlbumRepository {
    async fn count(&self, user_id: i64) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM albums WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list(&self, user_id: i64, offset: i64, limit: i64) -> Result<Vec<Album>, AppError> {
        let rows = sqlx::query_as::<_, AlbumRow>(
            r#"
            SELECT id, user_id, title
            FROM albums
            WHERE user_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Album::from).collect())
    }

    async fn titles(&self, user_id: i64) -> Result<Vec<String>, AppError> {
        let titles = sqlx::query_scalar::<_, String>("SELECT title FROM albums WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(titles)
    }

    async fn find(&self, user_id: i64, id: i64) -> Result<Option<Album>, AppError> {
        let row = sqlx::query_as::<_, AlbumRow>(
            "SELECT id, user_id, title FROM albums WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Album::from))
    }

    async fn create(&self, new_album: NewAlbum) -> Result<Album, AppError> {
        let row = sqlx::query_as::<_, AlbumRow>(
            r#"
            INSERT INTO albums (user_id, title)
            VALUES ($1, $2)
            RETURNING id, user_id, title
            "#,
        )
        .bind(new_album.user_id)
        .bind(&new_album.title)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn create_many(&self, albums: Vec<NewAlbum>) -> Result<u64, AppError> {
        if albums.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO albums (user_id, title) ");
        builder.push_values(albums, |mut row, album| {
            row.push_bind(album.user_id).push_bind(album.title);
        });

        let result = builder.build().execute(self.pool.as_ref()).await?;
        Ok(result.rows_affected())
    }

    async fn update(&self, album: &Album) -> Result<Album, AppError> {
        let row = sqlx::query_as::<_, AlbumRow>(
            r#"
            UPDATE albums
            SET title = $3
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title
            "#,
        )
        .bind(album.id)
        .bind(album.user_id)
        .bind(&album.title)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Album::from)
            .ok_or_else(|| AppError::not_found("Album not found", json!({ "album_id": album.id })))
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM albums WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
