//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! runtime-bound queries and `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User accounts
//! - [`PgTodoRepository`] - Todos scoped by owner
//! - [`PgAlbumRepository`] - Albums scoped by owner
//! - [`PgPhotoRepository`] - Photos scoped by album

pub mod pg_album_repository;
pub mod pg_photo_repository;
pub mod pg_todo_repository;
pub mod pg_user_repository;

pub use pg_album_repository::PgAlbumRepository;
pub use pg_photo_repository::PgPhotoRepository;
pub use pg_todo_repository::PgTodoRepository;
pub use pg_user_repository::PgUserRepository;
