//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access and are implemented by concrete
//! repositories in `crate::infrastructure::persistence`. Mock implementations
//! are auto-generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Account lookup and profile updates
//! - [`TodoRepository`] - Todos scoped by owner
//! - [`AlbumRepository`] - Albums scoped by owner
//! - [`PhotoRepository`] - Photos scoped by album
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod album_repository;
pub mod photo_repository;
pub mod todo_repository;
pub mod user_repository;

pub use album_repository::AlbumRepository;
pub use photo_repository::PhotoRepository;
pub use todo_repository::TodoRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use album_repository::MockAlbumRepository;
#[cfg(test)]
pub use photo_repository::MockPhotoRepository;
#[cfg(test)]
pub use todo_repository::MockTodoRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
