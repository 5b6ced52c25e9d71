//! Application layer services implementing business logic.
//!
//! Services orchestrate upstream calls, repository access and cache use.
//! They consume repository traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Token issue and session resolution
//! - [`services::user_service::UserService`] - Registration, login, profile updates
//! - [`services::todo_service::TodoService`] - Todos of the requesting user
//! - [`services::album_service::AlbumService`] - Albums of the requesting user
//! - [`services::photo_service::PhotoService`] - Photos inside an owned album

pub mod services;
