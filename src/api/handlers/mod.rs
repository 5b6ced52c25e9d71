//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod albums;
pub mod health;
pub mod photos;
pub mod todos;
pub mod users;

pub use albums::{
    create_album_handler, delete_album_handler, fetch_albums_handler, list_albums_handler,
    update_album_handler,
};
pub use health::health_handler;
pub use photos::{
    create_photo_handler, delete_photo_handler, fetch_photos_handler, list_photos_handler,
    update_photo_handler,
};
pub use todos::{
    create_todo_handler, delete_todo_handler, fetch_todos_handler, list_todos_handler,
    update_todo_handler,
};
pub use users::{current_user_handler, login_handler, register_handler, update_user_handler};
