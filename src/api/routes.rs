//! API route configuration.
//!
//! Registration and login are public; every other endpoint requires a
//! Bearer token via [`crate::api::middleware::auth`].

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};

use crate::api::handlers::{
    create_album_handler, create_photo_handler, create_todo_handler, current_user_handler,
    delete_album_handler, delete_photo_handler, delete_todo_handler, fetch_albums_handler,
    fetch_photos_handler, fetch_todos_handler, list_albums_handler, list_photos_handler,
    list_todos_handler, login_handler, register_handler, update_album_handler,
    update_photo_handler, update_todo_handler, update_user_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;

/// Routes reachable without a token.
///
/// # Endpoints
///
/// - `POST /users`        - Register an account
/// - `POST /users/login`  - Exchange credentials for a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register_handler))
        .route("/users/login", post(login_handler))
}

/// Routes protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /users/current`                      - Authenticated user
/// - `PATCH  /users`                              - Partial profile update
/// - `GET    /todos`                              - Todos (paginated)
/// - `GET    /todos/fetch`                        - Sync todos from upstream
/// - `POST   /todos`                              - Create a todo
/// - `PUT    /todos/update/{todoId}`              - Replace a todo
/// - `DELETE /todos/delete/{todoId}`              - Delete a todo
/// - `GET    /albums`                             - Albums (paginated)
/// - `GET    /albums/fetch`                       - Sync albums from upstream
/// - `POST   /albums`                             - Create an album
/// - `PUT    /albums/update/{albumId}`            - Rename an album
/// - `DELETE /albums/delete/{albumId}`            - Delete an empty album
/// - `GET    /albums/{albumId}/photos`            - Photos (paginated)
/// - `GET    /albums/{albumId}/photos/fetch`      - Sync photos from upstream
/// - `POST   /albums/{albumId}/photos`            - Create a photo
/// - `PATCH  /albums/{albumId}/photos/{photoId}`  - Partially update a photo
/// - `DELETE /albums/{albumId}/photos/{photoId}`  - Delete a photo
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users/current", get(current_user_handler))
        .route("/users", patch(update_user_handler))
        .route(
            "/todos",
            get(list_todos_handler).post(create_todo_handler),
        )
        .route("/todos/fetch", get(fetch_todos_handler))
        .route("/todos/update/{todoId}", put(update_todo_handler))
        .route("/todos/delete/{todoId}", delete(delete_todo_handler))
        .route(
            "/albums",
            get(list_albums_handler).post(create_album_handler),
        )
        .route("/albums/fetch", get(fetch_albums_handler))
        .route("/albums/update/{albumId}", put(update_album_handler))
        .route("/albums/delete/{albumId}", delete(delete_album_handler))
        .route(
            "/albums/{albumId}/photos",
            get(list_photos_handler).post(create_photo_handler),
        )
        .route("/albums/{albumId}/photos/fetch", get(fetch_photos_handler))
        .route(
            "/albums/{albumId}/photos/{photoId}",
            patch(update_photo_handler).delete(delete_photo_handler),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::layer))
}
