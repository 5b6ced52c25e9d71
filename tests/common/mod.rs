#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, patch, post, put},
};
use axum_test::TestServer;
use resource_gateway::infrastructure::cache::MemoryCache;
use resource_gateway::infrastructure::upstream::HttpUpstreamClient;
use resource_gateway::routes;
use resource_gateway::state::AppState;
use resource_gateway::utils::jwt::JwtSigner;
use resource_gateway::utils::password::hash_password;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";
pub const TEST_PASSWORD: &str = "rahasia";

// ── Stub upstream ───────────────────────────────────────────────────────────
//
// Mimics the jsonplaceholder contract: creates echo the body with a fresh id,
// updates echo the body with the path id, deletes answer `{}`.

async fn echo_created(Json(mut body): Json<Value>) -> (StatusCode, Json<Value>) {
    body["id"] = json!(101);
    (StatusCode::CREATED, Json(body))
}

async fn echo_updated(Path(id): Path<i64>, Json(mut body): Json<Value>) -> Json<Value> {
    body["id"] = json!(id);
    Json(body)
}

async fn deleted() -> Json<Value> {
    Json(json!({}))
}

async fn find_users() -> Json<Value> {
    Json(json!([]))
}

async fn user_todos(Path(user_id): Path<i64>) -> Json<Value> {
    Json(json!([
        { "userId": user_id, "id": 1, "title": "delectus aut autem", "completed": false },
        { "userId": user_id, "id": 2, "title": "quis ut nam facilis et officia qui", "completed": false },
        { "userId": user_id, "id": 3, "title": "fugiat veniam minus", "completed": true },
    ]))
}

async fn user_albums(Path(user_id): Path<i64>) -> Json<Value> {
    Json(json!([
        { "userId": user_id, "id": 1, "title": "quidem molestiae enim" },
        { "userId": user_id, "id": 2, "title": "sunt qui excepturi placeat culpa" },
    ]))
}

async fn album_photos(Path(album_id): Path<i64>) -> Json<Value> {
    Json(json!([
        {
            "albumId": album_id,
            "id": 1,
            "title": "accusamus beatae ad facilis cum similique qui sunt",
            "url": "https://via.placeholder.com/600/92c952",
            "thumbnailUrl": "https://via.placeholder.com/150/92c952"
        },
        {
            "albumId": album_id,
            "id": 2,
            "title": "reprehenderit est deserunt velit ipsam",
            "url": "https://via.placeholder.com/600/771796",
            "thumbnailUrl": "https://via.placeholder.com/150/771796"
        },
    ]))
}

/// Starts the stub upstream on an ephemeral port and returns its base URL.
pub async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/users", get(find_users).post(echo_created))
        .route("/users/{id}", patch(echo_updated))
        .route("/users/{id}/todos", get(user_todos))
        .route("/users/{id}/albums", get(user_albums))
        .route("/todos", post(echo_created))
        .route("/todos/{id}", put(echo_updated).delete(deleted))
        .route("/albums", post(echo_created))
        .route("/albums/{id}", put(echo_updated).delete(deleted))
        .route("/albums/{id}/photos", get(album_photos))
        .route("/photos", post(echo_created))
        .route("/photos/{id}", patch(echo_updated).delete(deleted));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

// ── State and server ────────────────────────────────────────────────────────

pub fn create_state_with_upstream(pool: PgPool, upstream_url: &str) -> AppState {
    let upstream =
        Arc::new(HttpUpstreamClient::new(upstream_url, Duration::from_secs(2)).unwrap());

    AppState::new(
        Arc::new(pool),
        Arc::new(MemoryCache::default()),
        upstream,
        JwtSigner::new(TEST_JWT_SECRET, 3600),
    )
}

pub async fn create_test_state(pool: PgPool) -> AppState {
    let upstream_url = spawn_upstream().await;
    create_state_with_upstream(pool, &upstream_url)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(routes::router(state)).unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Registers `username` through the API and returns a fresh token.
pub async fn register_and_login(server: &TestServer, username: &str) -> String {
    server
        .post("/api/users")
        .json(&json!({
            "username": username,
            "password": TEST_PASSWORD,
            "name": "Leanne Graham",
            "phone": "1-770-736-8031"
        }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/users/login")
        .json(&json!({ "username": username, "password": TEST_PASSWORD }))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["data"]["token"]
        .as_str()
        .unwrap()
        .to_string()
}

pub async fn user_id(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ── Fixtures ────────────────────────────────────────────────────────────────

pub async fn create_test_user(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, password, name, phone) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(username)
    .bind(hash_password(TEST_PASSWORD).unwrap())
    .bind("Leanne Graham")
    .bind("1-770-736-8031")
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_todo(pool: &PgPool, user_id: i64, title: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO todos (user_id, title, completed) VALUES ($1, $2, FALSE) RETURNING id",
    )
    .bind(user_id)
    .bind(title)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_album(pool: &PgPool, user_id: i64, title: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("INSERT INTO albums (user_id, title) VALUES ($1, $2) RETURNING id")
        .bind(user_id)
        .bind(title)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_photo(pool: &PgPool, album_id: i64, title: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO photos (album_id, title, url, thumbnail_url) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(album_id)
    .bind(title)
    .bind("https://via.placeholder.com/600/92c952")
    .bind("https://via.placeholder.com/150/92c952")
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
