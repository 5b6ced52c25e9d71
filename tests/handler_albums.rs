mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;

#[sqlx::test]
async fn test_fetch_albums(pool: PgPool) {
    let state = common::create_test_state(pool.clone()).await;
    let server = common::test_server(state);
    let token = common::register_and_login(&server, "bret").await;

    let response = server
        .get("/api/albums/fetch")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "Success fetch 2 data");

    let list = server
        .get("/api/albums?page=1&size=10")
        .add_header("Authorization", common::bearer(&token))
        .await;

    let json = list.json::<Value>();
    assert_eq!(json["paging"]["total_record"], 2);
    assert_eq!(json["data"][0]["title"], "quidem molestiae enim");
}

#[sqlx::test]
async fn test_create_and_rename_album(pool: PgPool) {
    let state = common::create_test_state(pool).await;
    let server = common::test_server(state);
    let token = common::register_and_login(&server, "bret").await;

    let created = server
        .post("/api/albums")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "title": "holiday" }))
        .await;
    created.assert_status_ok();
    let album_id = created.json::<Value>()["data"]["id"].as_i64().unwrap();

    let renamed = server
        .put(&format!("/api/albums/update/{album_id}"))
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "title": "summer holiday" }))
        .await;

    renamed.assert_status_ok();
    assert_eq!(renamed.json::<Value>()["data"]["title"], "summer holiday");
}

#[sqlx::test]
async fn test_album_title_is_validated(pool: PgPool) {
    let state = common::create_test_state(pool).await;
    let server = common::test_server(state);
    let token = common::register_and_login(&server, "bret").await;

    let response = server
        .post("/api/albums")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "title": "x".repeat(101) }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["errors"][0]["field"], "title");
}

#[sqlx::test]
async fn test_delete_album_with_photos_conflicts(pool: PgPool) {
    let state = common::create_test_state(pool.clone()).await;
    let server = common::test_server(state);
    let token = common::register_and_login(&server, "bret").await;
    let user_id = common::user_id(&pool, "bret").await;
    let album_id = common::create_test_album(&pool, user_id, "full").await;
    common::create_test_photo(&pool, album_id, "still here").await;

    let response = server
        .delete(&format!("/api/albums/delete/{album_id}"))
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["message"],
        "Failed to delete record because it still referenced to other records (photos)"
    );
    assert_eq!(common::count_rows(&pool, "albums").await, 1);
    assert_eq!(common::count_rows(&pool, "photos").await, 1);
}

#[sqlx::test]
async fn test_delete_empty_album(pool: PgPool) {
    let state = common::create_test_state(pool.clone()).await;
    let server = common::test_server(state);
    let token = common::register_and_login(&server, "bret").await;
    let user_id = common::user_id(&pool, "bret").await;
    let album_id = common::create_test_album(&pool, user_id, "empty").await;

    let response = server
        .delete(&format!("/api/albums/delete/{album_id}"))
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "Success delete album");
    assert_eq!(common::count_rows(&pool, "albums").await, 0);
}
