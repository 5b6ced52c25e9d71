mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;

#[sqlx::test]
async fn test_register_returns_profile_without_token(pool: PgPool) {
    let state = common::create_test_state(pool.clone()).await;
    let server = common::test_server(state);

    let response = server
        .post("/api/users")
        .json(&json!({
            "username": "bret",
            "password": "rahasia",
            "name": "Leanne Graham",
            "phone": "1-770-736-8031"
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["username"], "bret");
    assert_eq!(json["data"]["name"], "Leanne Graham");
    assert!(json["data"].get("token").is_none());
    assert!(json["data"].get("password").is_none());

    let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE username = 'bret'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(stored.starts_with("$argon2"));
}

#[sqlx::test]
async fn test_register_existing_username(pool: PgPool) {
    common::create_test_user(&pool, "bret").await;
    let state = common::create_test_state(pool).await;
    let server = common::test_server(state);

    let response = server
        .post("/api/users")
        .json(&json!({
            "username": "bret",
            "password": "rahasia",
            "name": "Leanne Graham",
            "phone": "1-770-736-8031"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Username already exists");
    assert_eq!(json["error_code"], 400);
}

#[sqlx::test]
async fn test_register_validation_lists_fields(pool: PgPool) {
    let state = common::create_test_state(pool).await;
    let server = common::test_server(state);

    let response = server
        .post("/api/users")
        .json(&json!({ "username": "", "password": "rahasia", "name": "Leanne Graham" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<Value>();
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["phone", "username"]);
}

#[sqlx::test]
async fn test_login_issues_token(pool: PgPool) {
    common::create_test_user(&pool, "bret").await;
    let state = common::create_test_state(pool).await;
    let server = common::test_server(state);

    let response = server
        .post("/api/users/login")
        .json(&json!({ "username": "bret", "password": common::TEST_PASSWORD }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["data"]["username"], "bret");
    assert_eq!(json["data"]["token"].as_str().unwrap().split('.').count(), 3);
}

#[sqlx::test]
async fn test_login_wrong_password(pool: PgPool) {
    common::create_test_user(&pool, "bret").await;
    let state = common::create_test_state(pool).await;
    let server = common::test_server(state);

    let response = server
        .post("/api/users/login")
        .json(&json!({ "username": "bret", "password": "salah" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["message"],
        "Username or password is invalid"
    );
}

#[sqlx::test]
async fn test_current_requires_token(pool: PgPool) {
    let state = common::create_test_state(pool).await;
    let server = common::test_server(state);

    let response = server.get("/api/users/current").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[sqlx::test]
async fn test_current_rejects_forged_token(pool: PgPool) {
    let state = common::create_test_state(pool).await;
    let server = common::test_server(state);

    let response = server
        .get("/api/users/current")
        .add_header("Authorization", common::bearer("eyJhbGciOiJIUzI1NiJ9.e30.c2lnbmF0dXJl"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn test_current_returns_principal(pool: PgPool) {
    let state = common::create_test_state(pool).await;
    let server = common::test_server(state);
    let token = common::register_and_login(&server, "bret").await;

    let response = server
        .get("/api/users/current")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["data"]["username"], "bret");
    assert_eq!(json["data"]["phone"], "1-770-736-8031");
}

#[sqlx::test]
async fn test_update_is_visible_to_next_request(pool: PgPool) {
    let state = common::create_test_state(pool).await;
    let server = common::test_server(state);
    let token = common::register_and_login(&server, "bret").await;

    // Warm the session cache.
    server
        .get("/api/users/current")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status_ok();

    let response = server
        .patch("/api/users")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "name": "Ervin Howell" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["name"], "Ervin Howell");

    let current = server
        .get("/api/users/current")
        .add_header("Authorization", common::bearer(&token))
        .await;

    let json = current.json::<Value>();
    assert_eq!(json["data"]["name"], "Ervin Howell");
    assert_eq!(json["data"]["phone"], "1-770-736-8031");
}

#[sqlx::test]
async fn test_update_password_changes_login(pool: PgPool) {
    let state = common::create_test_state(pool).await;
    let server = common::test_server(state);
    let token = common::register_and_login(&server, "bret").await;

    server
        .patch("/api/users")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "password": "baru" }))
        .await
        .assert_status_ok();

    server
        .post("/api/users/login")
        .json(&json!({ "username": "bret", "password": common::TEST_PASSWORD }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .post("/api/users/login")
        .json(&json!({ "username": "bret", "password": "baru" }))
        .await
        .assert_status_ok();
}
