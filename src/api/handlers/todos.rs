//! Handlers for todo endpoints.

use axum::{
    Extension, Json,
    extract::State,
};

use crate::api::dto::pagination::ListParams;
use crate::api::dto::response::{ApiResponse, PagedResponse};
use crate::api::dto::todo::{CreateTodoRequest, TodoResponse, UpdateTodoRequest};
use crate::api::extract::{ParsedPath, ValidatedJson, ValidatedQuery};
use crate::domain::entities::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the user's todos.
///
/// # Endpoint
///
/// `GET /api/todos?page=1&size=10`
pub async fn list_todos_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> Result<Json<PagedResponse<TodoResponse>>, AppError> {
    let (page, size) = params.page_and_size();
    let todos = state.todo_service.list(principal.id, page, size).await?;
    Ok(Json(PagedResponse::from_page(todos)))
}

/// Pulls the user's todos from the upstream.
///
/// # Endpoint
///
/// `GET /api/todos/fetch`
pub async fn fetch_todos_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let report = state.todo_service.fetch_sync(principal.id).await?;
    Ok(Json(ApiResponse::message(report.message)))
}

/// # Endpoint
///
/// `POST /api/todos`
pub async fn create_todo_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(payload): ValidatedJson<CreateTodoRequest>,
) -> Result<Json<ApiResponse<TodoResponse>>, AppError> {
    let todo = state
        .todo_service
        .create(principal.id, payload.into())
        .await?;
    Ok(Json(ApiResponse::data(todo.into())))
}

/// # Endpoint
///
/// `PUT /api/todos/update/{todoId}`
///
/// # Errors
///
/// Returns 404 if the user owns no such todo.
pub async fn update_todo_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ParsedPath(todo_id): ParsedPath<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateTodoRequest>,
) -> Result<Json<ApiResponse<TodoResponse>>, AppError> {
    let todo = state
        .todo_service
        .update(principal.id, todo_id, payload.into())
        .await?;
    Ok(Json(ApiResponse::data(todo.into())))
}

/// # Endpoint
///
/// `DELETE /api/todos/delete/{todoId}`
pub async fn delete_todo_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ParsedPath(todo_id): ParsedPath<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let message = state.todo_service.remove(principal.id, todo_id).await?;
    Ok(Json(ApiResponse::message(message)))
}
