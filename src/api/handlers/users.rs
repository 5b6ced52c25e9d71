//! Handlers for user endpoints.

use axum::{Extension, Json, extract::State};

use crate::api::dto::response::ApiResponse;
use crate::api::dto::user::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest, UserResponse};
use crate::api::extract::ValidatedJson;
use crate::domain::entities::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Errors
///
/// Returns 400 if validation fails or the username is taken.
pub async fn register_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.user_service.register(payload.into()).await?;
    Ok(Json(ApiResponse::data(user.into())))
}

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /api/users/login`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "data": { "username": "bret", "name": "Leanne Graham", "phone": "...", "token": "eyJ..." }
/// }
/// ```
///
/// # Errors
///
/// Returns 401 for an unknown user or a wrong password.
pub async fn login_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let (user, token) = state.user_service.login(&username, &password).await?;

    let mut response = UserResponse::from(user);
    response.token = Some(token);
    Ok(Json(ApiResponse::data(response)))
}

/// Returns the authenticated user.
///
/// # Endpoint
///
/// `GET /api/users/current`
pub async fn current_user_handler(
    Extension(principal): Extension<Principal>,
) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::data(principal.into()))
}

/// Partially updates the authenticated user.
///
/// # Endpoint
///
/// `PATCH /api/users`
///
/// # Errors
///
/// Returns 400 if validation fails.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state
        .user_service
        .update(&principal, payload.into())
        .await?;
    Ok(Json(ApiResponse::data(user.into())))
}
