//! Account registration, login and profile updates.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::application::services::AuthService;
use crate::domain::entities::{NewUser, Principal, UpstreamUser, User, UserChanges};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::upstream::{UpstreamClient, decode};
use crate::utils::password::{hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "Username or password is invalid";

/// Service for user accounts.
///
/// Every account change is mirrored to the upstream `users` resource first;
/// the local record is written from the upstream echo.
pub struct UserService<U: UserRepository> {
    users: Arc<U>,
    upstream: Arc<dyn UpstreamClient>,
    auth: Arc<AuthService<U>>,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(users: Arc<U>, upstream: Arc<dyn UpstreamClient>, auth: Arc<AuthService<U>>) -> Self {
        Self {
            users,
            upstream,
            auth,
        }
    }

    /// Registers a new account. `new_user.password` is plain text.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the username is taken.
    /// Returns [`AppError::Upstream`] if the upstream rejects the profile.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn register(&self, new_user: NewUser) -> Result<User, AppError> {
        info!(username = %new_user.username, "Registering user");

        if self
            .users
            .find_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(AppError::bad_request(
                "Username already exists",
                json!({ "username": new_user.username }),
            ));
        }

        let echo = self
            .upstream
            .post(
                "users",
                json!({
                    "username": new_user.username,
                    "password": new_user.password,
                    "name": new_user.name,
                    "phone": new_user.phone,
                }),
            )
            .await?;
        let echoed: UpstreamUser = decode(echo)?;

        self.users
            .create(NewUser {
                username: echoed.username,
                password: hash_password(&new_user.password)?,
                name: echoed.name,
                phone: echoed.phone,
            })
            .await
    }

    /// Verifies credentials and issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown user or a wrong password.
    /// Returns [`AppError::Upstream`] if the upstream lookup fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, String), AppError> {
        info!(username, "User login");

        let query: String = url::form_urlencoded::byte_serialize(username.as_bytes()).collect();
        self.upstream.get(&format!("users?username={query}")).await?;

        let user = self
            .users
            .find_by_username(username)
            .await?
            .filter(|user| verify_password(password, &user.password))
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS, json!({})))?;

        let token = self.auth.create_token(&user.username);
        Ok((user, token))
    }

    /// Applies a partial profile update and drops the cached session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account disappeared.
    /// Returns [`AppError::Upstream`] if the upstream rejects the update.
    pub async fn update(&self, principal: &Principal, changes: UserChanges) -> Result<User, AppError> {
        info!(user_id = principal.id, "Updating user");

        let mut user = self
            .users
            .find_by_username(&principal.username)
            .await?
            .ok_or_else(|| {
                AppError::not_found("User not found", json!({ "username": principal.username }))
            })?;

        let body = serde_json::to_value(&changes).map_err(|e| {
            AppError::internal("Failed to encode request", json!({ "reason": e.to_string() }))
        })?;
        let echo = self.upstream.patch(&format!("users/{}", user.id), body).await?;
        let echoed: UserChanges = decode(echo)?;

        if let Some(password) = changes.password {
            user.password = hash_password(&echoed.password.unwrap_or(password))?;
        }
        if let Some(name) = changes.name {
            user.name = echoed.name.unwrap_or(name);
        }
        if let Some(phone) = changes.phone {
            user.phone = echoed.phone.unwrap_or(phone);
        }

        let updated = self.users.update(&user).await?;
        self.auth.invalidate_session(&updated.username).await?;

        Ok(updated)
    }
}
