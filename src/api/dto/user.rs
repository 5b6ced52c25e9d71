//! DTOs for user endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{NewUser, Principal, User, UserChanges};

/// `POST /api/users` body.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(required, length(min = 1, max = 100))]
    pub username: Option<String>,

    #[validate(required, length(min = 1, max = 100))]
    pub password: Option<String>,

    #[validate(required, length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(required, length(min = 1, max = 100))]
    pub phone: Option<String>,
}

impl From<RegisterUserRequest> for NewUser {
    fn from(req: RegisterUserRequest) -> Self {
        Self {
            username: req.username.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
            name: req.name.unwrap_or_default(),
            phone: req.phone.unwrap_or_default(),
        }
    }
}

/// `POST /api/users/login` body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginUserRequest {
    #[validate(required, length(min = 1, max = 100))]
    pub username: Option<String>,

    #[validate(required, length(min = 1, max = 100))]
    pub password: Option<String>,
}

/// `PATCH /api/users` body. Absent fields stay unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub password: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub phone: Option<String>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            password: req.password,
            name: req.name,
            phone: req.phone,
        }
    }
}

/// Public view of an account. `token` is present only after login.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
    pub phone: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            name: user.name,
            phone: user.phone,
            token: None,
        }
    }
}

impl From<Principal> for UserResponse {
    fn from(principal: Principal) -> Self {
        Self {
            username: principal.username,
            name: principal.name,
            phone: principal.phone,
            token: None,
        }
    }
}
