//! User account and the authenticated principal derived from it.

use serde::{Deserialize, Serialize};

/// A locally stored user account. `password` holds an argon2 PHC hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub name: String,
    pub phone: String,
}

/// Input data for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub phone: String,
}

/// Requested profile changes, or the fields the upstream echoed for them.
///
/// `password` is plain text here; it is hashed before it reaches the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A user as the upstream API echoes it after registration.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamUser {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    pub name: String,
    pub phone: String,
}

/// The identity attached to an authenticated request.
///
/// Never carries the password hash. Cached as JSON under `user_{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub phone: String,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            phone: user.phone.clone(),
        }
    }
}
