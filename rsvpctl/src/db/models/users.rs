//! Database models for users.

use crate::api::models::users::{Role, UserUpdate};

/// Database request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub personal_message: String,
}

/// Database request for updating a user. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdateDBRequest {
    pub personal_message: Option<String>,
    pub password_hash: Option<String>,
}

impl UserUpdateDBRequest {
    /// Build from an API update; the caller hashes any new password separately.
    pub fn new(update: &UserUpdate, password_hash: Option<String>) -> Self {
        Self {
            personal_message: update.personal_message.clone(),
            password_hash,
        }
    }
}

/// Database response for a user
#[derive(Debug, Clone)]
pub struct UserDBResponse {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub personal_message: Option<String>,
}
