//! API request/response models for users.

use crate::db::models::users::UserDBResponse;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Account role. Stored as lowercase text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Guest => "guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "guest" => Ok(Role::Guest),
            other => Err(anyhow::anyhow!("unknown role '{other}'")),
        }
    }
}

// User request models
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UserCreate {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Defaults to `guest`
    pub role: Option<Role>,
    /// Defaults to an empty message
    pub personal_message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UserUpdate {
    pub personal_message: Option<String>,
    /// New password, hashed before storage
    pub password: Option<String>,
}

// User response models

/// Entry in the user listing. The password hash is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub username: String,
    pub role: Role,
    pub personal_message: String,
}

impl From<UserDBResponse> for UserResponse {
    fn from(db: UserDBResponse) -> Self {
        Self {
            username: db.username,
            role: db.role,
            personal_message: db.personal_message.unwrap_or_default(),
        }
    }
}

/// Single-user lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub username: String,
    pub personal_message: String,
}

impl From<UserDBResponse> for UserSummary {
    fn from(db: UserDBResponse) -> Self {
        Self {
            username: db.username,
            personal_message: db.personal_message.unwrap_or_default(),
        }
    }
}

/// Returned on account creation. Echoes the plaintext password so the admin UI can
/// hand the credentials to the guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedUserResponse {
    pub username: String,
    pub password: String,
}
