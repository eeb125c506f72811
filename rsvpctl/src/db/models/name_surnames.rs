//! Database models for guest-list entries.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Composite key of a guest-list entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameSurnameKey {
    pub user_username: String,
    pub name_surname: String,
}

/// Database request for registering a guest-list entry
#[derive(Debug, Clone)]
pub struct NameSurnameCreateDBRequest {
    pub user_username: String,
    pub name_surname: String,
}

/// Database response for a guest-list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct NameSurnameDBResponse {
    pub user_username: String,
    pub name_surname: String,
}
