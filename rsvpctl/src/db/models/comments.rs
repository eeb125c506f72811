//! Database models for guest comments.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database request for storing a comment
#[derive(Debug, Clone)]
pub struct GuestCommentCreateDBRequest {
    pub user_username: String,
    pub comment: String,
}

/// Database response for a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GuestCommentDBResponse {
    pub user_username: String,
    pub comment: String,
}
