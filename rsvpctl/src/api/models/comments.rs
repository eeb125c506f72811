//! API request/response models for guest comments.

use crate::db::models::comments::GuestCommentDBResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CommentCreate {
    pub user_username: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub user_username: String,
    pub comment: String,
}

impl From<GuestCommentDBResponse> for CommentResponse {
    fn from(db: GuestCommentDBResponse) -> Self {
        Self {
            user_username: db.user_username,
            comment: db.comment,
        }
    }
}
