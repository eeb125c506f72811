//! Database repository for guest comments.

use crate::db::{
    errors::Result,
    models::comments::{GuestCommentCreateDBRequest, GuestCommentDBResponse},
};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing comments
#[derive(Debug, Clone, Default)]
pub struct GuestCommentFilter {
    pub user_username: Option<String>,
}

pub struct GuestComments<'c> {
    db: &'c mut PgConnection,
}

impl<'c> GuestComments<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Store a comment. Repeating the exact text for the same user is a unique violation.
    #[instrument(skip(self, request), fields(user = %request.user_username), err)]
    pub async fn create(&mut self, request: &GuestCommentCreateDBRequest) -> Result<GuestCommentDBResponse> {
        let comment = sqlx::query_as::<_, GuestCommentDBResponse>(
            r#"
            INSERT INTO guest_comments (user_username, comment)
            VALUES ($1, $2)
            RETURNING user_username, comment
            "#,
        )
        .bind(&request.user_username)
        .bind(&request.comment)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(comment)
    }

    #[instrument(skip(self, filter), fields(user = ?filter.user_username), err)]
    pub async fn list(&mut self, filter: &GuestCommentFilter) -> Result<Vec<GuestCommentDBResponse>> {
        let comments = sqlx::query_as::<_, GuestCommentDBResponse>(
            r#"
            SELECT user_username, comment
            FROM guest_comments
            WHERE ($1::text IS NULL OR user_username = $1)
            ORDER BY user_username, comment
            "#,
        )
        .bind(filter.user_username.as_deref())
        .fetch_all(&mut *self.db)
        .await?;

        Ok(comments)
    }
}
