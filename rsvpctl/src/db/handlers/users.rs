//! Database repository for users.

use crate::{
    api::models::users::Role,
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::users::{UserCreateDBRequest, UserDBResponse, UserUpdateDBRequest},
    },
};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

/// Filter for listing users
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
}

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct User {
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub personal_message: Option<String>,
}

impl TryFrom<User> for UserDBResponse {
    type Error = DbError;

    fn try_from(user: User) -> Result<Self> {
        let role = user.role.parse::<Role>()?;
        Ok(Self {
            username: user.username,
            password_hash: user.password_hash,
            role,
            personal_message: user.personal_message,
        })
    }
}

pub struct Users<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Users<'c> {
    type CreateRequest = UserCreateDBRequest;
    type Response = UserDBResponse;
    type Id = String;
    type Filter = UserFilter;

    #[instrument(skip(self, request), fields(username = %request.username), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, role, personal_message)
            VALUES ($1, $2, $3, $4)
            RETURNING username, password_hash, role, personal_message
            "#,
        )
        .bind(&request.username)
        .bind(&request.password_hash)
        .bind(request.role.as_str())
        .bind(&request.personal_message)
        .fetch_one(&mut *self.db)
        .await?;

        user.try_into()
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, username: Self::Id) -> Result<Option<Self::Response>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password_hash, role, personal_message FROM users WHERE username = $1",
        )
        .bind(&username)
        .fetch_optional(&mut *self.db)
        .await?;

        user.map(UserDBResponse::try_from).transpose()
    }

    #[instrument(skip(self, filter), fields(role = ?filter.role), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT username, password_hash, role, personal_message
            FROM users
            WHERE ($1::text IS NULL OR role = $1)
            ORDER BY username
            "#,
        )
        .bind(filter.role.map(|r| r.as_str()))
        .fetch_all(&mut *self.db)
        .await?;

        users.into_iter().map(UserDBResponse::try_from).collect()
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, username: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(&username)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Apply a partial update. Fails with [`DbError::NotFound`] if the user does not exist.
    #[instrument(skip(self, request), fields(sets_password = request.password_hash.is_some()), err)]
    pub async fn update(&mut self, username: &str, request: &UserUpdateDBRequest) -> Result<UserDBResponse> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                personal_message = COALESCE($2, personal_message),
                password_hash = COALESCE($3, password_hash)
            WHERE username = $1
            RETURNING username, password_hash, role, personal_message
            "#,
        )
        .bind(username)
        .bind(&request.personal_message)
        .bind(&request.password_hash)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        user.try_into()
    }

    /// Insert or promote an account to admin with the given password hash.
    #[instrument(skip(self, password_hash), err)]
    pub async fn upsert_admin(&mut self, username: &str, password_hash: &str) -> Result<UserDBResponse> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, role, personal_message)
            VALUES ($1, $2, 'admin', '')
            ON CONFLICT (username) DO UPDATE SET
                password_hash = EXCLUDED.password_hash,
                role = 'admin'
            RETURNING username, password_hash, role, personal_message
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *self.db)
        .await?;

        user.try_into()
    }
}
