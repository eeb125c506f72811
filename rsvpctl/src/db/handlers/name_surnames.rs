//! Database repository for guest-list entries.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::name_surnames::{NameSurnameCreateDBRequest, NameSurnameDBResponse, NameSurnameKey},
};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing guest-list entries
#[derive(Debug, Clone, Default)]
pub struct NameSurnameFilter {
    pub user_username: Option<String>,
}

impl NameSurnameFilter {
    pub fn for_user(user_username: impl Into<String>) -> Self {
        Self {
            user_username: Some(user_username.into()),
        }
    }
}

pub struct NameSurnames<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for NameSurnames<'c> {
    type CreateRequest = NameSurnameCreateDBRequest;
    type Response = NameSurnameDBResponse;
    type Id = NameSurnameKey;
    type Filter = NameSurnameFilter;

    #[instrument(skip(self, request), fields(user = %request.user_username), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let entry = sqlx::query_as::<_, NameSurnameDBResponse>(
            r#"
            INSERT INTO name_surnames (user_username, name_surname)
            VALUES ($1, $2)
            RETURNING user_username, name_surname
            "#,
        )
        .bind(&request.user_username)
        .bind(&request.name_surname)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(entry)
    }

    #[instrument(skip(self), fields(user = %key.user_username), err)]
    async fn get_by_id(&mut self, key: Self::Id) -> Result<Option<Self::Response>> {
        let entry = sqlx::query_as::<_, NameSurnameDBResponse>(
            "SELECT user_username, name_surname FROM name_surnames WHERE user_username = $1 AND name_surname = $2",
        )
        .bind(&key.user_username)
        .bind(&key.name_surname)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(entry)
    }

    #[instrument(skip(self, filter), fields(user = ?filter.user_username), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let entries = sqlx::query_as::<_, NameSurnameDBResponse>(
            r#"
            SELECT user_username, name_surname
            FROM name_surnames
            WHERE ($1::text IS NULL OR user_username = $1)
            ORDER BY user_username, name_surname
            "#,
        )
        .bind(filter.user_username.as_deref())
        .fetch_all(&mut *self.db)
        .await?;

        Ok(entries)
    }

    #[instrument(skip(self), fields(user = %key.user_username), err)]
    async fn delete(&mut self, key: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM name_surnames WHERE user_username = $1 AND name_surname = $2")
            .bind(&key.user_username)
            .bind(&key.name_surname)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl<'c> NameSurnames<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Delete every entry with this name, across all users. Returns the number removed.
    #[instrument(skip(self), err)]
    pub async fn delete_by_name(&mut self, name_surname: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM name_surnames WHERE name_surname = $1")
            .bind(name_surname)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
