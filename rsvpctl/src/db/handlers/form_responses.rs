//! Database repository for RSVP form responses.

use crate::db::{
    errors::Result,
    models::form_responses::{FormResponseDBResponse, FormResponseUpsertDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct FormResponses<'c> {
    db: &'c mut PgConnection,
}

impl<'c> FormResponses<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Insert an RSVP, or overwrite the existing one for the same guest-list entry.
    #[instrument(skip(self, request), fields(user = %request.user_username, accepted = ?request.accepted), err)]
    pub async fn upsert(&mut self, request: &FormResponseUpsertDBRequest) -> Result<FormResponseDBResponse> {
        let response = sqlx::query_as::<_, FormResponseDBResponse>(
            r#"
            INSERT INTO form_responses (user_username, name_surname, accepted, menu_option, allergies, comment)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_username, name_surname) DO UPDATE SET
                accepted = EXCLUDED.accepted,
                menu_option = EXCLUDED.menu_option,
                allergies = EXCLUDED.allergies,
                comment = EXCLUDED.comment
            RETURNING user_username, name_surname, accepted, menu_option, allergies, comment
            "#,
        )
        .bind(&request.user_username)
        .bind(&request.name_surname)
        .bind(request.accepted)
        .bind(&request.menu_option)
        .bind(&request.allergies)
        .bind(&request.comment)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(response)
    }

    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<FormResponseDBResponse>> {
        let responses = sqlx::query_as::<_, FormResponseDBResponse>(
            r#"
            SELECT user_username, name_surname, accepted, menu_option, allergies, comment
            FROM form_responses
            ORDER BY user_username, name_surname
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(responses)
    }

    /// RSVPs for the guest-list entries registered under one user.
    #[instrument(skip(self), err)]
    pub async fn list_for_user(&mut self, user_username: &str) -> Result<Vec<FormResponseDBResponse>> {
        let responses = sqlx::query_as::<_, FormResponseDBResponse>(
            r#"
            SELECT fr.user_username, fr.name_surname, fr.accepted, fr.menu_option, fr.allergies, fr.comment
            FROM form_responses fr
            JOIN name_surnames ns
              ON ns.user_username = fr.user_username
             AND ns.name_surname = fr.name_surname
            WHERE ns.user_username = $1
            ORDER BY fr.name_surname
            "#,
        )
        .bind(user_username)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(responses)
    }

    /// Remove RSVPs for a name, optionally limited to one user. Returns the number removed.
    #[instrument(skip(self), err)]
    pub async fn delete_for_name_surname(&mut self, name_surname: &str, user_username: Option<&str>) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM form_responses WHERE name_surname = $1 AND ($2::text IS NULL OR user_username = $2)",
        )
        .bind(name_surname)
        .bind(user_username)
        .execute(&mut *self.db)
        .await?;

        Ok(result.rows_affected())
    }
}
