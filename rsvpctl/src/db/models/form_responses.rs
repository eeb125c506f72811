//! Database models for RSVP form responses.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database request for submitting (inserting or overwriting) an RSVP
#[derive(Debug, Clone)]
pub struct FormResponseUpsertDBRequest {
    pub user_username: String,
    pub name_surname: String,
    pub accepted: Option<bool>,
    pub menu_option: String,
    pub allergies: String,
    pub comment: String,
}

/// Database response for an RSVP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FormResponseDBResponse {
    pub user_username: String,
    pub name_surname: String,
    pub accepted: Option<bool>,
    pub menu_option: Option<String>,
    pub allergies: Option<String>,
    pub comment: Option<String>,
}
