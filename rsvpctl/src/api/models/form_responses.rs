//! API request/response models for RSVP form responses.

use crate::db::models::form_responses::FormResponseDBResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct FormResponseSubmit {
    pub name_surname: Option<String>,
    pub user_username: Option<String>,
    pub accepted: Option<bool>,
    /// Required when `accepted` is true
    pub menu_option: Option<String>,
    pub allergies: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormResponseResponse {
    pub name_surname: String,
    pub user_username: String,
    pub accepted: Option<bool>,
    pub menu_option: String,
    pub allergies: String,
    pub comment: String,
}

impl From<FormResponseDBResponse> for FormResponseResponse {
    fn from(db: FormResponseDBResponse) -> Self {
        Self {
            name_surname: db.name_surname,
            user_username: db.user_username,
            accepted: db.accepted,
            menu_option: db.menu_option.unwrap_or_default(),
            allergies: db.allergies.unwrap_or_default(),
            comment: db.comment.unwrap_or_default(),
        }
    }
}
