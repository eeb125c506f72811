//! API request/response models for guest-list entries.

use crate::db::models::name_surnames::NameSurnameDBResponse;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NameSurnameCreate {
    pub user_username: Option<String>,
    pub name_surname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NameSurnameResponse {
    pub user_username: String,
    pub name_surname: String,
}

impl From<NameSurnameDBResponse> for NameSurnameResponse {
    fn from(db: NameSurnameDBResponse) -> Self {
        Self {
            user_username: db.user_username,
            name_surname: db.name_surname,
        }
    }
}

/// Entry in a single user's guest list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserNameSurnameResponse {
    pub name_surname: String,
}

impl From<NameSurnameDBResponse> for UserNameSurnameResponse {
    fn from(db: NameSurnameDBResponse) -> Self {
        Self {
            name_surname: db.name_surname,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NameSurnameCreated {
    pub name_surname: String,
    pub message: String,
}

/// Query parameters for deleting an entry
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DeleteNameSurnameQuery {
    /// Only delete the entry registered under this user
    pub user_username: Option<String>,
}
