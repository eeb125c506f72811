//! API request and response data models.
//!
//! These structures define the public JSON contract of the service. They are kept
//! separate from the database records in [`crate::db::models`] and are annotated with
//! `utoipa` for the generated API documentation.
//!
//! Required request fields are modelled as `Option` so that a missing field reaches the
//! handler and is reported with the service's own `{"error": ...}` body instead of a
//! deserialization rejection.

pub mod auth;
pub mod comments;
pub mod form_responses;
pub mod name_surnames;
pub mod users;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of successful mutations that return nothing else
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Treat a missing field and an empty string the same way.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
