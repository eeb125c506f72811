//! HTTP request handlers for all API endpoints.
//!
//! Each handler validates its input, opens one transaction, runs the repository
//! calls it needs and commits before building the response. Returning early with an
//! error drops the transaction, which rolls it back.
//!
//! # Handler Modules
//!
//! - [`auth`]: Login
//! - [`users`]: Account CRUD with admin-protected deletion
//! - [`name_surnames`]: Guest-list entries
//! - [`form_responses`]: RSVP submission and listing
//! - [`comments`]: Guest comments
//! - [`health`]: Database and process liveness
//! - [`static_assets`]: Frontend asset serving and SPA routing
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`], which converts to the matching status
//! code and a `{"error": ...}` JSON body.

pub mod auth;
pub mod comments;
pub mod form_responses;
pub mod health;
pub mod name_surnames;
pub mod static_assets;
pub mod users;

use axum::http::Uri;

use crate::errors::Error;

/// Fallback for unmatched `/api/*` paths, so API clients get JSON instead of the frontend.
pub async fn api_not_found(uri: Uri) -> Error {
    Error::NotFound {
        resource: "Endpoint".to_string(),
        id: uri.path().to_string(),
    }
}
