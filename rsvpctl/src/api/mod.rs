//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//! - **[`extractors`]**: JSON body extraction with `{"error"}` rejections
//!
//! # API Structure
//!
//! - **Login** (`/api/login`): credential check, returns role and personal message
//! - **Users** (`/api/users/*`): guest account management
//! - **Guest lists** (`/api/namesurnames/*`, `/api/name_surnames/*`): names registered per account
//! - **RSVPs** (`/api/form_responses/*`): one response per guest-list entry
//! - **Comments** (`/api/comments/*`): free-text messages from guests
//!
//! All endpoints are documented with `utoipa`; the document is served at
//! `/api-docs/openapi.json` and browsable at `/docs`.

pub mod extractors;
pub mod handlers;
pub mod models;
