//! Database record types.
//!
//! `*DBRequest` structs carry validated input into a repository; `*DBResponse` structs
//! are what a repository hands back. API types convert into and out of these.

pub mod comments;
pub mod form_responses;
pub mod name_surnames;
pub mod users;
