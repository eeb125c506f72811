//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the Repository pattern to provide clean abstractions over database operations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries over one borrowed connection)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for each table
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! # Referential integrity
//!
//! Every guest-list entry, RSVP and comment belongs to a user and is removed with it
//! (`ON DELETE CASCADE`). RSVPs additionally reference their guest-list entry through
//! the composite key `(user_username, name_surname)`, so deleting the entry removes the
//! RSVP as well. The schema lives in `migrations/` and is applied on startup.

pub mod errors;
pub mod handlers;
pub mod models;
