//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed `PgConnection` (a transaction derefs to one) and
//! returns records from [`crate::db::models`].
//!
//! ```ignore
//! use rsvpctl::db::handlers::{Repository, Users};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tx = pool.begin().await?;
//!     let mut repo = Users::new(&mut tx);
//!     let users = repo.list(&Default::default()).await?;
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod comments;
pub mod form_responses;
pub mod name_surnames;
pub mod repository;
pub mod users;

pub use comments::GuestComments;
pub use form_responses::FormResponses;
pub use name_surnames::NameSurnames;
pub use repository::Repository;
pub use users::Users;
