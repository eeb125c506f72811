//! Credential handling.
//!
//! Guests and administrators log in with a username and password. There are no sessions or
//! tokens: a successful login simply returns the account's role and personal message, and the
//! frontend decides what to show.
//!
//! # Modules
//!
//! - [`password`]: Password hashing and verification using Argon2

pub mod password;
