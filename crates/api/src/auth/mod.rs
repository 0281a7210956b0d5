//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed, time-bounded identity token generation and validation.

pub mod jwt;
pub mod password;
