//! Authentication middleware extractors.
//!
//! - [`auth::AuthUser`] -- resolves the identity behind a JWT Bearer token.

pub mod auth;
