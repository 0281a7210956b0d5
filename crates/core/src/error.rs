use crate::types::DbId;

/// The closed set of domain error kinds.
///
/// Every exposed operation either returns a value or fails with one of
/// these; the API layer does a single exhaustive mapping to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The id does not resolve under the caller's ownership scope.
    ///
    /// Used uniformly whether the resource never existed or exists under a
    /// different owner, so ownership cannot be probed.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed input (title/description length, missing required field).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Registration with an email that already has an identity.
    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    /// Login with an unknown email or a wrong password. The message must not
    /// distinguish the two causes.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Expired, malformed, or unverifiable token.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Any other failure. Surfaced to callers as an opaque message; the full
    /// detail is logged where the error is raised.
    #[error("Internal error: {0}")]
    Internal(String),
}
