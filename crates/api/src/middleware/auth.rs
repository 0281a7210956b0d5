//! JWT-based identity resolution for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use taskhub_core::error::CoreError;
use taskhub_core::types::DbId;
use taskhub_db::models::user::UserRole;
use taskhub_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The resolved identity behind a JWT Bearer token in the `Authorization`
/// header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication; handlers then thread it explicitly into every
/// ownership-scoped store call:
///
/// ```ignore
/// async fn my_handler(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<()>> {
///     let projects = ProjectRepo::list_by_owner(&state.pool, user.user_id).await?;
///     ...
/// }
/// ```
///
/// The token's subject is an email, so resolution goes through the users
/// table: a token for a deleted account is as invalid as a forged one.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The identity's internal database id.
    pub user_id: DbId,
    /// The identity's normalized email (from `claims.sub`).
    pub email: String,
    /// The identity's role. Currently informational only.
    pub role: UserRole,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::InvalidToken("Missing Authorization header".into()))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::InvalidToken(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::InvalidToken("Invalid or expired token".into()))
        })?;

        let user = UserRepo::find_by_email(&state.pool, &claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::InvalidToken("Invalid or expired token".into()))
            })?;

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
            role: user.role,
        })
    }
}
