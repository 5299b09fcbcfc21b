//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use taskmaster_core::error::CoreError;
use taskmaster_core::task::validate_user_id;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication. Place it before `Path`/`Json` extractors so a missing or bad
/// token is reported before anything else about the request:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The caller's user id (from the `user_id` or `sub` claim).
    pub user_id: String,
}

impl AuthUser {
    /// Resolve the owner a request under `/{user_id}/...` acts for.
    ///
    /// The path segment must name the authenticated user. Anything else is
    /// reported as not found, so one user cannot discover another's namespace.
    pub fn scope(&self, path_user_id: &str) -> Result<&str, CoreError> {
        validate_user_id(path_user_id)?;
        if path_user_id != self.user_id {
            tracing::debug!(
                user_id = %self.user_id,
                path_user_id,
                "Path user does not match token subject"
            );
            return Err(CoreError::NotFound {
                entity: "User",
                id: path_user_id.to_string(),
            });
        }
        Ok(&self.user_id)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = bearer_token(auth_header).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let user_id = claims.subject().map(str::to_string).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Token does not identify a user".into(),
            ))
        })?;

        Ok(AuthUser { user_id })
    }
}

/// Token from a `Bearer` credential. The scheme name is case-insensitive.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim_start().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
