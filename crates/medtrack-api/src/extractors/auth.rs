//! `AuthUser` extractor — pulls the JWT from the Authorization header,
//! validates it, and injects the caller's context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use medtrack_core::error::AppError;
use medtrack_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
///
/// The caller's user ID is resolved server-side from the token subject;
/// clients never pass their own ID for scoping.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract the bearer token from the Authorization header
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        // Decode and extract the subject email
        let email = state.jwt_decoder.extract_subject(token)?;

        // Resolve the subject to a user record
        let user = state
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid authentication token"))?;

        // The token must verify against the resolved user's email
        if !state.jwt_decoder.verify(token, &user.email) {
            return Err(ApiError(AppError::authentication(
                "Invalid authentication token",
            )));
        }

        Ok(AuthUser(RequestContext::new(user.id, user.email)))
    }
}
