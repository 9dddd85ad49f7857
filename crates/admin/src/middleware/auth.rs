//! Authentication extractor for admin routes.
//!
//! Identity management is an external concern; the deployment issues a
//! bearer token and this extractor only compares it. Every admin handler
//! takes `RequireAdminAuth` as its first argument.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use secrecy::ExposeSecret;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires a valid admin bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     _auth: RequireAdminAuth,
///     State(state): State<AppState>,
/// ) -> impl IntoResponse {
///     // only reached with a valid token
/// }
/// ```
pub struct RequireAdminAuth;

impl FromRequestParts<AppState> for RequireAdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        if token != state.config().api_token.expose_secret() {
            return Err(AppError::Unauthorized);
        }

        Ok(Self)
    }
}
