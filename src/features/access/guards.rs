//! Session extractors for handlers.
//!
//! `SessionContext` never rejects; it tells the handler whether the caller
//! passed the gate. `RequireSession` rejects unauthenticated callers with 401.

use crate::core::error::AppError;
use crate::features::access::model::SessionContext;
use crate::shared::constants::MSG_LOGIN_REQUIRED;
use axum::{extract::FromRequestParts, http::request::Parts};

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .unwrap_or_else(SessionContext::anonymous))
    }
}

/// Guard for routes behind the password gate.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireSession(session): RequireSession) { ... }
/// ```
pub struct RequireSession(pub SessionContext);

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<SessionContext>()
            .filter(|s| s.authenticated)
            .ok_or_else(|| AppError::Unauthorized(MSG_LOGIN_REQUIRED.to_string()))?;

        Ok(RequireSession(session.clone()))
    }
}
