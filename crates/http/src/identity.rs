//! Caller identity plumbing.
//!
//! Authentication itself happens in front of this service: the platform's
//! authentication proxy verifies the caller and forwards the caller's email
//! in a trusted header. This module only lifts that header into an explicit
//! [`Identity`] value threaded into handlers as an extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderName;

use crate::error::AppError;

/// Default name of the trusted identity header.
pub const DEFAULT_IDENTITY_HEADER: &str = "x-authenticated-user";

/// Configured name of the trusted identity header, injected into the router
/// as an extension by [`crate::router::RouterBuilder::with_identity_header`].
#[derive(Debug, Clone)]
pub struct IdentityHeader(pub HeaderName);

impl Default for IdentityHeader {
    fn default() -> Self {
        Self(HeaderName::from_static(DEFAULT_IDENTITY_HEADER))
    }
}

/// Authenticated caller identity (the caller's email).
///
/// Use as an extractor parameter in any handler that acts on behalf of a
/// caller:
///
/// ```ignore
/// async fn my_handler(Identity(owner): Identity) -> ApiResponse<()> { ... }
/// ```
///
/// A request without the identity header never passed the authentication
/// proxy; it is rejected with an enveloped `unauthorized` failure.
#[derive(Debug, Clone)]
pub struct Identity(pub String);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .extensions
            .get::<IdentityHeader>()
            .cloned()
            .unwrap_or_default();

        let value = parts
            .headers
            .get(&header.0)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::unauthorized("request reached the service without an authenticated identity")
            })?;

        Ok(Identity(value.to_string()))
    }
}
