/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require a
 * resolved user identity. It extracts and verifies the JWT bearer token,
 * loads the user record, and attaches the identity to request extensions
 * for handlers to consume.
 */

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::sessions::verify_token;
use crate::error::ApiError;
use crate::server::state::AppState;
use crate::store::{users, ObjectId};

/// Authenticated user identity resolved by the middleware.
///
/// Only public fields are carried; authentication material never leaves
/// the store layer.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT token from the Authorization header
/// 2. Verifies the token
/// 3. Loads the user record the token refers to
/// 4. Attaches the identity to request extensions for use in handlers
///
/// Returns 401 Unauthenticated if the token is missing, invalid, or refers
/// to a user that no longer exists.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Get Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("[Auth] Missing Authorization header");
            ApiError::unauthenticated("missing bearer token")
        })?;

    // Extract token (format: "Bearer <token>")
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("[Auth] Invalid Authorization header format");
        ApiError::unauthenticated("invalid authorization header")
    })?;

    // Verify token
    let claims = verify_token(token).map_err(|e| {
        tracing::warn!("[Auth] Invalid token: {:?}", e);
        ApiError::unauthenticated("invalid or expired token")
    })?;

    // The subject must be a well-formed record id
    let user_id = ObjectId::parse(&claims.sub)
        .map_err(|_| ApiError::unauthenticated("invalid token subject"))?;

    // Resolve the identity against the store
    let user = users::find_by_id(&state.db_pool, user_id.as_str())
        .await?
        .ok_or_else(|| {
            tracing::warn!("[Auth] Token refers to unknown user {}", user_id);
            ApiError::unauthenticated("unknown user")
        })?;

    // Attach the resolved identity to request extensions
    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        name: user.name,
        email: user.email,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Usable as a handler parameter on any route behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("[Auth] AuthenticatedUser not found in request extensions");
                ApiError::unauthenticated("missing bearer token")
            })?;

        Ok(AuthUser(user))
    }
}

/// Axum extractor for the originating realtime session, taken from the
/// optional `X-Session-Id` header on mutating requests.
///
/// The broadcast router uses it to keep the mutating session from receiving
/// its own echo. Absent or malformed values simply mean "no originator":
/// the event then goes to every room member.
#[derive(Clone, Copy, Debug)]
pub struct OriginSession(pub Option<Uuid>);

impl<S> axum::extract::FromRequestParts<S> for OriginSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .headers
            .get("x-session-id")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok());

        Ok(OriginSession(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    fn parts_with_headers(headers: &[(&str, &str)]) -> axum::http::request::Parts {
        let mut builder = Request::builder().uri("http://example.com");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_origin_session_parses_header() {
        let session = Uuid::new_v4();
        let mut parts = parts_with_headers(&[("x-session-id", &session.to_string())]);

        let OriginSession(origin) = OriginSession::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(origin, Some(session));
    }

    #[tokio::test]
    async fn test_origin_session_absent_header() {
        let mut parts = parts_with_headers(&[]);

        let OriginSession(origin) = OriginSession::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(origin, None);
    }

    #[tokio::test]
    async fn test_origin_session_malformed_header() {
        let mut parts = parts_with_headers(&[("x-session-id", "not-a-uuid")]);

        let OriginSession(origin) = OriginSession::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(origin, None);
    }
}
