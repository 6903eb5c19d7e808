//! Middleware Module
//!
//! Request-processing middleware and extractors.
//!
//! - `auth` - bearer-token authentication middleware, the `AuthUser`
//!   extractor for protected handlers, and the `OriginSession` extractor
//!   carrying the realtime session id of a mutating request.

/// Authentication middleware and extractors
pub mod auth;

// Re-export commonly used types
pub use auth::{auth_middleware, AuthUser, AuthenticatedUser, OriginSession};
