/**
 * API Error Types
 *
 * This module defines the error taxonomy for the whole backend. Every error
 * a handler can surface maps to a stable machine-readable kind plus a
 * human-readable message, and converts to an HTTP response (see conversion.rs).
 *
 * # Ordering guarantees
 *
 * Handlers check errors in a fixed order: `MalformedIdentifier` before any
 * store lookup, `NotFound` before authorization, `Unauthenticated` and
 * `Unauthorized` before any mutation. Invariant violations come from the
 * collaboration registry and are surfaced verbatim. `Store` wraps opaque
 * database failures and is never retried.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// All errors the backend can return to a client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The supplied id is not a valid 24-hex-character identifier.
    /// Checked before any store lookup.
    #[error("identifier is not a valid 24-character hex id")]
    MalformedIdentifier,

    /// A well-formed id (or filter) matched no record. The label names the
    /// missing resource ("project", "task", "user").
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The caller's identity could not be resolved (missing, malformed or
    /// expired credentials).
    #[error("{0}")]
    Unauthenticated(String),

    /// The caller is known but not allowed to perform this operation.
    #[error("you are not allowed to perform this action")]
    Unauthorized,

    /// Login attempted before the emailed confirmation token was redeemed.
    #[error("your account has not been confirmed, check your email")]
    AccountNotConfirmed,

    /// A confirmation or recovery token matched no pending user.
    #[error("token is not valid")]
    InvalidToken,

    /// Registration with an email that already has an account.
    #[error("a user with this email already exists")]
    DuplicateEmail,

    /// Invariant violation: the project creator can never be a collaborator.
    #[error("the project creator cannot be added as a collaborator")]
    CreatorCannotBeCollaborator,

    /// Invariant violation: the candidate already belongs to the project.
    #[error("the user is already a collaborator on this project")]
    AlreadyCollaborator,

    /// A guarded save observed a stale version; the caller must re-fetch
    /// and retry.
    #[error("the resource was modified concurrently, fetch it again and retry")]
    Conflict,

    /// Request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// Opaque storage failure. The underlying error is logged, not exposed.
    #[error("storage failure")]
    Store(#[from] sqlx::Error),

    /// Unexpected internal failure (hashing, token signing). The detail is
    /// logged at the call site, not exposed.
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable kind for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedIdentifier => "malformed_identifier",
            Self::NotFound(_) => "not_found",
            Self::Unauthenticated(_) => "unauthenticated",
            Self::Unauthorized => "unauthorized",
            Self::AccountNotConfirmed => "account_not_confirmed",
            Self::InvalidToken => "invalid_token",
            Self::DuplicateEmail => "duplicate_email",
            Self::CreatorCannotBeCollaborator => "creator_cannot_be_collaborator",
            Self::AlreadyCollaborator => "already_collaborator",
            Self::Conflict => "conflict",
            Self::Validation(_) => "validation",
            Self::Store(_) => "store_failure",
            Self::Internal(_) => "internal",
        }
    }

    /// HTTP status code for this error.
    ///
    /// 401 means the caller's identity failed to resolve; 403 means the
    /// identity resolved but the operation is not permitted.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedIdentifier | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Unauthorized | Self::AccountNotConfirmed | Self::InvalidToken => {
                StatusCode::FORBIDDEN
            }
            Self::DuplicateEmail
            | Self::CreatorCannotBeCollaborator
            | Self::AlreadyCollaborator
            | Self::Conflict => StatusCode::CONFLICT,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message for this error.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Convenience constructor for unauthenticated errors.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    /// Convenience constructor for validation errors.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(ApiError::MalformedIdentifier.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("project").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::unauthenticated("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::AlreadyCollaborator.status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::Conflict.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_kind_is_stable() {
        assert_eq!(ApiError::MalformedIdentifier.kind(), "malformed_identifier");
        assert_eq!(ApiError::NotFound("task").kind(), "not_found");
        assert_eq!(
            ApiError::CreatorCannotBeCollaborator.kind(),
            "creator_cannot_be_collaborator"
        );
        assert_eq!(ApiError::Conflict.kind(), "conflict");
    }

    #[test]
    fn test_not_found_message_names_resource() {
        assert_eq!(ApiError::NotFound("project").message(), "project not found");
    }

    #[test]
    fn test_store_error_is_opaque() {
        let err = ApiError::Store(sqlx::Error::RowNotFound);
        assert_eq!(err.message(), "storage failure");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
