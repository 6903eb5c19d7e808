/**
 * Error Conversion
 *
 * Conversions from internal error types into `ApiError`, and from `ApiError`
 * into an HTTP response.
 *
 * # Response Format
 *
 * Error responses are returned as JSON:
 * ```json
 * {
 *   "error": "project not found",
 *   "kind": "not_found",
 *   "status": 404
 * }
 * ```
 */

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::collab::registry::RegistryError;
use crate::error::types::ApiError;
use crate::store::id::InvalidObjectId;

impl From<InvalidObjectId> for ApiError {
    fn from(_: InvalidObjectId) -> Self {
        ApiError::MalformedIdentifier
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::CreatorCannotBeCollaborator => ApiError::CreatorCannotBeCollaborator,
            RegistryError::AlreadyCollaborator => ApiError::AlreadyCollaborator,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Storage failures carry internal detail; log it here and keep the
        // client-facing message opaque.
        if let ApiError::Store(ref err) = self {
            tracing::error!("[Store] Operation failed: {:?}", err);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "kind": self.kind(),
            "status": status.as_u16(),
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::from("Internal Server Error"))
                    .unwrap()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_invalid_object_id_converts() {
        let err: ApiError = InvalidObjectId.into();
        assert_matches!(err, ApiError::MalformedIdentifier);
    }

    #[test]
    fn test_registry_error_converts() {
        let err: ApiError = RegistryError::AlreadyCollaborator.into();
        assert_matches!(err, ApiError::AlreadyCollaborator);

        let err: ApiError = RegistryError::CreatorCannotBeCollaborator.into();
        assert_matches!(err, ApiError::CreatorCannotBeCollaborator);
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::NotFound("project").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
