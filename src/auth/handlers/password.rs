/**
 * Password Recovery Handlers
 *
 * Three-step recovery flow, mirroring the confirmation flow's single-use
 * token lifecycle:
 *
 * 1. `POST /api/users/recover` - stamp a fresh token and email the link
 * 2. `GET  /api/users/recover/{token}` - validate the token
 * 3. `POST /api/users/recover/{token}` - set the new password, clear the
 *    token
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::auth::handlers::types::{MessageResponse, NewPasswordRequest, RecoverRequest};
use crate::error::ApiError;
use crate::notify;
use crate::server::state::AppState;
use crate::store::users;

/// Start password recovery: stamp a token and send the reset email.
///
/// # Errors
///
/// * `not_found` (404) - no account with this email
pub async fn start_recovery(
    State(state): State<AppState>,
    Json(request): Json<RecoverRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut user = users::find_by_email(&state.db_pool, &request.email)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    user.token = uuid::Uuid::new_v4().simple().to_string();
    let user = users::save(&state.db_pool, &user).await?;

    tracing::info!("Password recovery started for {}", user.email);

    notify::spawn_password_reset(
        state.mailer.clone(),
        user.email.clone(),
        user.name.clone(),
        user.token.clone(),
    );

    Ok(Json(MessageResponse::new(
        "We sent an email with the steps to reset your password",
    )))
}

/// Validate a recovery token without consuming it.
///
/// # Errors
///
/// * `invalid_token` (403) - the token matches no pending user
pub async fn validate_recovery_token(
    State(pool): State<PgPool>,
    Path(token): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    users::find_by_token(&pool, &token)
        .await?
        .ok_or(ApiError::InvalidToken)?;

    Ok(Json(MessageResponse::new("Token is valid")))
}

/// Consume a recovery token and store the new password.
///
/// # Errors
///
/// * `invalid_token` (403) - the token matches no pending user
/// * `validation` (400) - password too short
pub async fn reset_password(
    State(pool): State<PgPool>,
    Path(token): Path<String>,
    Json(request): Json<NewPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if request.password.len() < 8 {
        return Err(ApiError::validation("password must be at least 8 characters"));
    }

    let mut user = users::find_by_token(&pool, &token)
        .await?
        .ok_or(ApiError::InvalidToken)?;

    user.password_hash = hash(&request.password, DEFAULT_COST).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        ApiError::Internal("password hashing failed".to_string())
    })?;
    // Single-use: cleared exactly once per recovery cycle
    user.token.clear();

    users::save(&pool, &user).await?;

    tracing::info!("Password updated for {}", user.email);

    Ok(Json(MessageResponse::new("Your password has been updated!")))
}
