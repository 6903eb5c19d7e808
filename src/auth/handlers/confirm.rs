/**
 * Account Confirmation Handler
 *
 * Redeems the single-use token emailed at registration
 * (GET /api/users/confirm/{token}). The token is cleared on success, so a
 * second redemption of the same link fails.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use sqlx::PgPool;

use crate::auth::handlers::types::MessageResponse;
use crate::error::ApiError;
use crate::store::users;

/// Confirm account handler
///
/// # Errors
///
/// * `invalid_token` (403) - the token matches no pending user
pub async fn confirm_account(
    State(pool): State<PgPool>,
    Path(token): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut user = users::find_by_token(&pool, &token)
        .await?
        .ok_or(ApiError::InvalidToken)?;

    user.confirmed = true;
    // Single-use: cleared exactly once per confirmation cycle
    user.token.clear();

    users::save(&pool, &user).await?;

    tracing::info!("Account confirmed: {}", user.email);

    Ok(Json(MessageResponse::new("Your account has been confirmed!")))
}
