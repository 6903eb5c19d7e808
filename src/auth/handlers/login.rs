/**
 * Login Handler
 *
 * This module implements user authentication for POST /api/users/login.
 *
 * # Security
 *
 * - An unknown email and a wrong password return the same error, so the
 *   endpoint does not reveal which emails have accounts.
 * - Unconfirmed accounts cannot log in.
 * - Passwords are verified with bcrypt; tokens expire after 30 days.
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;
use sqlx::PgPool;

use crate::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::auth::sessions::create_token;
use crate::error::ApiError;
use crate::store::users;

/// Login handler
///
/// # Errors
///
/// * `unauthenticated` (401) - unknown email or wrong password
/// * `account_not_confirmed` (403) - confirmation token not yet redeemed
/// * `store_failure` / `internal` (500) - database or signing failure
pub async fn login(
    State(pool): State<PgPool>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    tracing::info!("Login request for: {}", request.email);

    let user = users::find_by_email(&pool, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login for unknown email: {}", request.email);
            ApiError::unauthenticated("invalid email or password")
        })?;

    if !user.confirmed {
        tracing::warn!("Login before confirmation: {}", request.email);
        return Err(ApiError::AccountNotConfirmed);
    }

    // Verify password
    let valid = verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        ApiError::Internal("password verification failed".to_string())
    })?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", request.email);
        return Err(ApiError::unauthenticated("invalid email or password"));
    }

    let token = create_token(&user.id, user.email.clone()).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        ApiError::Internal("token signing failed".to_string())
    })?;

    tracing::info!("User logged in: {} ({})", user.name, user.email);

    Ok(Json(AuthResponse {
        token,
        user: UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    }))
}
