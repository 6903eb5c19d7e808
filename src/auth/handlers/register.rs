/**
 * Registration Handler
 *
 * This module implements user registration for POST /api/users.
 *
 * # Registration Process
 *
 * 1. Validate name, email format and password length
 * 2. Reject an email that already has an account
 * 3. Hash the password with bcrypt
 * 4. Create the user, unconfirmed, with a fresh single-use token
 * 5. Spawn the confirmation email (fire-and-forget)
 *
 * The response is an acknowledgement only; the account stays unusable
 * until the emailed token is redeemed.
 */

use axum::{extract::State, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::auth::handlers::types::{MessageResponse, RegisterRequest};
use crate::error::ApiError;
use crate::notify;
use crate::server::state::AppState;
use crate::store::{users, ObjectId};

/// Registration handler
///
/// # Errors
///
/// * `validation` (400) - empty name, invalid email or short password
/// * `duplicate_email` (409) - the email already has an account
/// * `store_failure` / `internal` (500) - database or hashing failure
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("Registration request for email: {}", request.email);

    if request.name.trim().is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }

    // Basic shape check; deliverability is proven by the confirmation email
    if !request.email.contains('@') {
        tracing::warn!("Invalid email format: {}", request.email);
        return Err(ApiError::validation("invalid email format"));
    }

    if request.password.len() < 8 {
        tracing::warn!("Password too short");
        return Err(ApiError::validation("password must be at least 8 characters"));
    }

    // Check if email already exists
    if users::find_by_email(&state.db_pool, &request.email).await?.is_some() {
        tracing::warn!("Email already registered: {}", request.email);
        return Err(ApiError::DuplicateEmail);
    }

    // Hash password
    let password_hash = hash(&request.password, DEFAULT_COST).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        ApiError::Internal("password hashing failed".to_string())
    })?;

    // Single-use confirmation token, cleared when redeemed
    let token = uuid::Uuid::new_v4().simple().to_string();

    let user = users::create(
        &state.db_pool,
        ObjectId::generate().into_string(),
        request.name.trim().to_string(),
        request.email.clone(),
        password_hash,
        token,
    )
    .await?;

    tracing::info!("User created: {} ({})", user.name, user.email);

    notify::spawn_account_confirmation(
        state.mailer.clone(),
        user.email.clone(),
        user.name.clone(),
        user.token.clone(),
    );

    Ok(Json(MessageResponse::new(
        "User created. Check your email to confirm your account",
    )))
}
