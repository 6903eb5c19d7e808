/**
 * Account Handler Types
 *
 * Request and response types shared by the account handlers: registration,
 * login, confirmation, password recovery and profile.
 */

use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Email address (must be unique)
    pub email: String,
    /// Password (hashed before storage, never stored as-is)
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Recovery start request
#[derive(Deserialize, Serialize, Debug)]
pub struct RecoverRequest {
    pub email: String,
}

/// New password request, sent together with a recovery token
#[derive(Deserialize, Serialize, Debug)]
pub struct NewPasswordRequest {
    pub password: String,
}

/// Auth response returned by login: the JWT plus the public user record.
#[derive(Serialize, Debug)]
pub struct AuthResponse {
    /// JWT token for authentication (30-day expiration)
    pub token: String,
    pub user: UserResponse,
}

/// Public user record; never carries authentication material.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Plain acknowledgement with a human-readable message.
#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
