//! Authentication Module
//!
//! User accounts and session management: registration with email
//! confirmation, login, password recovery and JWT sessions.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs      - Module exports
//! ├── sessions.rs - JWT token management
//! └── handlers/   - HTTP handlers for the account endpoints
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: user created unconfirmed, confirmation token emailed
//! 2. **Confirm**: token redeemed (single use), account becomes usable
//! 3. **Login**: credentials verified, JWT returned
//! 4. **Requests**: bearer token resolved by the auth middleware
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Login failures do not reveal whether an email has an account
//! - Tokens expire after 30 days

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for account endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
pub use handlers::{confirm_account, login, profile, register};
