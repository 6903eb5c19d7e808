//! Account Handlers
//!
//! HTTP handlers for the account lifecycle.
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Handler exports
//! ├── types.rs    - Request/response types
//! ├── register.rs - POST /api/users
//! ├── login.rs    - POST /api/users/login
//! ├── confirm.rs  - GET  /api/users/confirm/{token}
//! ├── password.rs - password recovery flow
//! └── profile.rs  - GET  /api/users/profile
//! ```

/// Request/response types
pub mod types;

/// User registration handler
pub mod register;

/// User authentication handler
pub mod login;

/// Account confirmation handler
pub mod confirm;

/// Password recovery handlers
pub mod password;

/// Profile handler
pub mod profile;

// Re-export handlers
pub use confirm::confirm_account;
pub use login::login;
pub use password::{reset_password, start_recovery, validate_recovery_token};
pub use profile::profile;
pub use register::register;
