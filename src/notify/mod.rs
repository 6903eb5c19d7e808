//! Notification Module
//!
//! Fire-and-forget outbound email: account confirmation and password reset.
//! Delivery failures are logged and never block the triggering request.

/// SMTP mailer and background send helpers
pub mod mailer;

// Re-export commonly used types
pub use mailer::{spawn_account_confirmation, spawn_password_reset, Mailer};
