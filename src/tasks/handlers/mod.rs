//! Task Handlers
//!
//! HTTP handlers for the task lifecycle.

/// Request/response types
pub mod types;

/// Create/get/update/delete
pub mod crud;

/// Completion toggle
pub mod status;

// Re-export handlers
pub use crud::{create_task, delete_task, get_task, update_task};
pub use status::toggle_task_status;
