//! Resource Store Module
//!
//! Durable storage for users, projects and tasks, backed by PostgreSQL.
//! Every record is keyed by a validated 24-hex id; handlers parse ids with
//! `ObjectId::parse` before any lookup reaches this module.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs      - Module exports
//! ├── id.rs       - ObjectId validation and generation
//! ├── users.rs    - User model and queries
//! ├── projects.rs - Project model, membership sets, versioned saves
//! └── tasks.rs    - Task model, two-sided create/delete, versioned saves
//! ```
//!
//! # Consistency
//!
//! - Field edits on projects and tasks are version-guarded: a save carrying
//!   a stale version updates nothing and the handler surfaces `Conflict`.
//! - Task creation/deletion updates the task row and the owning project's
//!   task list inside one transaction.
//! - Collaborator mutations are atomic array operations on the project row.

/// Record id validation and generation
pub mod id;

/// User model and database operations
pub mod users;

/// Project model and database operations
pub mod projects;

/// Task model and database operations
pub mod tasks;

// Re-export commonly used types
pub use id::ObjectId;
pub use projects::Project;
pub use tasks::{Priority, Task};
pub use users::{User, UserSummary};
