//! Project Handlers
//!
//! HTTP handlers for project CRUD and collaborator management.

/// Request/response types
pub mod types;

/// List/create/get/update/delete
pub mod crud;

/// Collaborator lookup and membership
pub mod collaborators;

// Re-export handlers
pub use collaborators::{add_collaborator, find_collaborator, remove_collaborator};
pub use crud::{create_project, delete_project, get_project, list_projects, update_project};
