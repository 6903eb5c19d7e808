//! Taskroom - Main Library
//!
//! Taskroom is a multi-tenant task-collaboration backend: users own or
//! collaborate on projects, projects contain tasks, and task changes
//! propagate live to every other session viewing the same project.
//!
//! # Module Structure
//!
//! - **`access`** - Authorization engine: pure access decisions for
//!   projects and tasks
//! - **`collab`** - Collaboration registry: collaborator-set mutation and
//!   its invariants
//! - **`realtime`** - Broadcast router: project rooms, task events, the
//!   WebSocket channel
//! - **`store`** - Resource store: PostgreSQL-backed models and id
//!   validation
//! - **`auth`** - Accounts and JWT sessions
//! - **`projects`**, **`tasks`** - REST handlers over the core
//! - **`middleware`** - Bearer-token authentication and request extractors
//! - **`notify`** - Fire-and-forget account email
//! - **`routes`**, **`server`** - Router assembly, state and configuration
//! - **`error`** - Error taxonomy shared by every handler
//!
//! # Access Model
//!
//! Every project has exactly one creator and a set of collaborators.
//! Creators hold all rights; collaborators may view project detail and
//! toggle task completion, nothing else. The realtime layer re-checks read
//! access when a session joins a project room.

/// Authorization engine
pub mod access;

/// Accounts and JWT sessions
pub mod auth;

/// Collaboration registry
pub mod collab;

/// Error taxonomy
pub mod error;

/// Authentication middleware and extractors
pub mod middleware;

/// Outbound account email
pub mod notify;

/// Project HTTP surface
pub mod projects;

/// Realtime broadcast router
pub mod realtime;

/// Route configuration
pub mod routes;

/// Server state and initialization
pub mod server;

/// Resource store
pub mod store;

/// Task HTTP surface
pub mod tasks;
