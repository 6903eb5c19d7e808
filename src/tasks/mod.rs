//! Tasks Module
//!
//! HTTP surface for tasks. Field operations are creator-only; the status
//! toggle is open to collaborators. Successful mutations are relayed to the
//! owning project's room.

/// HTTP handlers
pub mod handlers;
