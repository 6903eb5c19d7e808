//! Realtime Broadcast Module
//!
//! Relays task lifecycle events to every session viewing the same project.
//! Each project is a broadcast room; sessions join rooms explicitly over a
//! WebSocket connection and may belong to any number at once.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs    - Module exports
//! ├── events.rs - Task lifecycle event types
//! ├── rooms.rs  - Room registry (project id -> broadcast channel)
//! └── socket.rs - WebSocket session handling
//! ```
//!
//! # Delivery Semantics
//!
//! Fan-out is fire-and-forget: publishing never blocks the mutating request
//! and per-session delivery failures are not surfaced to the caller. Events
//! are not persisted; a session that joins after an event was emitted must
//! re-fetch current state over HTTP. The originating session never receives
//! its own echo; it already has the authoritative result from its
//! request/response cycle.

/// Task lifecycle event types
pub mod events;

/// Room registry keyed by project id
pub mod rooms;

/// WebSocket session handling
pub mod socket;

// Re-export commonly used types
pub use events::{TaskEvent, TaskEventKind};
pub use rooms::RoomRegistry;
pub use socket::handle_events_socket;
