/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container:
 * - Database connection pool (the Resource Store)
 * - Room registry for realtime broadcast
 * - Optional mailer (the Notification Sender)
 *
 * # Thread Safety
 *
 * All fields are cheaply cloneable handles designed for concurrent use:
 * `PgPool` is an internal pool, `RoomRegistry` shares its map behind a
 * mutex, and `Mailer` wraps an async transport.
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::notify::Mailer;
use crate::realtime::rooms::RoomRegistry;

/// Application state shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: PgPool,

    /// Registry of project rooms for realtime broadcast
    pub rooms: RoomRegistry,

    /// Outbound mailer; `None` when SMTP is not configured, in which case
    /// account emails are skipped with a warning.
    pub mailer: Option<Mailer>,
}

/// Allow handlers to extract the pool directly with `State<PgPool>`.
impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Allow handlers to extract the room registry directly.
impl FromRef<AppState> for RoomRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.rooms.clone()
    }
}

/// Allow handlers to extract the optional mailer directly.
impl FromRef<AppState> for Option<Mailer> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.mailer.clone()
    }
}
