/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server:
 * state creation, database connection, route configuration and the periodic
 * room-pruning task.
 */

use axum::Router;
use crate::routes::router::create_router;
use crate::server::config::connect_database;
use crate::server::state::AppState;
use crate::notify::Mailer;
use crate::realtime::rooms::RoomRegistry;

/// Create and configure the Axum application
///
/// # Initialization Steps
///
/// 1. **Connect Database**: the store is required; a connection failure
///    aborts startup.
/// 2. **Create Room Registry**: the in-process map of project rooms.
/// 3. **Load Mailer**: optional; the server runs without outbound email.
/// 4. **Create Router**: all routes and middleware.
/// 5. **Spawn Maintenance**: a periodic task prunes rooms nobody views.
pub async fn create_app() -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing taskroom backend server");

    let db_pool = connect_database().await?;

    let rooms = RoomRegistry::new();

    let mailer = Mailer::from_env();
    if mailer.is_none() {
        tracing::warn!("SMTP not configured, account emails will be skipped");
    }

    let app_state = AppState {
        db_pool,
        rooms,
        mailer,
    };

    let app = create_router(app_state.clone());

    // Periodically drop room channels with no remaining subscribers.
    let prune_rooms = app_state.rooms.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300)); // 5 minutes
        loop {
            interval.tick().await;
            prune_rooms.prune_empty();
            tracing::debug!("Pruned empty project rooms");
        }
    });

    tracing::info!("Router configured with room maintenance task");

    Ok(app)
}
