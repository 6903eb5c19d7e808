/**
 * API Route Tables
 *
 * This module defines the REST route tables, split by authentication
 * requirement.
 *
 * # Routes
 *
 * ## Public (account lifecycle)
 * - `POST /api/users` - registration
 * - `POST /api/users/login` - login
 * - `GET  /api/users/confirm/{token}` - account confirmation
 * - `POST /api/users/recover` - start password recovery
 * - `GET  /api/users/recover/{token}` - validate a recovery token
 * - `POST /api/users/recover/{token}` - set a new password
 *
 * ## Protected (bearer JWT resolved by the auth middleware)
 * - `GET    /api/users/profile` - current identity
 * - `GET    /api/projects` / `POST /api/projects`
 * - `GET|PUT|DELETE /api/projects/{id}`
 * - `POST   /api/projects/collaborators` - candidate lookup by email
 * - `POST   /api/projects/{id}/collaborators` - add collaborator
 * - `POST   /api/projects/{id}/collaborators/remove` - remove collaborator
 * - `POST   /api/tasks`
 * - `GET|PUT|DELETE /api/tasks/{id}`
 * - `POST   /api/tasks/{id}/status` - completion toggle
 * - `GET    /events` - realtime WebSocket channel
 */

use axum::Router;

use crate::auth::handlers::{
    confirm_account, login, profile, register, reset_password, start_recovery,
    validate_recovery_token,
};
use crate::projects::handlers::{
    add_collaborator, create_project, delete_project, find_collaborator, get_project,
    list_projects, remove_collaborator, update_project,
};
use crate::realtime::socket::handle_events_socket;
use crate::server::state::AppState;
use crate::tasks::handlers::{create_task, delete_task, get_task, toggle_task_status, update_task};

/// Configure the routes that require no identity.
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/users", axum::routing::post(register))
        .route("/api/users/login", axum::routing::post(login))
        .route(
            "/api/users/confirm/{token}",
            axum::routing::get(confirm_account),
        )
        .route("/api/users/recover", axum::routing::post(start_recovery))
        .route(
            "/api/users/recover/{token}",
            axum::routing::get(validate_recovery_token).post(reset_password),
        )
}

/// Configure the routes that require a resolved identity.
///
/// The caller wraps the returned router with the auth middleware; handlers
/// here can rely on `AuthUser` being present.
pub fn configure_protected_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Account
        .route("/api/users/profile", axum::routing::get(profile))
        // Projects
        .route(
            "/api/projects",
            axum::routing::post(create_project).get(list_projects),
        )
        .route(
            "/api/projects/{id}",
            axum::routing::get(get_project)
                .put(update_project)
                .delete(delete_project),
        )
        // Collaborators
        .route(
            "/api/projects/collaborators",
            axum::routing::post(find_collaborator),
        )
        .route(
            "/api/projects/{id}/collaborators",
            axum::routing::post(add_collaborator),
        )
        .route(
            "/api/projects/{id}/collaborators/remove",
            axum::routing::post(remove_collaborator),
        )
        // Tasks
        .route("/api/tasks", axum::routing::post(create_task))
        .route(
            "/api/tasks/{id}",
            axum::routing::get(get_task)
                .put(update_task)
                .delete(delete_task),
        )
        .route(
            "/api/tasks/{id}/status",
            axum::routing::post(toggle_task_status),
        )
        // Realtime channel
        .route("/events", axum::routing::get(handle_events_socket))
}
