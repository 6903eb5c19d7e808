/**
 * Task Status Handler
 *
 * The single state transition on a task: toggling Pending <-> Completed
 * (POST /api/tasks/{id}/status). Collaborators may toggle; only the project
 * creator may edit task fields.
 *
 * Every toggle stamps the acting user as `completed_by`, in both
 * directions: marking a task pending again still records who did it. No
 * toggle history is kept.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::access::{can_access_task, TaskAction};
use crate::error::ApiError;
use crate::middleware::auth::{AuthUser, OriginSession};
use crate::realtime::events::TaskEvent;
use crate::server::state::AppState;
use crate::store::users::UserSummary;
use crate::store::{projects, tasks, ObjectId};
use crate::tasks::handlers::types::TaskResponse;

/// Toggle task status handler
///
/// # Errors
///
/// * `malformed_identifier` (400), `not_found` (404) - checked before
///   authorization
/// * `unauthorized` (403) - caller is neither creator nor collaborator
/// * `conflict` (409) - a racing toggle got there first
pub async fn toggle_task_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    OriginSession(origin): OriginSession,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError> {
    let id = ObjectId::parse(&id)?;

    let task = tasks::find_by_id(&state.db_pool, id.as_str())
        .await?
        .ok_or(ApiError::NotFound("task"))?;

    let project = projects::find_by_id(&state.db_pool, &task.project)
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    if !can_access_task(&user.user_id, &project, TaskAction::ToggleStatus) {
        return Err(ApiError::Unauthorized);
    }

    let updated = tasks::set_status(&state.db_pool, &task, !task.completed, &user.user_id)
        .await?
        .ok_or(ApiError::Conflict)?;

    tracing::info!(
        "Task {} toggled to {} by {}",
        updated.id,
        if updated.completed { "completed" } else { "pending" },
        user.user_id
    );

    // The toggler is the caller; the resolved identity needs no lookup.
    let completed_by = Some(UserSummary {
        id: user.user_id,
        name: user.name,
        email: user.email,
    });
    let response = TaskResponse::from_task(&updated, completed_by);
    state
        .rooms
        .publish(TaskEvent::status_changed(&updated.project, &response, origin));

    Ok(Json(response))
}
