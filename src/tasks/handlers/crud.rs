/**
 * Task CRUD Handlers
 *
 * Create, fetch, edit and delete tasks. Authorization is derived from the
 * parent project: field operations require the project creator. Creation
 * and deletion keep the project's task list and the task's back-reference
 * in step inside one transaction.
 *
 * Every successful mutation is relayed to the project's room after the
 * store write commits; the originating session is excluded from the relay.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::Utc;
use sqlx::PgPool;

use crate::access::{can_access_task, TaskAction};
use crate::error::ApiError;
use crate::middleware::auth::{AuthUser, OriginSession};
use crate::realtime::events::TaskEvent;
use crate::server::state::AppState;
use crate::store::projects::Project;
use crate::store::tasks::Task;
use crate::store::users::UserSummary;
use crate::store::{projects, tasks, users, ObjectId};
use crate::tasks::handlers::types::{
    CreateTaskRequest, MessageResponse, TaskResponse, UpdateTaskRequest,
};

/// Load the parent project of a task. A dangling back-reference surfaces as
/// `not_found` rather than a panic.
async fn load_parent_project(pool: &PgPool, task: &Task) -> Result<Project, ApiError> {
    projects::find_by_id(pool, &task.project)
        .await?
        .ok_or(ApiError::NotFound("project"))
}

/// Resolve the toggler identity of a task to its public summary.
///
/// `completed_by` is a weak reference: a vanished user resolves to `None`.
async fn resolve_completed_by(pool: &PgPool, task: &Task) -> Result<Option<UserSummary>, ApiError> {
    match &task.completed_by {
        Some(user_id) => {
            let summaries = users::find_summaries(pool, std::slice::from_ref(user_id)).await?;
            Ok(summaries.into_iter().next())
        }
        None => Ok(None),
    }
}

/// Create task handler (POST /api/tasks)
///
/// Project creator only. Appends the task to the project's ordered list and
/// creates the task row in one transaction.
pub async fn create_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    OriginSession(origin): OriginSession,
    Json(request): Json<CreateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    let project_id = ObjectId::parse(&request.project)?;

    let project = projects::find_by_id(&state.db_pool, project_id.as_str())
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    if !can_access_task(&user.user_id, &project, TaskAction::Edit) {
        return Err(ApiError::Unauthorized);
    }

    if request.name.trim().is_empty() || request.description.trim().is_empty() {
        return Err(ApiError::validation("name and description must not be empty"));
    }

    let task = tasks::create(
        &state.db_pool,
        &project,
        ObjectId::generate().into_string(),
        request.name.trim().to_string(),
        request.description.trim().to_string(),
        request.priority,
        request.due_date.unwrap_or_else(Utc::now),
    )
    .await?;

    tracing::info!("Task {} created in project {}", task.id, project.id);

    let response = TaskResponse::from_task(&task, None);
    state
        .rooms
        .publish(TaskEvent::created(&task.project, &response, origin));

    Ok(Json(response))
}

/// Get task handler (GET /api/tasks/{id})
///
/// Project creator only.
pub async fn get_task(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError> {
    let id = ObjectId::parse(&id)?;

    let task = tasks::find_by_id(&pool, id.as_str())
        .await?
        .ok_or(ApiError::NotFound("task"))?;

    let project = load_parent_project(&pool, &task).await?;

    if !can_access_task(&user.user_id, &project, TaskAction::View) {
        return Err(ApiError::Unauthorized);
    }

    let completed_by = resolve_completed_by(&pool, &task).await?;

    Ok(Json(TaskResponse::from_task(&task, completed_by)))
}

/// Update task handler (PUT /api/tasks/{id})
///
/// Project creator only. Absent fields keep their stored values; the save
/// is version-guarded.
pub async fn update_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    OriginSession(origin): OriginSession,
    Path(id): Path<String>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    let id = ObjectId::parse(&id)?;

    let mut task = tasks::find_by_id(&state.db_pool, id.as_str())
        .await?
        .ok_or(ApiError::NotFound("task"))?;

    let project = load_parent_project(&state.db_pool, &task).await?;

    if !can_access_task(&user.user_id, &project, TaskAction::Edit) {
        return Err(ApiError::Unauthorized);
    }

    if let Some(name) = request.name {
        task.name = name;
    }
    if let Some(description) = request.description {
        task.description = description;
    }
    if let Some(priority) = request.priority {
        task.priority = priority.as_str().to_string();
    }
    if let Some(due_date) = request.due_date {
        task.due_date = due_date;
    }

    let updated = tasks::update_fields(&state.db_pool, &task)
        .await?
        .ok_or(ApiError::Conflict)?;

    tracing::info!("Task {} updated by {}", updated.id, user.user_id);

    let completed_by = resolve_completed_by(&state.db_pool, &updated).await?;
    let response = TaskResponse::from_task(&updated, completed_by);
    state
        .rooms
        .publish(TaskEvent::updated(&updated.project, &response, origin));

    Ok(Json(response))
}

/// Delete task handler (DELETE /api/tasks/{id})
///
/// Project creator only. Unlinks the task from the project's list and
/// removes the row in one transaction. The broadcast payload is the
/// pre-deletion snapshot.
pub async fn delete_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    OriginSession(origin): OriginSession,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ObjectId::parse(&id)?;

    let task = tasks::find_by_id(&state.db_pool, id.as_str())
        .await?
        .ok_or(ApiError::NotFound("task"))?;

    let project = load_parent_project(&state.db_pool, &task).await?;

    if !can_access_task(&user.user_id, &project, TaskAction::Delete) {
        return Err(ApiError::Unauthorized);
    }

    // Snapshot before the row disappears; the room still needs the record.
    let completed_by = resolve_completed_by(&state.db_pool, &task).await?;
    let snapshot = TaskResponse::from_task(&task, completed_by);

    tasks::delete(&state.db_pool, &task).await?;

    tracing::info!("Task {} deleted from project {}", task.id, project.id);

    state
        .rooms
        .publish(TaskEvent::deleted(&task.project, &snapshot, origin));

    Ok(Json(MessageResponse::new("Task deleted")))
}
