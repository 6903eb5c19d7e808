/**
 * Project CRUD Handlers
 *
 * List, create, fetch, edit and delete projects. The fetch handler
 * assembles the full detail: tasks in the project's presentation order with
 * resolved togglers, plus the collaborator roster.
 *
 * Checks run in a fixed order: id shape, existence, authorization. Writes
 * are version-guarded and fail with `conflict` when another writer got
 * there first.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::access::{can_access_project, ProjectAction};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::projects::handlers::types::{
    CreateProjectRequest, MessageResponse, ProjectDetailResponse, ProjectResponse, ProjectSummary,
    UpdateProjectRequest,
};
use crate::store::users::UserSummary;
use crate::store::{projects, tasks, users, ObjectId};
use crate::tasks::handlers::types::TaskResponse;

/// List projects handler (GET /api/projects)
///
/// Returns every project the caller created or collaborates on, without
/// task lists.
pub async fn list_projects(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<ProjectSummary>>, ApiError> {
    let projects = projects::find_for_member(&pool, &user.user_id).await?;

    Ok(Json(projects.iter().map(ProjectSummary::from_project).collect()))
}

/// Create project handler (POST /api/projects)
///
/// The caller becomes the project's creator; the creator is immutable for
/// the life of the project.
pub async fn create_project(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    if request.name.trim().is_empty()
        || request.description.trim().is_empty()
        || request.client.trim().is_empty()
    {
        return Err(ApiError::validation(
            "name, description and client must not be empty",
        ));
    }

    let project = projects::create(
        &pool,
        ObjectId::generate().into_string(),
        request.name.trim().to_string(),
        request.description.trim().to_string(),
        request.client.trim().to_string(),
        request.due_date.unwrap_or_else(Utc::now),
        &user.user_id,
    )
    .await?;

    tracing::info!("Project {} created by {}", project.id, user.user_id);

    Ok(Json(ProjectResponse::from_project(&project)))
}

/// Get project handler (GET /api/projects/{id})
///
/// Full detail for the creator or a collaborator.
pub async fn get_project(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ProjectDetailResponse>, ApiError> {
    let id = ObjectId::parse(&id)?;

    let project = projects::find_by_id(&pool, id.as_str())
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    if !can_access_project(&user.user_id, &project, ProjectAction::ViewDetail) {
        return Err(ApiError::Unauthorized);
    }

    let mut project_tasks = tasks::find_by_project(&pool, &project.id).await?;

    // Present tasks in the project's list order.
    let order: HashMap<&str, usize> = project
        .tasks
        .iter()
        .enumerate()
        .map(|(position, task_id)| (task_id.as_str(), position))
        .collect();
    project_tasks.sort_by_key(|task| order.get(task.id.as_str()).copied().unwrap_or(usize::MAX));

    // Resolve the roster and all togglers in one batch.
    let mut wanted: Vec<String> = project.collaborators.clone();
    wanted.extend(project_tasks.iter().filter_map(|task| task.completed_by.clone()));
    wanted.sort();
    wanted.dedup();

    let summaries = users::find_summaries(&pool, &wanted).await?;
    let by_id: HashMap<&str, &UserSummary> =
        summaries.iter().map(|summary| (summary.id.as_str(), summary)).collect();

    let task_responses: Vec<TaskResponse> = project_tasks
        .iter()
        .map(|task| {
            let completed_by = task
                .completed_by
                .as_deref()
                .and_then(|user_id| by_id.get(user_id).map(|s| (*s).clone()));
            TaskResponse::from_task(task, completed_by)
        })
        .collect();

    let collaborators: Vec<UserSummary> = project
        .collaborators
        .iter()
        .filter_map(|user_id| by_id.get(user_id.as_str()).map(|s| (*s).clone()))
        .collect();

    Ok(Json(ProjectDetailResponse {
        id: project.id,
        name: project.name,
        description: project.description,
        client: project.client,
        due_date: project.due_date,
        creator: project.creator,
        collaborators,
        tasks: task_responses,
        version: project.version,
        created_at: project.created_at,
        updated_at: project.updated_at,
    }))
}

/// Update project handler (PUT /api/projects/{id})
///
/// Creator only. Absent fields keep their stored values; the save is
/// version-guarded.
pub async fn update_project(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let id = ObjectId::parse(&id)?;

    let mut project = projects::find_by_id(&pool, id.as_str())
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    if !can_access_project(&user.user_id, &project, ProjectAction::Edit) {
        return Err(ApiError::Unauthorized);
    }

    if let Some(name) = request.name {
        project.name = name;
    }
    if let Some(description) = request.description {
        project.description = description;
    }
    if let Some(client) = request.client {
        project.client = client;
    }
    if let Some(due_date) = request.due_date {
        project.due_date = due_date;
    }

    let updated = projects::update_fields(&pool, &project)
        .await?
        .ok_or(ApiError::Conflict)?;

    tracing::info!("Project {} updated by {}", updated.id, user.user_id);

    Ok(Json(ProjectResponse::from_project(&updated)))
}

/// Delete project handler (DELETE /api/projects/{id})
///
/// Creator only. Removes the project and all of its tasks in one
/// transaction.
pub async fn delete_project(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ObjectId::parse(&id)?;

    let project = projects::find_by_id(&pool, id.as_str())
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    if !can_access_project(&user.user_id, &project, ProjectAction::Delete) {
        return Err(ApiError::Unauthorized);
    }

    projects::delete(&pool, &project.id).await?;

    tracing::info!("Project {} deleted by {}", project.id, user.user_id);

    Ok(Json(MessageResponse::new("Project deleted")))
}
