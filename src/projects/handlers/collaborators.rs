/**
 * Collaborator Handlers
 *
 * Lookup, add and remove collaborators on a project. Set mutation goes
 * through the collaboration registry, which owns the invariants: the
 * creator is never a member and nobody appears twice. Both mutations are
 * creator-only operations.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use sqlx::PgPool;

use crate::access::{can_access_project, ProjectAction};
use crate::collab;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::projects::handlers::types::{
    AddCollaboratorRequest, FindCollaboratorRequest, MessageResponse, RemoveCollaboratorRequest,
};
use crate::store::users::UserSummary;
use crate::store::{projects, users, ObjectId};

/// Find collaborator handler (POST /api/projects/collaborators)
///
/// Looks up a candidate by email, returning only public fields.
pub async fn find_collaborator(
    State(pool): State<PgPool>,
    AuthUser(_user): AuthUser,
    Json(request): Json<FindCollaboratorRequest>,
) -> Result<Json<UserSummary>, ApiError> {
    let user = users::find_by_email(&pool, &request.email)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    Ok(Json(user.summary()))
}

/// Add collaborator handler (POST /api/projects/{id}/collaborators)
///
/// # Errors
///
/// * `not_found` (404) - unknown project, or no user with this email
/// * `unauthorized` (403) - caller is not the creator
/// * `creator_cannot_be_collaborator` / `already_collaborator` (409) -
///   invariant violations from the registry, set untouched
pub async fn add_collaborator(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(request): Json<AddCollaboratorRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ObjectId::parse(&id)?;

    let project = projects::find_by_id(&pool, id.as_str())
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    if !can_access_project(&user.user_id, &project, ProjectAction::ManageCollaborators) {
        return Err(ApiError::Unauthorized);
    }

    let candidate = users::find_by_email(&pool, &request.email)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    collab::add_collaborator(&pool, &project, &candidate).await?;

    Ok(Json(MessageResponse::new("Collaborator added")))
}

/// Remove collaborator handler (POST /api/projects/{id}/collaborators/remove)
///
/// Removing a user who is not a member is a no-op; the project is
/// re-persisted either way.
pub async fn remove_collaborator(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(request): Json<RemoveCollaboratorRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ObjectId::parse(&id)?;

    let project = projects::find_by_id(&pool, id.as_str())
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    if !can_access_project(&user.user_id, &project, ProjectAction::ManageCollaborators) {
        return Err(ApiError::Unauthorized);
    }

    let member_id = ObjectId::parse(&request.id)?;

    collab::remove_collaborator(&pool, &project, member_id.as_str()).await?;

    Ok(Json(MessageResponse::new("Collaborator removed")))
}
