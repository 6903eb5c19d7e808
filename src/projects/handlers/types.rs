/**
 * Project Handler Types
 *
 * Request and response types for the project endpoints. The list endpoint
 * returns summaries without task lists; the detail endpoint resolves tasks
 * and the collaborator roster.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::projects::Project;
use crate::store::users::UserSummary;
use crate::tasks::handlers::types::TaskResponse;

/// Project creation request
#[derive(Deserialize, Debug)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    pub client: String,
    /// Defaults to "now" when omitted
    pub due_date: Option<DateTime<Utc>>,
}

/// Project edit request; absent fields keep their stored values.
#[derive(Deserialize, Debug)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub client: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Collaborator lookup request (search by email before adding).
#[derive(Deserialize, Debug)]
pub struct FindCollaboratorRequest {
    pub email: String,
}

/// Add-collaborator request: candidates are addressed by email.
#[derive(Deserialize, Debug)]
pub struct AddCollaboratorRequest {
    pub email: String,
}

/// Remove-collaborator request: members are addressed by id.
#[derive(Deserialize, Debug)]
pub struct RemoveCollaboratorRequest {
    pub id: String,
}

/// Project record with raw membership ids, as returned by create/update.
#[derive(Serialize, Debug)]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub client: String,
    pub due_date: DateTime<Utc>,
    pub creator: String,
    pub collaborators: Vec<String>,
    pub tasks: Vec<String>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectResponse {
    pub fn from_project(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            client: project.client.clone(),
            due_date: project.due_date,
            creator: project.creator.clone(),
            collaborators: project.collaborators.clone(),
            tasks: project.tasks.clone(),
            version: project.version,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

/// Project summary for the list endpoint: no task list.
#[derive(Serialize, Debug)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub client: String,
    pub due_date: DateTime<Utc>,
    pub creator: String,
    pub collaborators: Vec<String>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectSummary {
    pub fn from_project(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            client: project.client.clone(),
            due_date: project.due_date,
            creator: project.creator.clone(),
            collaborators: project.collaborators.clone(),
            version: project.version,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

/// Full project detail: tasks in presentation order with resolved togglers,
/// plus the collaborator roster.
#[derive(Serialize, Debug)]
pub struct ProjectDetailResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub client: String,
    pub due_date: DateTime<Utc>,
    pub creator: String,
    pub collaborators: Vec<UserSummary>,
    pub tasks: Vec<TaskResponse>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Plain acknowledgement with a human-readable message.
#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
