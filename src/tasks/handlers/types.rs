/**
 * Task Handler Types
 *
 * Request and response types for the task endpoints. `TaskResponse` is also
 * the payload shape of realtime task events and of the tasks embedded in a
 * project detail.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::tasks::{Priority, Task};
use crate::store::users::UserSummary;

/// Task creation request
#[derive(Deserialize, Debug)]
pub struct CreateTaskRequest {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    /// Defaults to "now" when omitted
    pub due_date: Option<DateTime<Utc>>,
    /// Owning project id
    pub project: String,
}

/// Task edit request; absent fields keep their stored values.
#[derive(Deserialize, Debug)]
pub struct UpdateTaskRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Task record as returned to clients and broadcast to rooms.
#[derive(Serialize, Debug, Clone)]
pub struct TaskResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub priority: String,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
    /// The identity that last toggled the task, resolved to its public
    /// summary; `None` when never toggled or when the user is gone.
    pub completed_by: Option<UserSummary>,
    pub project: String,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskResponse {
    /// Build a response from a stored task and its resolved toggler.
    pub fn from_task(task: &Task, completed_by: Option<UserSummary>) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            description: task.description.clone(),
            priority: task.priority.clone(),
            due_date: task.due_date,
            completed: task.completed,
            completed_by,
            project: task.project.clone(),
            version: task.version,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
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
