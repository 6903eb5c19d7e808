/**
 * Task Model and Database Operations
 *
 * Tasks belong to exactly one project. Creation and deletion are two-sided:
 * the task row and the owning project's task list change inside a single
 * transaction, so membership and back-reference never disagree.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::store::projects::Project;

/// Task priority. Serialized as "Low" / "Medium" / "High" on the wire and
/// stored as the same text in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Task struct representing a task in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Task {
    /// Unique task id (24-hex)
    pub id: String,
    pub name: String,
    pub description: String,
    /// One of "Low", "Medium", "High"; validated at the API boundary
    pub priority: String,
    pub due_date: DateTime<Utc>,
    /// Completion state; `false` is pending
    pub completed: bool,
    /// The last user who toggled the state, in either direction.
    /// Weak reference: the user may no longer exist.
    pub completed_by: Option<String>,
    /// Owning project; immutable after creation
    pub project: String,
    /// Optimistic-concurrency counter, bumped on every guarded save
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create a task and append it to the owning project's task list, in one
/// transaction.
pub async fn create(
    pool: &PgPool,
    project: &Project,
    id: String,
    name: String,
    description: String,
    priority: Priority,
    due_date: DateTime<Utc>,
) -> Result<Task, sqlx::Error> {
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let task = sqlx::query_as::<_, Task>(
        r#"
        INSERT INTO tasks (id, name, description, priority, due_date, completed, completed_by, project, version, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, FALSE, NULL, $6, 0, $7, $8)
        RETURNING id, name, description, priority, due_date, completed, completed_by, project, version, created_at, updated_at
        "#,
    )
    .bind(&id)
    .bind(&name)
    .bind(&description)
    .bind(priority.as_str())
    .bind(due_date)
    .bind(&project.id)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE projects
        SET tasks = array_append(tasks, $1), version = version + 1, updated_at = $2
        WHERE id = $3
        "#,
    )
    .bind(&task.id)
    .bind(now)
    .bind(&project.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(task)
}

/// Get task by id
pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Task>, sqlx::Error> {
    let task = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, name, description, priority, due_date, completed, completed_by, project, version, created_at, updated_at
        FROM tasks
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// All tasks belonging to a project. Callers that need the project's
/// presentation order re-sort by the project's task list.
pub async fn find_by_project(pool: &PgPool, project_id: &str) -> Result<Vec<Task>, sqlx::Error> {
    let tasks = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, name, description, priority, due_date, completed, completed_by, project, version, created_at, updated_at
        FROM tasks
        WHERE project = $1
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Persist edited task fields, guarded by the version counter.
///
/// Returns `None` when the stored version no longer matches.
pub async fn update_fields(pool: &PgPool, task: &Task) -> Result<Option<Task>, sqlx::Error> {
    let now = Utc::now();

    let updated = sqlx::query_as::<_, Task>(
        r#"
        UPDATE tasks
        SET name = $1, description = $2, priority = $3, due_date = $4, version = version + 1, updated_at = $5
        WHERE id = $6 AND version = $7
        RETURNING id, name, description, priority, due_date, completed, completed_by, project, version, created_at, updated_at
        "#,
    )
    .bind(&task.name)
    .bind(&task.description)
    .bind(&task.priority)
    .bind(task.due_date)
    .bind(now)
    .bind(&task.id)
    .bind(task.version)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

/// Persist a completion toggle, stamping the acting user. Guarded by the
/// version counter so two racing toggles cannot silently cancel out.
pub async fn set_status(
    pool: &PgPool,
    task: &Task,
    completed: bool,
    completed_by: &str,
) -> Result<Option<Task>, sqlx::Error> {
    let now = Utc::now();

    let updated = sqlx::query_as::<_, Task>(
        r#"
        UPDATE tasks
        SET completed = $1, completed_by = $2, version = version + 1, updated_at = $3
        WHERE id = $4 AND version = $5
        RETURNING id, name, description, priority, due_date, completed, completed_by, project, version, created_at, updated_at
        "#,
    )
    .bind(completed)
    .bind(completed_by)
    .bind(now)
    .bind(&task.id)
    .bind(task.version)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

/// Delete a task and unlink it from its project's task list, in one
/// transaction.
pub async fn delete(pool: &PgPool, task: &Task) -> Result<(), sqlx::Error> {
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE projects
        SET tasks = array_remove(tasks, $1), version = version + 1, updated_at = $2
        WHERE id = $3
        "#,
    )
    .bind(&task.id)
    .bind(now)
    .bind(&task.project)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(&task.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_as_str() {
        assert_eq!(Priority::Low.as_str(), "Low");
        assert_eq!(Priority::Medium.as_str(), "Medium");
        assert_eq!(Priority::High.as_str(), "High");
    }

    #[test]
    fn test_priority_serde_round_trip() {
        let json = serde_json::to_string(&Priority::Medium).unwrap();
        assert_eq!(json, r#""Medium""#);

        let parsed: Priority = serde_json::from_str(r#""High""#).unwrap();
        assert_eq!(parsed, Priority::High);
    }

    #[test]
    fn test_priority_rejects_unknown_value() {
        let parsed: Result<Priority, _> = serde_json::from_str(r#""Urgent""#);
        assert!(parsed.is_err());
    }
}
