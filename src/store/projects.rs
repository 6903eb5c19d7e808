/**
 * Project Model and Database Operations
 *
 * A project row owns both membership sets: the collaborator set and the
 * ordered task list. Field updates are guarded by the version counter;
 * membership mutations use atomic array operations so a concurrent
 * read-modify-write cannot corrupt either set.
 */

use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Project struct representing a project in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Project {
    /// Unique project id (24-hex)
    pub id: String,
    pub name: String,
    pub description: String,
    /// Client the project is delivered for
    pub client: String,
    pub due_date: DateTime<Utc>,
    /// The sole owner; immutable after creation
    pub creator: String,
    /// Collaborator user ids; unique, never contains the creator
    pub collaborators: Vec<String>,
    /// Ordered task ids; mirrors each task's project back-reference
    pub tasks: Vec<String>,
    /// Optimistic-concurrency counter, bumped on every guarded save
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Whether the given user is the project creator.
    pub fn is_creator(&self, user_id: &str) -> bool {
        self.creator == user_id
    }

    /// Whether the given user is in the collaborator set.
    pub fn is_collaborator(&self, user_id: &str) -> bool {
        self.collaborators.iter().any(|c| c == user_id)
    }
}

/// Create a new project owned by `creator`.
pub async fn create(
    pool: &PgPool,
    id: String,
    name: String,
    description: String,
    client: String,
    due_date: DateTime<Utc>,
    creator: &str,
) -> Result<Project, sqlx::Error> {
    let now = Utc::now();

    let project = sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (id, name, description, client, due_date, creator, collaborators, tasks, version, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, '{}', '{}', 0, $7, $8)
        RETURNING id, name, description, client, due_date, creator, collaborators, tasks, version, created_at, updated_at
        "#,
    )
    .bind(&id)
    .bind(&name)
    .bind(&description)
    .bind(&client)
    .bind(due_date)
    .bind(creator)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(project)
}

/// Get project by id
pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Project>, sqlx::Error> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        SELECT id, name, description, client, due_date, creator, collaborators, tasks, version, created_at, updated_at
        FROM projects
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(project)
}

/// All projects the user can see: created by them or shared with them.
pub async fn find_for_member(pool: &PgPool, user_id: &str) -> Result<Vec<Project>, sqlx::Error> {
    let projects = sqlx::query_as::<_, Project>(
        r#"
        SELECT id, name, description, client, due_date, creator, collaborators, tasks, version, created_at, updated_at
        FROM projects
        WHERE creator = $1 OR $1 = ANY(collaborators)
        ORDER BY created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(projects)
}

/// Persist edited project fields, guarded by the version counter.
///
/// Returns `None` when the stored version no longer matches `project.version`,
/// meaning another writer got there first.
pub async fn update_fields(pool: &PgPool, project: &Project) -> Result<Option<Project>, sqlx::Error> {
    let now = Utc::now();

    let updated = sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects
        SET name = $1, description = $2, client = $3, due_date = $4, version = version + 1, updated_at = $5
        WHERE id = $6 AND version = $7
        RETURNING id, name, description, client, due_date, creator, collaborators, tasks, version, created_at, updated_at
        "#,
    )
    .bind(&project.name)
    .bind(&project.description)
    .bind(&project.client)
    .bind(project.due_date)
    .bind(now)
    .bind(&project.id)
    .bind(project.version)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

/// Append a collaborator, atomically refusing a duplicate.
///
/// Returns `None` when the user was already present (or the project row is
/// gone); the caller distinguishes the two from its earlier snapshot.
pub async fn add_collaborator(
    pool: &PgPool,
    project_id: &str,
    user_id: &str,
) -> Result<Option<Project>, sqlx::Error> {
    let now = Utc::now();

    let updated = sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects
        SET collaborators = array_append(collaborators, $1), version = version + 1, updated_at = $2
        WHERE id = $3 AND NOT $1 = ANY(collaborators)
        RETURNING id, name, description, client, due_date, creator, collaborators, tasks, version, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(now)
    .bind(project_id)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

/// Remove a collaborator. Removing an absent id is a no-op, but the row is
/// re-persisted (version bump, fresh `updated_at`) either way.
pub async fn remove_collaborator(
    pool: &PgPool,
    project_id: &str,
    user_id: &str,
) -> Result<Option<Project>, sqlx::Error> {
    let now = Utc::now();

    let updated = sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects
        SET collaborators = array_remove(collaborators, $1), version = version + 1, updated_at = $2
        WHERE id = $3
        RETURNING id, name, description, client, due_date, creator, collaborators, tasks, version, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(now)
    .bind(project_id)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

/// Delete a project together with its tasks in one transaction.
pub async fn delete(pool: &PgPool, project_id: &str) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM tasks WHERE project = $1")
        .bind(project_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(project_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        let now = Utc::now();
        Project {
            id: "65a1b2c3d4e5f60718293a4b".to_string(),
            name: "Website relaunch".to_string(),
            description: "New marketing site".to_string(),
            client: "Acme".to_string(),
            due_date: now,
            creator: "111111111111111111111111".to_string(),
            collaborators: vec!["222222222222222222222222".to_string()],
            tasks: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_is_creator() {
        let project = sample_project();
        assert!(project.is_creator("111111111111111111111111"));
        assert!(!project.is_creator("222222222222222222222222"));
    }

    #[test]
    fn test_is_collaborator() {
        let project = sample_project();
        assert!(project.is_collaborator("222222222222222222222222"));
        assert!(!project.is_collaborator("111111111111111111111111"));
        assert!(!project.is_collaborator("333333333333333333333333"));
    }
}
