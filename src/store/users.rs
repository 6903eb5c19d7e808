/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations. Authentication
 * material (the bcrypt hash) never leaves the store layer; response types
 * are built from `UserSummary` or explicit fields.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// User struct representing a user in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user id (24-hex)
    pub id: String,
    /// Display name
    pub name: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Whether the account confirmation token has been redeemed
    pub confirmed: bool,
    /// Single-use confirmation/recovery token, empty when unused
    pub token: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user: the fields safe to show other members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl User {
    /// Public view of this user.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Create a new, unconfirmed user carrying a fresh confirmation token.
pub async fn create(
    pool: &PgPool,
    id: String,
    name: String,
    email: String,
    password_hash: String,
    token: String,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password_hash, confirmed, token, created_at, updated_at)
        VALUES ($1, $2, $3, $4, FALSE, $5, $6, $7)
        RETURNING id, name, email, password_hash, confirmed, token, created_at, updated_at
        "#,
    )
    .bind(&id)
    .bind(&name)
    .bind(&email)
    .bind(&password_hash)
    .bind(&token)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by id
pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, confirmed, token, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, confirmed, token, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by a pending single-use token.
///
/// An empty token never matches: a cleared token means "unused", not a value.
pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<User>, sqlx::Error> {
    if token.is_empty() {
        return Ok(None);
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, confirmed, token, created_at, updated_at
        FROM users
        WHERE token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Persist the mutable fields of a user (hash, confirmation flag, token).
pub async fn save(pool: &PgPool, user: &User) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET name = $1, email = $2, password_hash = $3, confirmed = $4, token = $5, updated_at = $6
        WHERE id = $7
        RETURNING id, name, email, password_hash, confirmed, token, created_at, updated_at
        "#,
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.confirmed)
    .bind(&user.token)
    .bind(now)
    .bind(&user.id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Look up public summaries for a set of user ids.
///
/// Ids that match no user are simply absent from the result; callers treat
/// a missing identity as an unresolved weak reference.
pub async fn find_summaries(pool: &PgPool, ids: &[String]) -> Result<Vec<UserSummary>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let summaries = sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT id, name, email
        FROM users
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: "65a1b2c3d4e5f60718293a4b".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$2b$10$hash".to_string(),
            confirmed: true,
            token: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_summary_drops_sensitive_fields() {
        let user = sample_user();
        let summary = user.summary();
        assert_eq!(summary.id, user.id);
        assert_eq!(summary.name, "Ada");
        assert_eq!(summary.email, "ada@example.com");

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("token").is_none());
        assert!(json.get("confirmed").is_none());
    }
}
