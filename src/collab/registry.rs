/**
 * Collaboration Registry
 *
 * Owns mutation of a project's collaborator set and enforces its two
 * invariants: the creator is never a member, and no user appears twice.
 *
 * Callers must already have passed the authorization engine's creator-only
 * check; the registry does not re-check actor identity.
 */

use sqlx::PgPool;
use thiserror::Error;

use crate::error::ApiError;
use crate::store::projects::{self, Project};
use crate::store::users::User;

/// Invariant violations raised when mutating the collaborator set.
/// These are resource-invariant failures, not authorization failures, and
/// surface to clients with their own error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("the project creator cannot be added as a collaborator")]
    CreatorCannotBeCollaborator,
    #[error("the user is already a collaborator on this project")]
    AlreadyCollaborator,
}

/// Check the collaborator-set invariants for a candidate against a project
/// snapshot. Pure; no side effects.
pub fn check_can_add(project: &Project, candidate_id: &str) -> Result<(), RegistryError> {
    if project.is_creator(candidate_id) {
        return Err(RegistryError::CreatorCannotBeCollaborator);
    }
    if project.is_collaborator(candidate_id) {
        return Err(RegistryError::AlreadyCollaborator);
    }
    Ok(())
}

/// Add `candidate` to the project's collaborator set and persist.
///
/// Fails with `CreatorCannotBeCollaborator` or `AlreadyCollaborator` without
/// mutating anything. The persisted append re-checks membership atomically,
/// so a duplicate that slips in between the snapshot and the write is still
/// refused.
pub async fn add_collaborator(
    pool: &PgPool,
    project: &Project,
    candidate: &User,
) -> Result<Project, ApiError> {
    check_can_add(project, &candidate.id)?;

    let updated = projects::add_collaborator(pool, &project.id, &candidate.id).await?;

    match updated {
        Some(project) => {
            tracing::info!(
                "[Collab] Added collaborator {} to project {}",
                candidate.id,
                project.id
            );
            Ok(project)
        }
        None => Err(ApiError::AlreadyCollaborator),
    }
}

/// Remove `user_id` from the project's collaborator set and persist.
///
/// Removing an id that is not in the set is a no-op on the membership, but
/// the project row is always re-persisted.
pub async fn remove_collaborator(
    pool: &PgPool,
    project: &Project,
    user_id: &str,
) -> Result<Project, ApiError> {
    let updated = projects::remove_collaborator(pool, &project.id, user_id).await?;

    match updated {
        Some(project) => {
            tracing::info!(
                "[Collab] Removed collaborator {} from project {}",
                user_id,
                project.id
            );
            Ok(project)
        }
        None => Err(ApiError::NotFound("project")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    const CREATOR: &str = "111111111111111111111111";
    const MEMBER: &str = "222222222222222222222222";
    const CANDIDATE: &str = "333333333333333333333333";

    fn project() -> Project {
        let now = Utc::now();
        Project {
            id: "65a1b2c3d4e5f60718293a4b".to_string(),
            name: "Website relaunch".to_string(),
            description: "New marketing site".to_string(),
            client: "Acme".to_string(),
            due_date: now,
            creator: CREATOR.to_string(),
            collaborators: vec![MEMBER.to_string()],
            tasks: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_creator_can_never_be_added() {
        let p = project();
        assert_eq!(
            check_can_add(&p, CREATOR),
            Err(RegistryError::CreatorCannotBeCollaborator)
        );
        // The set is untouched by a failed check.
        assert_eq!(p.collaborators, vec![MEMBER.to_string()]);
    }

    #[test]
    fn test_duplicate_member_is_rejected() {
        let p = project();
        assert_eq!(check_can_add(&p, MEMBER), Err(RegistryError::AlreadyCollaborator));
        assert_eq!(p.collaborators.len(), 1);
    }

    #[test]
    fn test_fresh_candidate_passes() {
        let p = project();
        assert_eq!(check_can_add(&p, CANDIDATE), Ok(()));
    }

    #[test]
    fn test_second_add_of_same_candidate_fails() {
        let mut p = project();
        assert_eq!(check_can_add(&p, CANDIDATE), Ok(()));
        p.collaborators.push(CANDIDATE.to_string());

        assert_eq!(check_can_add(&p, CANDIDATE), Err(RegistryError::AlreadyCollaborator));
        assert_eq!(p.collaborators.len(), 2);
    }

    #[test]
    fn test_invariant_holds_after_membership_changes() {
        // creator ∉ collaborators must survive any sequence of adds the
        // registry admits.
        let mut p = project();
        for candidate in [CANDIDATE, "444444444444444444444444", CREATOR, MEMBER] {
            if check_can_add(&p, candidate).is_ok() {
                p.collaborators.push(candidate.to_string());
            }
        }
        assert!(!p.collaborators.iter().any(|c| c == CREATOR));

        let mut unique = p.collaborators.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), p.collaborators.len());
    }
}
