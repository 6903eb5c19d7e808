//! Authorization Engine
//!
//! Pure access decisions for shared resources. Given an actor id, a resource
//! snapshot and an intended operation, the engine answers yes or no. It
//! performs no I/O and has no side effects, so handlers consult it after
//! resolving the resource and before any mutation.
//!
//! # Rules
//!
//! Project:
//! - `ViewDetail` (task-bearing detail, collaborator roster): creator or
//!   collaborator.
//! - `Edit`, `Delete`, `ManageCollaborators`: creator only. No collaborator
//!   ever passes a write check.
//!
//! Task (derived from the parent project):
//! - `View`, `Edit`, `Delete`: parent-project creator only.
//! - `ToggleStatus`: creator or collaborator; collaborators may flip
//!   completion but not edit task fields.
//!
//! Malformed-id and missing-resource checks happen in the handlers before
//! these predicates run, so the engine always sees a real resource.

use crate::store::projects::Project;

/// Operations on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    /// Read the full project detail, including tasks and the roster
    ViewDetail,
    /// Edit project fields
    Edit,
    /// Delete the project
    Delete,
    /// Add or remove collaborators
    ManageCollaborators,
}

/// Operations on a task, authorized against its parent project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    /// Read the task
    View,
    /// Edit task fields
    Edit,
    /// Delete the task
    Delete,
    /// Flip the completion state
    ToggleStatus,
}

/// Whether `actor` may perform `action` on `project`.
pub fn can_access_project(actor: &str, project: &Project, action: ProjectAction) -> bool {
    match action {
        ProjectAction::ViewDetail => project.is_creator(actor) || project.is_collaborator(actor),
        ProjectAction::Edit | ProjectAction::Delete | ProjectAction::ManageCollaborators => {
            project.is_creator(actor)
        }
    }
}

/// Whether `actor` may perform `action` on a task owned by `parent`.
pub fn can_access_task(actor: &str, parent: &Project, action: TaskAction) -> bool {
    match action {
        TaskAction::View | TaskAction::Edit | TaskAction::Delete => parent.is_creator(actor),
        TaskAction::ToggleStatus => parent.is_creator(actor) || parent.is_collaborator(actor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const CREATOR: &str = "111111111111111111111111";
    const COLLABORATOR: &str = "222222222222222222222222";
    const STRANGER: &str = "333333333333333333333333";

    fn project() -> Project {
        let now = Utc::now();
        Project {
            id: "65a1b2c3d4e5f60718293a4b".to_string(),
            name: "Website relaunch".to_string(),
            description: "New marketing site".to_string(),
            client: "Acme".to_string(),
            due_date: now,
            creator: CREATOR.to_string(),
            collaborators: vec![COLLABORATOR.to_string()],
            tasks: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_view_detail_allows_creator_and_collaborators() {
        let p = project();
        assert!(can_access_project(CREATOR, &p, ProjectAction::ViewDetail));
        assert!(can_access_project(COLLABORATOR, &p, ProjectAction::ViewDetail));
        assert!(!can_access_project(STRANGER, &p, ProjectAction::ViewDetail));
    }

    #[test]
    fn test_write_actions_are_creator_only() {
        let p = project();
        for action in [
            ProjectAction::Edit,
            ProjectAction::Delete,
            ProjectAction::ManageCollaborators,
        ] {
            assert!(can_access_project(CREATOR, &p, action));
            assert!(!can_access_project(COLLABORATOR, &p, action));
            assert!(!can_access_project(STRANGER, &p, action));
        }
    }

    #[test]
    fn test_write_access_implies_creator() {
        // Monotonicity: anyone who passes a project write check is the
        // unique creator.
        let p = project();
        for actor in [CREATOR, COLLABORATOR, STRANGER] {
            if can_access_project(actor, &p, ProjectAction::Edit) {
                assert!(p.is_creator(actor));
            }
        }
    }

    #[test]
    fn test_task_field_operations_are_creator_only() {
        let p = project();
        for action in [TaskAction::View, TaskAction::Edit, TaskAction::Delete] {
            assert!(can_access_task(CREATOR, &p, action));
            assert!(!can_access_task(COLLABORATOR, &p, action));
            assert!(!can_access_task(STRANGER, &p, action));
        }
    }

    #[test]
    fn test_toggle_allows_collaborators() {
        let p = project();
        assert!(can_access_task(CREATOR, &p, TaskAction::ToggleStatus));
        assert!(can_access_task(COLLABORATOR, &p, TaskAction::ToggleStatus));
        assert!(!can_access_task(STRANGER, &p, TaskAction::ToggleStatus));
    }

    #[test]
    fn test_decision_is_a_pure_function_of_state() {
        let mut p = project();
        assert!(!can_access_project(STRANGER, &p, ProjectAction::ViewDetail));

        p.collaborators.push(STRANGER.to_string());
        assert!(can_access_project(STRANGER, &p, ProjectAction::ViewDetail));
        assert!(!can_access_project(STRANGER, &p, ProjectAction::Edit));
    }
}
