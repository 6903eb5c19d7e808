/**
 * Task Lifecycle Events
 *
 * This module defines the events relayed to project rooms when a task
 * mutation commits. Each event carries the affected task record as its
 * payload and is routed by the owning project's id.
 *
 * # Event Types
 *
 * - `task-created` - a task was added to the project
 * - `task-deleted` - a task was removed (payload is the pre-deletion snapshot)
 * - `task-updated` - task fields were edited
 * - `task-status-changed` - the completion state was toggled
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of task lifecycle event, matching the wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskEventKind {
    TaskCreated,
    TaskDeleted,
    TaskUpdated,
    TaskStatusChanged,
}

/// A task lifecycle event broadcast to every other session viewing the
/// owning project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEvent {
    /// Event kind, serialized as the frame's `type` field
    #[serde(rename = "type")]
    pub kind: TaskEventKind,
    /// Routing key: the id of the project room this event belongs to
    pub project: String,
    /// The task record (JSON-serialized response shape)
    pub payload: serde_json::Value,
    /// Session that performed the mutation. Used to suppress the echo back
    /// to the originator; never serialized to clients.
    #[serde(skip)]
    pub origin: Option<Uuid>,
    /// Timestamp when the event was emitted (RFC 3339)
    pub timestamp: String,
}

impl TaskEvent {
    /// Create a new event for a task payload.
    pub fn new<T: Serialize>(
        kind: TaskEventKind,
        project: &str,
        task: &T,
        origin: Option<Uuid>,
    ) -> Self {
        // Task response types are plain data; serialization cannot fail.
        let payload = serde_json::to_value(task).unwrap_or(serde_json::Value::Null);
        Self {
            kind,
            project: project.to_string(),
            payload,
            origin,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn created<T: Serialize>(project: &str, task: &T, origin: Option<Uuid>) -> Self {
        Self::new(TaskEventKind::TaskCreated, project, task, origin)
    }

    pub fn deleted<T: Serialize>(project: &str, task: &T, origin: Option<Uuid>) -> Self {
        Self::new(TaskEventKind::TaskDeleted, project, task, origin)
    }

    pub fn updated<T: Serialize>(project: &str, task: &T, origin: Option<Uuid>) -> Self {
        Self::new(TaskEventKind::TaskUpdated, project, task, origin)
    }

    pub fn status_changed<T: Serialize>(project: &str, task: &T, origin: Option<Uuid>) -> Self {
        Self::new(TaskEventKind::TaskStatusChanged, project, task, origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_carries_payload_and_room() {
        let event = TaskEvent::created(
            "65a1b2c3d4e5f60718293a4b",
            &serde_json::json!({"name": "Write docs"}),
            None,
        );
        assert_eq!(event.kind, TaskEventKind::TaskCreated);
        assert_eq!(event.project, "65a1b2c3d4e5f60718293a4b");
        assert_eq!(event.payload["name"], "Write docs");
        assert!(!event.timestamp.is_empty());
    }

    #[test]
    fn test_kind_wire_names() {
        let json = serde_json::to_string(&TaskEventKind::TaskStatusChanged).unwrap();
        assert_eq!(json, r#""task-status-changed""#);
        let json = serde_json::to_string(&TaskEventKind::TaskCreated).unwrap();
        assert_eq!(json, r#""task-created""#);
    }

    #[test]
    fn test_origin_is_not_serialized() {
        let origin = Uuid::new_v4();
        let event = TaskEvent::updated("65a1b2c3d4e5f60718293a4b", &serde_json::json!({}), Some(origin));
        let json = serde_json::to_value(&event).unwrap();

        assert!(json.get("origin").is_none());
        assert_eq!(json["type"], "task-updated");
        assert_eq!(json["project"], "65a1b2c3d4e5f60718293a4b");
    }
}
