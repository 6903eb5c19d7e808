/**
 * Project Rooms
 *
 * Each project is a broadcast room. The registry maps project ids to
 * per-room broadcast channels; a session joins a room by subscribing to its
 * channel, and all membership disappears with the receivers when the
 * session disconnects.
 *
 * Broadcasting to a room nobody is viewing is a silent no-op. Delivery is
 * best-effort and never persisted: a session that joins later does not see
 * earlier events and must re-fetch current state instead.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

use crate::realtime::events::TaskEvent;

/// Capacity of each room's broadcast channel. A slow session that falls
/// more than this many events behind skips ahead (Lagged) rather than
/// blocking the room.
const ROOM_CHANNEL_CAPACITY: usize = 100;

/// In-process registry of project rooms.
///
/// Cloning is cheap; all clones share the same room map.
#[derive(Clone)]
pub struct RoomRegistry {
    rooms: Arc<Mutex<HashMap<String, broadcast::Sender<TaskEvent>>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Join the room for a project, creating it on first use.
    ///
    /// The returned receiver is the session's membership: dropping it
    /// leaves the room.
    pub fn join(&self, project_id: &str) -> broadcast::Receiver<TaskEvent> {
        let mut rooms = self.rooms.lock().unwrap();
        rooms
            .entry(project_id.to_string())
            .or_insert_with(|| broadcast::channel(ROOM_CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Relay an event to every session in its project's room.
    ///
    /// Returns the number of receivers the event reached; 0 when nobody is
    /// viewing the project. The send never blocks the caller.
    pub fn publish(&self, event: TaskEvent) -> usize {
        let sender = {
            let rooms = self.rooms.lock().unwrap();
            rooms.get(&event.project).cloned()
        };

        match sender {
            Some(sender) => match sender.send(event) {
                Ok(subscriber_count) => {
                    tracing::debug!("[Realtime] Event relayed to {} sessions", subscriber_count);
                    subscriber_count
                }
                Err(_) => {
                    // All receivers left between lookup and send.
                    0
                }
            },
            None => {
                tracing::debug!("[Realtime] No room open for project, dropping event");
                0
            }
        }
    }

    /// Drop rooms with no remaining subscribers.
    pub fn prune_empty(&self) {
        self.rooms
            .lock()
            .unwrap()
            .retain(|_, sender| sender.receiver_count() > 0);
    }

    /// Number of sessions currently in a project's room.
    pub fn subscriber_count(&self, project_id: &str) -> usize {
        self.rooms
            .lock()
            .unwrap()
            .get(project_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realtime::events::TaskEventKind;

    const PROJECT_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaa";
    const PROJECT_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbb";

    fn event(project: &str) -> TaskEvent {
        TaskEvent::new(
            TaskEventKind::TaskCreated,
            project,
            &serde_json::json!({"name": "task"}),
            None,
        )
    }

    #[tokio::test]
    async fn test_publish_without_room_is_silent_noop() {
        let registry = RoomRegistry::new();
        assert_eq!(registry.publish(event(PROJECT_A)), 0);
    }

    #[tokio::test]
    async fn test_join_then_publish_delivers() {
        let registry = RoomRegistry::new();
        let mut rx = registry.join(PROJECT_A);

        assert_eq!(registry.publish(event(PROJECT_A)), 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.project, PROJECT_A);
        assert_eq!(received.kind, TaskEventKind::TaskCreated);
    }

    #[tokio::test]
    async fn test_rooms_do_not_cross_talk() {
        let registry = RoomRegistry::new();
        let mut rx_a = registry.join(PROJECT_A);
        let _rx_b = registry.join(PROJECT_B);

        assert_eq!(registry.publish(event(PROJECT_B)), 1);

        // Room A saw nothing.
        assert!(matches!(
            rx_a.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_all_room_members_receive() {
        let registry = RoomRegistry::new();
        let mut rx1 = registry.join(PROJECT_A);
        let mut rx2 = registry.join(PROJECT_A);
        let mut rx3 = registry.join(PROJECT_A);

        assert_eq!(registry.publish(event(PROJECT_A)), 3);
        assert!(rx1.recv().await.is_ok());
        assert!(rx2.recv().await.is_ok());
        assert!(rx3.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_prune_empty_drops_abandoned_rooms() {
        let registry = RoomRegistry::new();
        {
            let _rx = registry.join(PROJECT_A);
            assert_eq!(registry.subscriber_count(PROJECT_A), 1);
        }

        registry.prune_empty();
        assert_eq!(registry.subscriber_count(PROJECT_A), 0);
        assert_eq!(registry.publish(event(PROJECT_A)), 0);
    }
}
