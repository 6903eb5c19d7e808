/**
 * Realtime Socket Sessions
 *
 * This module implements the WebSocket endpoint for GET /events. Each
 * connection is one session: the server assigns it an id, the client joins
 * project rooms by sending `join-project` frames, and the session then
 * receives the task lifecycle events of every room it belongs to.
 *
 * # Protocol
 *
 * Client frames (JSON, tagged by `type`):
 * - `{"type": "join-project", "project": "<id>"}`
 * - `{"type": "leave-project", "project": "<id>"}`
 *
 * Server frames:
 * - `{"type": "session-established", "session": "<uuid>"}`
 * - `{"type": "project-joined", "project": "<id>"}`
 * - `{"type": "project-left", "project": "<id>"}`
 * - `{"type": "error", "kind": "...", "message": "..."}`
 * - task events: `{"type": "task-created" | "task-deleted" | "task-updated"
 *   | "task-status-changed", "project": "...", "payload": {...}, ...}`
 *
 * # Authorization
 *
 * Joining a room re-verifies project read access for the connected user, so
 * a session can only ever observe projects it could also fetch over HTTP.
 *
 * # Echo suppression
 *
 * Mutating HTTP requests may carry the session id in `X-Session-Id`. Events
 * stamped with that origin are not forwarded back to the same session; the
 * originator already holds the authoritative result from its own response.
 */

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::access::{can_access_project, ProjectAction};
use crate::error::ApiError;
use crate::middleware::auth::{AuthUser, AuthenticatedUser};
use crate::realtime::events::TaskEvent;
use crate::server::state::AppState;
use crate::store::{projects, ObjectId};

/// Frames a session may send.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum ClientMessage {
    JoinProject { project: String },
    LeaveProject { project: String },
}

/// Control frames the server sends (task events are serialized directly).
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum ServerMessage {
    SessionEstablished { session: Uuid },
    ProjectJoined { project: String },
    ProjectLeft { project: String },
    Error { kind: String, message: String },
}

/// Outbound frames buffered per session before the socket writer drains them.
const OUTBOUND_BUFFER: usize = 64;

/// Whether a room event should be forwarded to a session.
///
/// The originating session never receives its own echo.
pub fn should_forward(event: &TaskEvent, session: Uuid) -> bool {
    event.origin != Some(session)
}

/// Handle realtime socket connections (GET /events).
///
/// Requires an authenticated user; the upgrade callback owns the session
/// for the lifetime of the connection.
pub async fn handle_events_socket(
    ws: WebSocketUpgrade,
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Response {
    tracing::info!("[Realtime] Socket upgrade for user {}", user.user_id);
    ws.on_upgrade(move |socket| run_session(socket, user, state))
}

/// Drive one connected session until it disconnects.
async fn run_session(socket: WebSocket, user: AuthenticatedUser, state: AppState) {
    let session_id = Uuid::new_v4();
    let (mut sink, mut stream) = socket.split();

    // A single writer task owns the sink; room-forwarding tasks and the
    // control path all feed it through this channel.
    let (out_tx, mut out_rx) = mpsc::channel::<String>(OUTBOUND_BUFFER);
    let writer = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            if sink.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    send_frame(&out_tx, &ServerMessage::SessionEstablished { session: session_id }).await;

    // Room membership of this session: project id -> forwarding task.
    let mut joined: HashMap<String, JoinHandle<()>> = HashMap::new();

    while let Some(Ok(message)) = stream.next().await {
        match message {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::JoinProject { project }) => {
                    join_room(&state, &user, session_id, &out_tx, &mut joined, &project).await;
                }
                Ok(ClientMessage::LeaveProject { project }) => {
                    if let Some(handle) = joined.remove(&project) {
                        handle.abort();
                        tracing::info!("[Realtime] Session {} left room {}", session_id, project);
                    }
                    send_frame(&out_tx, &ServerMessage::ProjectLeft { project }).await;
                }
                Err(e) => {
                    tracing::debug!("[Realtime] Unparseable client frame: {:?}", e);
                    send_frame(
                        &out_tx,
                        &ServerMessage::Error {
                            kind: "validation".to_string(),
                            message: "unrecognized message".to_string(),
                        },
                    )
                    .await;
                }
            },
            Message::Close(_) => break,
            // Ping/Pong are answered by the protocol layer
            _ => {}
        }
    }

    // Disconnect clears all room membership for the session.
    for handle in joined.into_values() {
        handle.abort();
    }
    writer.abort();
    tracing::info!("[Realtime] Session {} disconnected", session_id);
}

/// Join the room of a project, verifying read access first.
async fn join_room(
    state: &AppState,
    user: &AuthenticatedUser,
    session_id: Uuid,
    out_tx: &mpsc::Sender<String>,
    joined: &mut HashMap<String, JoinHandle<()>>,
    project_id: &str,
) {
    let id = match ObjectId::parse(project_id) {
        Ok(id) => id,
        Err(_) => {
            send_api_error(out_tx, &ApiError::MalformedIdentifier).await;
            return;
        }
    };
    let room_key = id.into_string();

    if joined.contains_key(&room_key) {
        // Already a member; joining twice is a no-op.
        send_frame(out_tx, &ServerMessage::ProjectJoined { project: room_key }).await;
        return;
    }

    // Re-verify read authorization at join time: a session may only enter
    // rooms for projects it could also fetch.
    let project = match projects::find_by_id(&state.db_pool, &room_key).await {
        Ok(Some(project)) => project,
        Ok(None) => {
            send_api_error(out_tx, &ApiError::NotFound("project")).await;
            return;
        }
        Err(e) => {
            send_api_error(out_tx, &ApiError::Store(e)).await;
            return;
        }
    };

    if !can_access_project(&user.user_id, &project, ProjectAction::ViewDetail) {
        tracing::warn!(
            "[Realtime] User {} denied room {} at join time",
            user.user_id,
            room_key
        );
        send_api_error(out_tx, &ApiError::Unauthorized).await;
        return;
    }

    let mut rx = state.rooms.join(&room_key);
    let tx = out_tx.clone();
    let handle = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if !should_forward(&event, session_id) {
                        continue;
                    }
                    let frame = match serde_json::to_string(&event) {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::error!("[Realtime] Failed to serialize event: {:?}", e);
                            continue;
                        }
                    };
                    if tx.send(frame).await.is_err() {
                        // Session writer is gone; stop forwarding.
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        "[Realtime] Session {} lagged, skipped {} events",
                        session_id,
                        skipped
                    );
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    tracing::info!("[Realtime] Session {} joined room {}", session_id, room_key);
    joined.insert(room_key.clone(), handle);
    send_frame(out_tx, &ServerMessage::ProjectJoined { project: room_key }).await;
}

/// Serialize and queue a control frame for the session writer.
async fn send_frame(out_tx: &mpsc::Sender<String>, message: &ServerMessage) {
    match serde_json::to_string(message) {
        Ok(frame) => {
            let _ = out_tx.send(frame).await;
        }
        Err(e) => {
            tracing::error!("[Realtime] Failed to serialize frame: {:?}", e);
        }
    }
}

/// Queue an error frame carrying the taxonomy kind and message.
async fn send_api_error(out_tx: &mpsc::Sender<String>, error: &ApiError) {
    send_frame(
        out_tx,
        &ServerMessage::Error {
            kind: error.kind().to_string(),
            message: error.message(),
        },
    )
    .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realtime::rooms::RoomRegistry;

    const PROJECT: &str = "65a1b2c3d4e5f60718293a4b";

    #[test]
    fn test_client_message_wire_format() {
        let parsed: ClientMessage =
            serde_json::from_str(r#"{"type": "join-project", "project": "abc"}"#).unwrap();
        assert!(matches!(parsed, ClientMessage::JoinProject { project } if project == "abc"));

        let parsed: ClientMessage =
            serde_json::from_str(r#"{"type": "leave-project", "project": "abc"}"#).unwrap();
        assert!(matches!(parsed, ClientMessage::LeaveProject { project } if project == "abc"));

        let unknown: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"type": "shout", "project": "abc"}"#);
        assert!(unknown.is_err());
    }

    #[test]
    fn test_server_message_wire_format() {
        let session = Uuid::new_v4();
        let json =
            serde_json::to_value(&ServerMessage::SessionEstablished { session }).unwrap();
        assert_eq!(json["type"], "session-established");
        assert_eq!(json["session"], session.to_string());

        let json = serde_json::to_value(&ServerMessage::Error {
            kind: "unauthorized".to_string(),
            message: "no".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["kind"], "unauthorized");
    }

    #[test]
    fn test_should_forward_excludes_originator() {
        let originator = Uuid::new_v4();
        let other = Uuid::new_v4();
        let event = TaskEvent::created(PROJECT, &serde_json::json!({}), Some(originator));

        assert!(!should_forward(&event, originator));
        assert!(should_forward(&event, other));
    }

    #[test]
    fn test_should_forward_without_origin_reaches_everyone() {
        let event = TaskEvent::created(PROJECT, &serde_json::json!({}), None);
        assert!(should_forward(&event, Uuid::new_v4()));
    }

    #[tokio::test]
    async fn test_room_delivery_excludes_originating_session() {
        // Sessions A, B, C share a room; an event from A reaches B and C only.
        let registry = RoomRegistry::new();
        let session_a = Uuid::new_v4();
        let session_b = Uuid::new_v4();
        let session_c = Uuid::new_v4();

        let mut rx_a = registry.join(PROJECT);
        let mut rx_b = registry.join(PROJECT);
        let mut rx_c = registry.join(PROJECT);

        let event = TaskEvent::updated(PROJECT, &serde_json::json!({}), Some(session_a));
        assert_eq!(registry.publish(event), 3);

        let seen_a = rx_a.recv().await.unwrap();
        let seen_b = rx_b.recv().await.unwrap();
        let seen_c = rx_c.recv().await.unwrap();

        assert!(!should_forward(&seen_a, session_a));
        assert!(should_forward(&seen_b, session_b));
        assert!(should_forward(&seen_c, session_c));
    }
}
