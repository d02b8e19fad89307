/**
 * Realtime Event Frames
 *
 * Every frame is a JSON object `{"event": <name>, "payload": {...}}`.
 * Client frames address a team; server frames carry either a fully
 * resolved message or a typing notice. Unknown frames fail to parse and
 * are dropped by the gateway.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::model::Message;

/// Frames a client may send over an established connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Subscribe this connection to a team's room.
    #[serde(rename_all = "camelCase")]
    JoinTeam { team_id: Uuid },
    /// Unsubscribe this connection from a team's room.
    #[serde(rename_all = "camelCase")]
    LeaveTeam { team_id: Uuid },
    /// The user started typing in a team's chat.
    #[serde(rename_all = "camelCase")]
    Typing { team_id: Uuid },
    /// The user stopped typing.
    #[serde(rename_all = "camelCase")]
    StopTyping { team_id: Uuid },
}

/// Frames the server pushes to subscribed connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum ServerEvent {
    /// A message was persisted to the team's log.
    NewMessage(Message),
    /// Another member is typing.
    #[serde(rename_all = "camelCase")]
    UserTyping { user_id: Uuid, name: String },
    /// Another member stopped typing.
    #[serde(rename_all = "camelCase")]
    UserStoppedTyping { user_id: Uuid },
}
