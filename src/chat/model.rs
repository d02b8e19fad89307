/**
 * Chat Wire Types
 *
 * The message shape returned by every read path and carried by the
 * `newMessage` event, plus the REST request payloads.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::directory::users::UserProfile;

/// A persisted team message with its sender profile resolved.
///
/// `read_by` holds the ids of every user who has acknowledged the message;
/// it contains the sender from the moment of creation and only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub team_id: Uuid,
    /// Sender profile, serialized as `userId` to match the document shape
    /// clients consume.
    #[serde(rename = "userId")]
    pub sender: UserProfile,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub read_by: Vec<Uuid>,
}

/// Body of `POST /api/teams/{teamId}/messages`.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// Query parameters of `GET /api/teams/{teamId}/messages`.
///
/// `before` is an exclusive upper bound on `createdAt`; paging walks
/// backwards through history by passing the oldest timestamp of the
/// previous page.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
    pub before: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_wire_shape() {
        let sender_id = Uuid::new_v4();
        let message = Message {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            sender: UserProfile {
                id: sender_id,
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                avatar: None,
            },
            content: "hello".to_string(),
            created_at: DateTime::from_timestamp_micros(1_700_000_000_000_000).unwrap(),
            read_by: vec![sender_id],
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "id": message.id,
                "teamId": message.team_id,
                "userId": {
                    "id": sender_id,
                    "name": "Alice",
                    "email": "alice@example.com",
                    "avatar": null,
                },
                "content": "hello",
                "createdAt": "2023-11-14T22:13:20Z",
                "readBy": [sender_id],
            })
        );
    }

    #[test]
    fn test_message_round_trip() {
        let sender_id = Uuid::new_v4();
        let message = Message {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            sender: UserProfile {
                id: sender_id,
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
                avatar: Some("https://example.com/b.png".to_string()),
            },
            content: "standup in 5".to_string(),
            created_at: DateTime::from_timestamp_micros(1_700_000_123_456_789).unwrap(),
            read_by: vec![sender_id],
        };

        let encoded = serde_json::to_string(&message).unwrap();
        let decoded: Message = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, message);
    }
}
