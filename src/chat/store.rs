/**
 * Message Store
 *
 * Append-only, per-team message log backed by SQLite. Appends are
 * independently atomic; the server-assigned timestamp is authoritative
 * for ordering, not client send order. A message is fanned out to the
 * team's live room only after its transaction commits, so a message that
 * fails to persist is never broadcast.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::identity::Identity;
use crate::chat::model::Message;
use crate::directory::users::UserProfile;
use crate::directory::{teams, users};
use crate::error::ApiError;
use crate::realtime::events::ServerEvent;
use crate::realtime::rooms::RoomRegistry;

/// Page size used when a history request does not specify one.
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// Hard ceiling on a single history page.
pub const MAX_HISTORY_LIMIT: i64 = 500;

/// Require the team to exist and the user to be on its roster.
///
/// Every store operation runs this first; the checks are ordered so an
/// unknown team reads as 404 rather than 403.
pub(crate) async fn require_team_member(
    pool: &SqlitePool,
    team_id: Uuid,
    user_id: Uuid,
) -> Result<(), ApiError> {
    if !teams::team_exists(pool, team_id).await? {
        return Err(ApiError::not_found("Team"));
    }
    if !teams::is_member(pool, team_id, user_id).await? {
        return Err(ApiError::authorization("Not a member of this team"));
    }
    Ok(())
}

/// Append a message to a team's log and fan it out to the team's room
///
/// The message row and the sender's own read receipt commit in one
/// transaction. Fan-out happens strictly after the commit and is
/// best-effort; subscribers that are gone are skipped silently.
///
/// # Errors
///
/// * `NotFound` - The team does not exist
/// * `Authorization` - The sender is not on the team's roster
/// * `Validation` - The content is empty after trimming
pub async fn send_message(
    pool: &SqlitePool,
    rooms: &RoomRegistry,
    team_id: Uuid,
    sender: &Identity,
    content: &str,
) -> Result<Message, ApiError> {
    require_team_member(pool, team_id, sender.user_id).await?;

    let content = content.trim();
    if content.is_empty() {
        return Err(ApiError::validation(
            "content",
            "Message content cannot be empty",
        ));
    }

    let id = Uuid::new_v4();
    // Truncate to the stored resolution so the value handed back now is
    // identical to what every later read returns.
    let created_at = datetime_from_micros(Utc::now().timestamp_micros());

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO messages (id, team_id, user_id, content, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(team_id.to_string())
    .bind(sender.user_id.to_string())
    .bind(content)
    .bind(created_at.timestamp_micros())
    .execute(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO message_reads (message_id, user_id) VALUES (?, ?)")
        .bind(id.to_string())
        .bind(sender.user_id.to_string())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    let profile = users::resolve_profile(pool, sender.user_id)
        .await?
        .ok_or_else(|| ApiError::internal("Sender profile not found after append"))?;

    let message = Message {
        id,
        team_id,
        sender: profile,
        content: content.to_string(),
        created_at,
        read_by: vec![sender.user_id],
    };

    let delivered = rooms.broadcast(team_id, &ServerEvent::NewMessage(message.clone()));
    tracing::debug!(
        "Message {} delivered to {} subscribers of team {}",
        id,
        delivered,
        team_id
    );

    Ok(message)
}

/// Fetch a page of a team's history, oldest first
///
/// The page is selected newest-first against the `before` cursor, then
/// reversed, so clients prepend it to what they already have. `before` is
/// exclusive; passing the oldest `createdAt` of the previous page yields
/// strictly older messages with no overlap.
pub async fn history(
    pool: &SqlitePool,
    team_id: Uuid,
    requester: &Identity,
    limit: Option<i64>,
    before: Option<DateTime<Utc>>,
) -> Result<Vec<Message>, ApiError> {
    require_team_member(pool, team_id, requester.user_id).await?;

    let limit = limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let cursor = before.map(|b| b.timestamp_micros());

    let rows = sqlx::query_as::<_, MessageRow>(
        r#"
        SELECT m.id, m.team_id, m.content, m.created_at,
               u.id AS sender_id, u.name AS sender_name,
               u.email AS sender_email, u.avatar AS sender_avatar,
               (SELECT GROUP_CONCAT(r.user_id) FROM message_reads r
                 WHERE r.message_id = m.id) AS read_by
        FROM messages m
        JOIN users u ON u.id = m.user_id
        WHERE m.team_id = ? AND (? IS NULL OR m.created_at < ?)
        ORDER BY m.created_at DESC
        LIMIT ?
        "#,
    )
    .bind(team_id.to_string())
    .bind(cursor)
    .bind(cursor)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let mut messages = rows
        .into_iter()
        .map(MessageRow::into_message)
        .collect::<Result<Vec<_>, _>>()?;
    messages.reverse();
    Ok(messages)
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: String,
    team_id: String,
    content: String,
    created_at: i64,
    sender_id: String,
    sender_name: String,
    sender_email: String,
    sender_avatar: Option<String>,
    read_by: Option<String>,
}

impl MessageRow {
    fn into_message(self) -> Result<Message, ApiError> {
        let read_by = self
            .read_by
            .as_deref()
            .unwrap_or("")
            .split(',')
            .filter(|s| !s.is_empty())
            .map(parse_stored_uuid)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Message {
            id: parse_stored_uuid(&self.id)?,
            team_id: parse_stored_uuid(&self.team_id)?,
            sender: UserProfile {
                id: parse_stored_uuid(&self.sender_id)?,
                name: self.sender_name,
                email: self.sender_email,
                avatar: self.sender_avatar,
            },
            content: self.content,
            created_at: datetime_from_micros(self.created_at),
            read_by,
        })
    }
}

fn parse_stored_uuid(value: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value)
        .map_err(|e| ApiError::internal(format!("Invalid id in database: {}", e)))
}

fn datetime_from_micros(micros: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(micros).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_micros_round_trip() {
        let now = datetime_from_micros(Utc::now().timestamp_micros());
        assert_eq!(datetime_from_micros(now.timestamp_micros()), now);
    }

    #[test]
    fn test_parse_stored_uuid_rejects_garbage() {
        assert!(parse_stored_uuid("not-a-uuid").is_err());
    }
}
