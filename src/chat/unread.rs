/**
 * Unread Accounting
 *
 * Read and unread state is never stored directly; it is derived from the
 * receipt table. Marking read is a set union per message, so repeating it
 * changes nothing, and a receipt once written is never removed.
 */

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::identity::Identity;
use crate::chat::store::require_team_member;
use crate::error::ApiError;

/// Add the requester to the read set of every message in the team
///
/// Idempotent: messages the requester already acknowledged are untouched.
pub async fn mark_read(
    pool: &SqlitePool,
    team_id: Uuid,
    requester: &Identity,
) -> Result<(), ApiError> {
    require_team_member(pool, team_id, requester.user_id).await?;

    sqlx::query(
        r#"
        INSERT INTO message_reads (message_id, user_id)
        SELECT m.id, ? FROM messages m
        WHERE m.team_id = ?
        ON CONFLICT (message_id, user_id) DO NOTHING
        "#,
    )
    .bind(requester.user_id.to_string())
    .bind(team_id.to_string())
    .execute(pool)
    .await?;

    Ok(())
}

/// Count the team's messages the requester has not acknowledged
pub async fn unread_count(
    pool: &SqlitePool,
    team_id: Uuid,
    requester: &Identity,
) -> Result<i64, ApiError> {
    require_team_member(pool, team_id, requester.user_id).await?;

    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM messages m
        WHERE m.team_id = ?
          AND NOT EXISTS (
              SELECT 1 FROM message_reads r
              WHERE r.message_id = m.id AND r.user_id = ?
          )
        "#,
    )
    .bind(team_id.to_string())
    .bind(requester.user_id.to_string())
    .fetch_one(pool)
    .await?;

    Ok(count)
}
