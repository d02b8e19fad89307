//! Team existence and roster membership checks.

use sqlx::SqlitePool;
use uuid::Uuid;

/// Check whether a team exists
pub async fn team_exists(pool: &SqlitePool, team_id: Uuid) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM teams WHERE id = ?")
        .bind(team_id.to_string())
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Check whether a user is on a team's roster
pub async fn is_member(
    pool: &SqlitePool,
    team_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT 1 FROM team_members WHERE team_id = ? AND user_id = ?")
            .bind(team_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(pool)
            .await?;
    Ok(row.is_some())
}
