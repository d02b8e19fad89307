/**
 * User Lookups
 *
 * Resolves token subjects to identities and user ids to display profiles.
 * Secret columns never leave this module.
 */

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::identity::{Identity, Role};

/// Display profile attached to messages on read paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

/// Look up the identity for a token subject
///
/// Returns `None` for an unknown user id. The password hash is never
/// selected.
pub async fn find_identity(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Option<Identity>, sqlx::Error> {
    #[derive(sqlx::FromRow)]
    struct IdentityRow {
        name: String,
        role: String,
    }

    let row = sqlx::query_as::<_, IdentityRow>("SELECT name, role FROM users WHERE id = ?")
        .bind(user_id.to_string())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| Identity {
        user_id,
        name: r.name,
        role: Role::parse(&r.role),
    }))
}

/// Resolve the display profile for a user id
pub async fn resolve_profile(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Option<UserProfile>, sqlx::Error> {
    #[derive(sqlx::FromRow)]
    struct ProfileRow {
        name: String,
        email: String,
        avatar: Option<String>,
    }

    let row = sqlx::query_as::<_, ProfileRow>("SELECT name, email, avatar FROM users WHERE id = ?")
        .bind(user_id.to_string())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| UserProfile {
        id: user_id,
        name: r.name,
        email: r.email,
        avatar: r.avatar,
    }))
}
