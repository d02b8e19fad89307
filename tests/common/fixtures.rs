//! Seed data helpers.
//!
//! Account and roster CRUD lives outside the messaging service, so tests
//! insert the rows the directory lookups read directly.

use sqlx::SqlitePool;
use uuid::Uuid;

use teamline::auth::token::create_token;

/// A seeded user with a valid bearer token.
pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub token: String,
}

/// Insert a user and mint a token for them
pub async fn create_user(pool: &SqlitePool, name: &str, email: &str) -> TestUser {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO users (id, name, email, password_hash, role) VALUES (?, ?, ?, ?, 'member')",
    )
    .bind(id.to_string())
    .bind(name)
    .bind(email)
    .bind("$2b$12$testhashnotvalidforlogin")
    .execute(pool)
    .await
    .expect("Failed to insert test user");

    let token = create_token(id).expect("Failed to create token");

    TestUser {
        id,
        name: name.to_string(),
        token,
    }
}

/// Insert a team with the given roster
pub async fn create_team(pool: &SqlitePool, name: &str, members: &[Uuid]) -> Uuid {
    let id = Uuid::new_v4();

    sqlx::query("INSERT INTO teams (id, name) VALUES (?, ?)")
        .bind(id.to_string())
        .bind(name)
        .execute(pool)
        .await
        .expect("Failed to insert test team");

    for member in members {
        sqlx::query("INSERT INTO team_members (team_id, user_id) VALUES (?, ?)")
            .bind(id.to_string())
            .bind(member.to_string())
            .execute(pool)
            .await
            .expect("Failed to insert roster row");
    }

    id
}
