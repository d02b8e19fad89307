/**
 * Application State
 *
 * The central state container shared by the REST handlers and the
 * gateway: the pool backing the message store and the live room registry.
 *
 * # Thread Safety
 *
 * Both fields are cheap clones over shared interior state, so the whole
 * struct is cloned freely into every handler and connection task.
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::realtime::rooms::RoomRegistry;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database pool backing the message store and directory lookups.
    pub pool: SqlitePool,

    /// Live room subscriptions. Process memory only; empty at startup and
    /// rebuilt from client joins.
    pub rooms: RoomRegistry,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            rooms: RoomRegistry::new(),
        }
    }
}

/// Allow handlers to extract the pool without the full state.
impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

/// Allow handlers to extract the room registry without the full state.
impl FromRef<AppState> for RoomRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.rooms.clone()
    }
}
