/**
 * Server Initialization
 *
 * Builds the application around an initialized database pool. The room
 * registry starts empty on every boot; live subscriptions exist only for
 * the lifetime of their connections.
 */

use axum::Router;
use sqlx::SqlitePool;

use crate::routes::router::create_router;
use crate::server::state::AppState;

/// Create the Axum application
///
/// Wraps the pool in fresh application state and wires up every route.
pub fn create_app(pool: SqlitePool) -> Router {
    let state = AppState::new(pool);
    create_router(state)
}
