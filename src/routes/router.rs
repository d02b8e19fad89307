/**
 * Router Configuration
 *
 * Combines the chat REST facade and the WebSocket gateway into one Axum
 * router.
 *
 * # Routes
 *
 * ## Chat (bearer token required)
 *
 * - `POST /api/teams/{team_id}/messages` - Send a message
 * - `GET /api/teams/{team_id}/messages` - Page history
 * - `POST /api/teams/{team_id}/messages/read` - Mark everything read
 * - `GET /api/teams/{team_id}/messages/unread` - Unread count
 *
 * ## Realtime
 *
 * - `GET /ws?token=<jwt>` - WebSocket upgrade; the gateway authenticates
 *   the handshake itself, so this route sits outside the middleware
 */

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};

use crate::chat::handlers::{
    get_team_messages, get_unread_count, mark_messages_as_read, send_message,
};
use crate::middleware::auth::auth_middleware;
use crate::realtime::gateway::ws_handler;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let chat_routes = Router::new()
        .route(
            "/api/teams/{team_id}/messages",
            post(send_message).get(get_team_messages),
        )
        .route(
            "/api/teams/{team_id}/messages/read",
            post(mark_messages_as_read),
        )
        .route(
            "/api/teams/{team_id}/messages/unread",
            get(get_unread_count),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(chat_routes)
        .route("/ws", get(ws_handler))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not Found") })
        .with_state(state)
}
