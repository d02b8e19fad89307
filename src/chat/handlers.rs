/**
 * Chat REST Handlers
 *
 * The non-realtime facade over the message store. All four routes sit
 * behind the authentication middleware; membership and validation checks
 * live in the store so both facades enforce them identically.
 *
 * # Routes
 *
 * - `POST /api/teams/{teamId}/messages` - Append a message (201)
 * - `GET /api/teams/{teamId}/messages` - Page history, oldest first (200)
 * - `POST /api/teams/{teamId}/messages/read` - Acknowledge everything (200)
 * - `GET /api/teams/{teamId}/messages/unread` - Count unacknowledged (200)
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::chat::model::{HistoryQuery, SendMessageRequest};
use crate::chat::{store, unread};
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::server::state::AppState;

/// Handle `POST /api/teams/{teamId}/messages`
///
/// Persists the message, then fans it out to the team's live room.
/// Returns the resolved message with status 201.
pub async fn send_message(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    CurrentUser(identity): CurrentUser,
    Json(payload): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = store::send_message(
        &state.pool,
        &state.rooms,
        team_id,
        &identity,
        &payload.content,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Handle `GET /api/teams/{teamId}/messages`
pub async fn get_team_messages(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    CurrentUser(identity): CurrentUser,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = store::history(&state.pool, team_id, &identity, query.limit, query.before).await?;
    Ok(Json(messages))
}

/// Handle `POST /api/teams/{teamId}/messages/read`
pub async fn mark_messages_as_read(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    CurrentUser(identity): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    unread::mark_read(&state.pool, team_id, &identity).await?;
    Ok(Json(json!({ "message": "Messages marked as read" })))
}

/// Handle `GET /api/teams/{teamId}/messages/unread`
pub async fn get_unread_count(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    CurrentUser(identity): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let count = unread::unread_count(&state.pool, team_id, &identity).await?;
    Ok(Json(json!({ "count": count })))
}
