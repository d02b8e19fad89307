/**
 * Connection Gateway
 *
 * Authenticates each WebSocket handshake and runs the per-connection
 * event loop. Authentication is a single function from handshake payload
 * to identity, invoked exactly once per connection attempt and nowhere
 * else; an unauthenticated connection is refused before the upgrade, so
 * no room operation is reachable without an identity.
 */

use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use sqlx::SqlitePool;
use tokio::sync::mpsc;

use crate::auth::identity::Identity;
use crate::auth::token::user_id_from_token;
use crate::directory::{teams, users};
use crate::error::ApiError;
use crate::realtime::events::{ClientEvent, ServerEvent};
use crate::realtime::rooms::{ConnectionId, OutboundSender};
use crate::server::state::AppState;

/// Credentials presented when the connection is established.
#[derive(Debug, Clone, Deserialize)]
pub struct HandshakePayload {
    pub token: Option<String>,
}

/// Resolve a handshake payload to an identity
///
/// Fails for a missing token, a bad signature, an expired token, or a
/// subject with no user record. This is the only authentication step a
/// connection ever goes through; the identity it produces is bound to the
/// connection until disconnect.
pub async fn authenticate(
    pool: &SqlitePool,
    payload: &HandshakePayload,
) -> Result<Identity, ApiError> {
    let token = payload
        .token
        .as_deref()
        .ok_or_else(|| ApiError::authentication("No token provided"))?;

    let user_id = user_id_from_token(token)?;

    users::find_identity(pool, user_id)
        .await?
        .ok_or_else(|| ApiError::authentication("Not authorized"))
}

/// Handle `GET /ws`
///
/// Authenticates the handshake, then hands the socket to the connection
/// loop. A failed handshake answers the upgrade request with 401 and no
/// connection is created.
pub async fn ws_handler(
    State(state): State<AppState>,
    Query(payload): Query<HandshakePayload>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let identity = authenticate(&state.pool, &payload).await?;
    Ok(ws.on_upgrade(move |socket| handle_connection(socket, state, identity)))
}

async fn handle_connection(socket: WebSocket, state: AppState, identity: Identity) {
    let conn = ConnectionId::new();
    tracing::info!("User connected: {}", identity.name);

    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    // Writer task: drain the outbound queue into the socket. Delivery is
    // best-effort; a transport error just ends the writer.
    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let frame = match serde_json::to_string(&event) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!("Failed to serialize outbound event: {:?}", e);
                    continue;
                }
            };
            if sink.send(WsMessage::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(_) => break,
        };

        match frame {
            WsMessage::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                Ok(event) => dispatch(&state, &identity, conn, &tx, event).await,
                Err(e) => {
                    tracing::warn!("Ignoring malformed frame from {}: {}", identity.name, e);
                }
            },
            WsMessage::Close(_) => break,
            // Ping/pong is answered by the transport; binary frames are
            // not part of the protocol.
            _ => {}
        }
    }

    // Dropping out of every room cancels future deliveries only; store
    // operations already issued by this user run to completion.
    state.rooms.disconnect(conn);
    writer.abort();
    tracing::info!("User disconnected: {}", identity.name);
}

async fn dispatch(
    state: &AppState,
    identity: &Identity,
    conn: ConnectionId,
    tx: &OutboundSender,
    event: ClientEvent,
) {
    match event {
        ClientEvent::JoinTeam { team_id } => {
            // Roster check at join time keeps rooms member-only; the
            // typing relays below rely on that.
            match teams::is_member(&state.pool, team_id, identity.user_id).await {
                Ok(true) => {
                    state.rooms.join(team_id, conn, tx.clone());
                    tracing::info!("{} joined team {}", identity.name, team_id);
                }
                Ok(false) => {
                    tracing::warn!(
                        "{} tried to join team {} without membership",
                        identity.name,
                        team_id
                    );
                }
                Err(e) => {
                    tracing::error!("Membership lookup failed for team {}: {:?}", team_id, e);
                }
            }
        }
        ClientEvent::LeaveTeam { team_id } => {
            state.rooms.leave(team_id, conn);
            tracing::info!("{} left team {}", identity.name, team_id);
        }
        ClientEvent::Typing { team_id } => {
            if state.rooms.is_subscribed(team_id, conn) {
                state.rooms.broadcast_to_others(
                    team_id,
                    conn,
                    &ServerEvent::UserTyping {
                        user_id: identity.user_id,
                        name: identity.name.clone(),
                    },
                );
            }
        }
        ClientEvent::StopTyping { team_id } => {
            if state.rooms.is_subscribed(team_id, conn) {
                state.rooms.broadcast_to_others(
                    team_id,
                    conn,
                    &ServerEvent::UserStoppedTyping {
                        user_id: identity.user_id,
                    },
                );
            }
        }
    }
}
