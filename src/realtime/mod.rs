//! Live connections: the gateway, the room registry and the event types.
//!
//! # Architecture
//!
//! - **`events`** - The JSON frames exchanged over a connection
//! - **`rooms`** - Concurrency-safe registry of live subscriptions per
//!   team; join, leave and disconnect are its only mutation entry points
//! - **`gateway`** - WebSocket handshake authentication and the
//!   per-connection event loop
//!
//! Room state lives only in process memory and only for the lifetime of
//! each connection. Clients must re-issue `joinTeam` after a reconnect;
//! there is no server-side session continuity.
//!
//! Typing indicators pass straight through the registry without touching
//! the store: best-effort, unordered, never retried. Do not upgrade them
//! to guaranteed delivery; the cheap contract is what keeps a keystroke
//! from costing a write.

pub mod events;
pub mod gateway;
pub mod rooms;

pub use events::{ClientEvent, ServerEvent};
pub use rooms::{ConnectionId, RoomRegistry};
