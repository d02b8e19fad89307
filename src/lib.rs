//! Teamline - real-time team messaging service
//!
//! Teamline is the messaging backend of a project-collaboration platform:
//! a durable, read-receipt tracked message log per team, with a WebSocket
//! layer that fans persisted messages and ephemeral typing indicators out
//! to the team's live room.
//!
//! # Module Structure
//!
//! - **`auth`** - Signed tokens and the `Identity` value they resolve to
//! - **`middleware`** - Bearer-token authentication for the REST facade
//! - **`directory`** - Lookups against the platform-owned user and team
//!   tables (identity, roster membership, display profiles)
//! - **`chat`** - The message store: send, history, read receipts, unread
//!   accounting, and the REST handlers over them
//! - **`realtime`** - The connection gateway, room registry and event
//!   types for live fan-out
//! - **`server`** - Application state, configuration and router assembly
//! - **`error`** - The error taxonomy and its HTTP mapping

pub mod auth;
pub mod chat;
pub mod directory;
pub mod error;
pub mod middleware;
pub mod realtime;
pub mod routes;
pub mod server;
