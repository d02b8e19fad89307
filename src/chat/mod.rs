//! The durable message log and everything derived from it.
//!
//! # Architecture
//!
//! - **`model`** - Wire types: the resolved `Message` and request payloads
//! - **`store`** - Append and page the per-team log; fan persisted
//!   messages out to the live room
//! - **`unread`** - Read receipts: mark-read and unread counting
//! - **`handlers`** - The REST facade over the store
//!
//! Every message belongs to one team and is immutable after the append,
//! except for its read-receipt set, which only grows. The append and the
//! sender's own receipt commit in a single transaction; only a committed
//! message is ever broadcast.

pub mod handlers;
pub mod model;
pub mod store;
pub mod unread;

pub use model::Message;
