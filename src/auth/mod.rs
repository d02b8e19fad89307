//! Token handling and the authenticated identity it produces.

pub mod identity;
pub mod token;

pub use identity::{Identity, Role};
