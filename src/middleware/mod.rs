//! Request middleware for the REST facade.

pub mod auth;

pub use auth::{auth_middleware, CurrentUser};
