//! Lookups against the platform-owned user and team tables.
//!
//! The messaging core does not own accounts or rosters; their CRUD lives
//! in the surrounding collaboration platform. This module is the read-only
//! seam it consumes: identity lookup by token subject, team existence and
//! roster membership checks, and display-profile resolution for message
//! read paths.

pub mod teams;
pub mod users;

pub use users::UserProfile;
