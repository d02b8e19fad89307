use uuid::Uuid;

/// Account role carried by an identity. The messaging core treats every
/// authenticated caller the same; authorization is decided by the team
/// roster, not the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    /// Parse the role column value. Anything unrecognized is a member.
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            _ => Role::Member,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }
}

/// Authenticated principal, resolved from a token subject exactly once per
/// connection or request. Immutable for the lifetime of whatever it is
/// bound to; a reconnect resolves a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user_id: Uuid,
    pub name: String,
    pub role: Role,
}
