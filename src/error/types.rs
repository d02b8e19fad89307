/**
 * Service Error Types
 *
 * One error enum covers every failure a request can surface. Each variant
 * maps to exactly one HTTP status code, so handlers never hand-pick codes
 * and validation failures cannot collapse into a generic 500.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Errors surfaced by the REST facade and the realtime gateway.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed or expired token, or an unknown token subject.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Human-readable error message
        message: String,
    },

    /// The caller is authenticated but not a member of the team.
    #[error("Not authorized: {message}")]
    Authorization {
        /// Human-readable error message
        message: String,
    },

    /// The addressed team or message does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// Name of the missing resource
        resource: String,
    },

    /// The request payload failed validation.
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Persistence failure. Logged, never retried automatically.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other unexpected failure.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },
}

impl ApiError {
    /// Create a new authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a new authorization error
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    /// Create a new not-found error for the named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Authentication` - 401 Unauthorized
    /// - `Authorization` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - `Validation` - 400 Bad Request
    /// - `Database` / `Serialization` / `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Authentication { .. } => StatusCode::UNAUTHORIZED,
            Self::Authorization { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Serialization(_) | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error message shown to the caller
    pub fn message(&self) -> String {
        self.to_string()
    }
}
