/**
 * Authentication Middleware
 *
 * Protects the REST facade. Extracts the bearer token from the
 * Authorization header, verifies it, resolves the subject to a full user
 * record (excluding secret fields) and binds the resulting `Identity` to
 * the request. Handlers take it back out through the `CurrentUser`
 * extractor and never see the token itself.
 */

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::identity::Identity;
use crate::auth::token::user_id_from_token;
use crate::directory::users::find_identity;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Authentication middleware
///
/// Returns 401 Unauthorized if the token is missing, invalid, expired, or
/// names a subject that no longer exists.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::authentication("No token provided")
        })?;

    // Extract token (format: "Bearer <token>")
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        ApiError::authentication("No token provided")
    })?;

    let user_id = user_id_from_token(token)?;

    let identity = find_identity(&state.pool, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token subject {} not found", user_id);
            ApiError::authentication("Not authorized")
        })?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Extractor for the identity bound by `auth_middleware`.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Identity);

impl axum::extract::FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                tracing::warn!("Identity not found in request extensions");
                ApiError::authentication("Not authorized")
            })
    }
}
