/**
 * Signed Tokens
 *
 * JWT creation and validation. One signing mechanism serves both the HTTP
 * bearer header and the WebSocket handshake; the subject claim is the user
 * id and this module is the only place tokens are parsed.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::error::ApiError;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Tokens are valid for 30 days.
const TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Get JWT secret from environment
fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set, using development secret");
        "teamline-dev-secret-change-in-production".to_string()
    })
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Create a signed token for a user
///
/// # Arguments
/// * `user_id` - User ID (UUID), becomes the `sub` claim
///
/// # Returns
/// JWT token string
pub fn create_token(user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
    let now = unix_now();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + TOKEN_TTL_SECS,
        iat: now,
    };

    let secret = jwt_secret();
    let key = EncodingKey::from_secret(secret.as_ref());

    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a token
///
/// # Arguments
/// * `token` - JWT token string
///
/// # Returns
/// Decoded claims or error
pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = jwt_secret();
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

/// Extract the user id a token was issued for
///
/// Fails with an authentication error for a bad signature, an expired
/// token, or a subject that is not a UUID.
pub fn user_id_from_token(token: &str) -> Result<Uuid, ApiError> {
    let claims = verify_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {:?}", e);
        ApiError::authentication("Not authorized, token failed")
    })?;
    Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::authentication("Not authorized, token failed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id).unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_verify_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id).unwrap();

        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_user_id_from_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id).unwrap();

        assert_eq!(user_id_from_token(&token).unwrap(), user_id);
    }

    #[test]
    fn test_verify_invalid_token() {
        let result = verify_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = unix_now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let secret = jwt_secret();
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap();

        assert!(verify_token(&token).is_err());
        assert!(user_id_from_token(&token).is_err());
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let now = unix_now();
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            exp: now + 3600,
            iat: now,
        };
        let secret = jwt_secret();
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap();

        assert!(user_id_from_token(&token).is_err());
    }
}
