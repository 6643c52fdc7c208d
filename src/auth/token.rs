// Bearer token issuance and verification

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;
use crate::auth::models::Role;

/// Default session lifetime: 8 hours
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 8 * 60 * 60;

/// Signed token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id
    pub sub: i32,
    pub email: String,
    pub role: Role,
    /// Resolved profile id; absent for profile-less admins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i32>,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies signed, time-limited bearer tokens.
///
/// Secret and lifetime are injected at construction; there is no
/// module-level state and no server-side session storage. Validity of a
/// token is entirely a function of its signature and expiry.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl_seconds: i64,
}

impl TokenService {
    pub fn new(secret: String, ttl_seconds: i64) -> Self {
        Self { secret, ttl_seconds }
    }

    /// Sign a token for a resolved identity
    pub fn issue(
        &self,
        identity_id: i32,
        email: &str,
        role: Role,
        role_id: Option<i32>,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: identity_id,
            email: email.to_string(),
            role,
            role_id,
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("token signing failed: {}", e)))
    }

    /// Verify structure, signature, and expiry.
    ///
    /// Every failure collapses into `TokenInvalid`; the reason is not
    /// disclosed to the caller.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::TokenInvalid)
    }
}
