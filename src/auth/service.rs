// Authentication service - orchestrates lookup, gating, and token issuance

use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::error::AuthError;
use crate::auth::models::{LoginRequest, LoginResponse, Role, UserResponse};
use crate::auth::password::PasswordService;
use crate::auth::profile::ProfileResolver;
use crate::auth::repository::IdentityStore;
use crate::auth::token::TokenService;

/// Coordinates the credential store, password verifier, profile resolver,
/// and token issuer behind the two public operations.
///
/// Both operations are stateless single-request computations; the service
/// owns no mutable state and never writes to the store.
pub struct AuthService {
    store: Arc<dyn IdentityStore>,
    resolver: ProfileResolver,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        resolver: ProfileResolver,
        tokens: TokenService,
    ) -> Self {
        Self {
            store,
            resolver,
            tokens,
        }
    }

    /// Authenticate a credential pair and mint a bearer token.
    ///
    /// Check order is part of the contract: missing fields, then lookup
    /// (unknown email and wrong password share one error shape), then the
    /// account-state gates, then the optional role gate, then the password.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
        let email = request.email.trim().to_lowercase();
        if email.is_empty() || request.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        debug!("Login attempt for {}", email);

        let identity = self
            .store
            .find_identity_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !identity.is_active || !identity.can_access_system {
            warn!("Login attempt against inactive account {}", identity.id);
            return Err(AuthError::AccountInactive);
        }

        if let Some(requested) = request.role.as_deref() {
            let matches = Role::parse(requested).map_or(false, |role| role == identity.role);
            if !matches {
                return Err(AuthError::RoleMismatch {
                    requested: requested.to_string(),
                    stored: identity.role,
                });
            }
        }

        if !PasswordService::verify(&request.password, &identity.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let profile = self.resolver.resolve(self.store.as_ref(), &identity).await?;
        let token = self.tokens.issue(
            identity.id,
            &identity.email,
            identity.role,
            profile.role_specific_id(),
        )?;

        debug!("Issued token for identity {}", identity.id);
        Ok(LoginResponse {
            token,
            user: UserResponse::new(&identity, profile),
        })
    }

    /// Resolve the user behind a bearer token.
    ///
    /// The identity is re-read and re-resolved on every call; a stale
    /// doctor token still lands on the current canonical doctor. Idempotent
    /// and side-effect-free.
    pub async fn current_user(&self, authorization: Option<&str>) -> Result<UserResponse, AuthError> {
        let header = authorization.ok_or(AuthError::TokenMissing)?;
        let token = bearer_token(header)?;
        let claims = self.tokens.verify(token)?;

        let identity = self
            .store
            .find_identity_by_id(claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !identity.is_active || !identity.can_access_system {
            return Err(AuthError::AccountInactive);
        }

        let profile = self.resolver.resolve(self.store.as_ref(), &identity).await?;
        Ok(UserResponse::new(&identity, profile))
    }
}

/// Extract the token segment from a `Bearer <token>` header value
fn bearer_token(header: &str) -> Result<&str, AuthError> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AuthError::TokenMalformed),
    }
}
