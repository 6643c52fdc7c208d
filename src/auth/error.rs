// Authentication error types and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, warn};
use utoipa::ToSchema;

use crate::auth::models::Role;

/// Authentication error taxonomy
///
/// Every variant is a terminal, user-visible failure; nothing here is
/// retried internally. `InvalidCredentials` deliberately covers both an
/// unknown email and a wrong password so callers cannot probe for account
/// existence.
#[derive(Debug)]
pub enum AuthError {
    /// Email or password absent from the login request
    MissingCredentials,
    /// Unknown email or wrong password, indistinguishable by design
    InvalidCredentials,
    /// Identity exists but is deactivated or barred from the system
    AccountInactive,
    /// A requested login role that differs from the stored role
    RoleMismatch { requested: String, stored: Role },
    /// No Authorization header on a protected request
    TokenMissing,
    /// Authorization header present but not `Bearer <token>`
    TokenMalformed,
    /// Token failed structural, signature, or expiry checks (uniform shape)
    TokenInvalid,
    /// Token was valid but its identity no longer exists
    UserNotFound,
    Database(String),
    Internal(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingCredentials => write!(f, "Email and password are required"),
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::AccountInactive => {
                write!(f, "Account is inactive or not permitted to access the system")
            }
            AuthError::RoleMismatch { requested, stored } => write!(
                f,
                "Role mismatch: account is registered as '{}' but login was requested as '{}'",
                stored, requested
            ),
            AuthError::TokenMissing => write!(f, "Missing authentication token"),
            AuthError::TokenMalformed => write!(f, "Malformed authorization header"),
            AuthError::TokenInvalid => write!(f, "Invalid or expired token"),
            AuthError::UserNotFound => write!(f, "User no longer exists"),
            AuthError::Database(msg) => write!(f, "Database error: {}", msg),
            AuthError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Database(err.to_string())
    }
}

/// Consistent error response body shared by every failure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. "INVALID_CREDENTIALS")
    pub error_code: String,
    /// Human-readable message, safe to show to clients
    pub message: String,
    /// ISO 8601 timestamp of when the error occurred
    pub timestamp: String,
}

impl AuthError {
    /// HTTP status for this error, following the web boundary contract:
    /// 400 missing fields, 401 bad credentials or missing/malformed header,
    /// 403 inactive account, role mismatch, or invalid/expired token,
    /// 404 vanished identity, 500 everything unexpected.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::AccountInactive => StatusCode::FORBIDDEN,
            AuthError::RoleMismatch { .. } => StatusCode::FORBIDDEN,
            AuthError::TokenMissing => StatusCode::UNAUTHORIZED,
            AuthError::TokenMalformed => StatusCode::UNAUTHORIZED,
            AuthError::TokenInvalid => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code for the response body
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "MISSING_CREDENTIALS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::AccountInactive => "ACCOUNT_INACTIVE",
            AuthError::RoleMismatch { .. } => "ROLE_MISMATCH",
            AuthError::TokenMissing => "TOKEN_MISSING",
            AuthError::TokenMalformed => "TOKEN_MALFORMED",
            AuthError::TokenInvalid => "TOKEN_INVALID",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::Database(_) => "DATABASE_ERROR",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Client-facing message; internal failure details are filtered out
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::MissingCredentials => debug!("Login request with missing credentials"),
            AuthError::InvalidCredentials => debug!("Login failed: invalid credentials"),
            AuthError::AccountInactive => warn!("Login attempt against inactive account"),
            AuthError::RoleMismatch { requested, stored } => warn!(
                "Role mismatch on login: stored '{}', requested '{}'",
                stored, requested
            ),
            AuthError::TokenMissing => warn!("Missing token on protected request"),
            AuthError::TokenMalformed => warn!("Malformed authorization header"),
            AuthError::TokenInvalid => warn!("Invalid or expired token presented"),
            AuthError::UserNotFound => warn!("Valid token for an identity that no longer exists"),
            AuthError::Database(msg) => error!("Database error in auth: {}", msg),
            AuthError::Internal(msg) => error!("Internal error in auth: {}", msg),
        }

        let body = Json(ErrorResponse {
            error_code: self.error_code().to_string(),
            message: self.client_message(),
            timestamp: Utc::now().to_rfc3339(),
        });

        (self.status_code(), body).into_response()
    }
}
