// Application configuration, gathered once at startup
// Replaces scattered env reads with explicit values handed to each component

use thiserror::Error;
use tracing::warn;

use crate::auth::profile::CanonicalDoctor;
use crate::auth::token::DEFAULT_TOKEN_TTL_SECS;

/// Placeholder signing key used when JWT_SECRET is absent. Fine for local
/// development, never for a deployment.
const DEFAULT_JWT_SECRET: &str = "clinic-portal-dev-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    MissingVar(&'static str),

    #[error("{0} is not a valid number: '{1}'")]
    InvalidNumber(&'static str, String),
}

/// Process-wide configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub canonical_doctor: CanonicalDoctor,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// Only DATABASE_URL is required. A missing JWT_SECRET falls back to the
    /// insecure development default, loudly.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                warn!("JWT_SECRET is not set; falling back to the insecure development default");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let token_ttl_secs = match std::env::var("TOKEN_TTL_SECS") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidNumber("TOKEN_TTL_SECS", raw.clone()))?,
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_or("PORT", "8080"),
            database_url,
            jwt_secret,
            token_ttl_secs,
            canonical_doctor: CanonicalDoctor {
                email: env_or("CANONICAL_DOCTOR_EMAIL", "asha.sharma@clinic.example"),
                first_name: env_or("CANONICAL_DOCTOR_FIRST_NAME", "Asha"),
                last_name: env_or("CANONICAL_DOCTOR_LAST_NAME", "Sharma"),
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
