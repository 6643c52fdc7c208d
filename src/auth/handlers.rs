// HTTP handlers for the authentication endpoints

use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::auth::{
    error::{AuthError, ErrorResponse},
    models::{CurrentUserResponse, LoginRequest, LoginResponse},
    service::AuthService,
};

/// Authenticate and mint a bearer token
/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated; token and user projection returned", body = LoginResponse),
        (status = 400, description = "Email or password missing", body = ErrorResponse),
        (status = 401, description = "Unknown email or wrong password", body = ErrorResponse),
        (status = 403, description = "Account inactive or role mismatch", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    request
        .validate()
        .map_err(|_| AuthError::MissingCredentials)?;

    let response = service.login(&request).await?;
    Ok(Json(response))
}

/// Resolve the user behind a bearer token
/// GET /auth/me
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user projection", body = CurrentUserResponse),
        (status = 401, description = "Missing or malformed Authorization header", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token, or inactive account", body = ErrorResponse),
        (status = 404, description = "Identity no longer exists", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn me_handler(
    State(service): State<Arc<AuthService>>,
    headers: HeaderMap,
) -> Result<Json<CurrentUserResponse>, AuthError> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::TokenMalformed))
        .transpose()?;

    let user = service.current_user(authorization).await?;
    Ok(Json(CurrentUserResponse { user }))
}
