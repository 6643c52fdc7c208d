mod auth;
mod config;
mod db;
mod validation;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{login_handler, me_handler, AuthService, PgIdentityStore, ProfileResolver, TokenService};
use config::AppConfig;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::login_handler,
        auth::handlers::me_handler,
    ),
    components(
        schemas(
            auth::LoginRequest,
            auth::LoginResponse,
            auth::CurrentUserResponse,
            auth::UserResponse,
            auth::Role,
            auth::ErrorResponse,
        )
    ),
    tags(
        (name = "auth", description = "Login and session endpoints")
    ),
    info(
        title = "Clinic Portal API",
        version = "1.0.0",
        description = "Authentication boundary for the clinic portal: login and current-user resolution"
    )
)]
struct ApiDoc;

/// Creates and configures the application router
/// Maps the auth endpoints to their handlers and adds CORS middleware
fn create_router(service: Arc<AuthService>) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // API routes
        .route("/auth/login", post(login_handler))
        .route("/auth/me", get(me_handler))
        .layer(cors)
        .with_state(service)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Clinic Portal API - Starting...");

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Wire the authentication service
    let store = Arc::new(PgIdentityStore::new(db_pool));
    let service = Arc::new(AuthService::new(
        store,
        ProfileResolver::new(config.canonical_doctor.clone()),
        TokenService::new(config.jwt_secret.clone(), config.token_ttl_secs),
    ));

    let app = create_router(service);

    // Start the Axum server
    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Clinic Portal API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}
