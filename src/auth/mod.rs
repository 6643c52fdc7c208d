// Authentication module
// Identity resolution and stateless session issuance for the clinic portal

pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod profile;
pub mod repository;
pub mod service;
pub mod token;

#[cfg(test)]
pub mod testutil;

// Re-export commonly used types
pub use error::{AuthError, ErrorResponse};
pub use handlers::{login_handler, me_handler};
pub use models::{
    CurrentUserResponse, Identity, LoginRequest, LoginResponse, Profile, Role, UserResponse,
};
pub use password::PasswordService;
pub use profile::{CanonicalDoctor, ProfileResolver};
pub use repository::{IdentityStore, PgIdentityStore};
pub use service::AuthService;
pub use token::TokenService;
