// In-memory credential store and fixtures shared by the test suites

use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::error::AuthError;
use crate::auth::models::{DoctorProfile, Identity, Profile, Role};
use crate::auth::password::PasswordService;
use crate::auth::profile::{CanonicalDoctor, ProfileResolver};
use crate::auth::repository::IdentityStore;
use crate::auth::service::AuthService;
use crate::auth::token::{TokenService, DEFAULT_TOKEN_TTL_SECS};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";

/// In-memory store; identities and doctors keep insertion order, which is
/// what `find_first_doctor` reports.
#[derive(Debug, Default, Clone)]
pub struct MockStore {
    pub identities: Vec<Identity>,
    pub doctors: Vec<DoctorProfile>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identities.push(identity);
        self
    }

    pub fn with_doctor(mut self, doctor: DoctorProfile) -> Self {
        self.doctors.push(doctor);
        self
    }
}

#[async_trait]
impl IdentityStore for MockStore {
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, AuthError> {
        Ok(self
            .identities
            .iter()
            .find(|identity| identity.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_identity_by_id(&self, id: i32) -> Result<Option<Identity>, AuthError> {
        Ok(self.identities.iter().find(|identity| identity.id == id).cloned())
    }

    async fn find_doctor_by_email(&self, email: &str) -> Result<Option<DoctorProfile>, AuthError> {
        Ok(self
            .doctors
            .iter()
            .find(|doctor| {
                doctor
                    .email
                    .as_deref()
                    .map_or(false, |e| e.eq_ignore_ascii_case(email))
            })
            .cloned())
    }

    async fn find_doctor_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<DoctorProfile>, AuthError> {
        Ok(self
            .doctors
            .iter()
            .find(|doctor| doctor.first_name == first_name && doctor.last_name == last_name)
            .cloned())
    }

    async fn find_first_doctor(&self) -> Result<Option<DoctorProfile>, AuthError> {
        Ok(self.doctors.first().cloned())
    }
}

/// Canonical-doctor configuration used across the tests
pub fn canonical_config() -> CanonicalDoctor {
    CanonicalDoctor {
        email: "asha.sharma@clinic.example".to_string(),
        first_name: "Asha".to_string(),
        last_name: "Sharma".to_string(),
    }
}

pub fn test_token_service() -> TokenService {
    TokenService::new(TEST_SECRET.to_string(), DEFAULT_TOKEN_TTL_SECS)
}

/// Auth service wired against an in-memory store
pub fn test_auth_service(store: MockStore) -> AuthService {
    AuthService::new(
        Arc::new(store),
        ProfileResolver::new(canonical_config()),
        test_token_service(),
    )
}

pub fn doctor_record(
    id: i32,
    first_name: &str,
    last_name: &str,
    email: Option<&str>,
    specialization: Option<&str>,
) -> DoctorProfile {
    DoctorProfile {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.map(str::to_string),
        specialization: specialization.map(str::to_string),
        emp_id: None,
    }
}

/// Identity with a placeholder hash, for tests that never verify passwords
pub fn identity(id: i32, email: &str, role: Role, profile: Option<Profile>) -> Identity {
    Identity {
        id,
        email: email.to_string(),
        password_hash: "unused".to_string(),
        role,
        is_active: true,
        can_access_system: true,
        profile,
    }
}

/// Identity with a real Argon2 hash of the given password
pub fn identity_with_password(
    id: i32,
    email: &str,
    password: &str,
    role: Role,
    profile: Option<Profile>,
) -> Identity {
    Identity {
        password_hash: PasswordService::hash(password).unwrap(),
        ..identity(id, email, role, profile)
    }
}
