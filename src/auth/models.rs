// Authentication data models and DTOs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

/// Account role stored on the identity record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Patient,
    Staff,
}

impl Role {
    /// Parse a role string case-insensitively
    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "doctor" => Some(Role::Doctor),
            "patient" => Some(Role::Patient),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Patient => "patient",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employee profile record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct EmployeeProfile {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub emp_id: Option<String>,
}

/// Doctor profile record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DoctorProfile {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub specialization: Option<String>,
    pub emp_id: Option<String>,
}

/// Patient profile record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PatientProfile {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

/// Staff profile record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StaffProfile {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub emp_id: Option<String>,
}

/// The profile variant an identity references, eagerly loaded on lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Profile {
    Employee(EmployeeProfile),
    Doctor(DoctorProfile),
    Patient(PatientProfile),
    Staff(StaffProfile),
}

/// The login-capable credential record with its joined profile variant.
/// At most one profile reference is expected to be populated; admin
/// identities carry none.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub can_access_system: bool,
    pub profile: Option<Profile>,
}

/// Minimal public projection of an identity's linked profile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedProfile {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub emp_id: Option<String>,
    pub employee_id: Option<i32>,
    pub doctor_id: Option<i32>,
    pub patient_id: Option<i32>,
    pub staff_id: Option<i32>,
}

impl ResolvedProfile {
    /// The id carried into the token payload; None for profile-less admins
    pub fn role_specific_id(&self) -> Option<i32> {
        self.doctor_id
            .or(self.patient_id)
            .or(self.staff_id)
            .or(self.employee_id)
    }
}

/// Login request DTO
///
/// Fields default to empty strings so an omitted field reports as missing
/// credentials rather than a deserialization failure.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub email: String,
    #[serde(default)]
    #[validate(custom = "crate::validation::validate_not_blank")]
    pub password: String,
    /// Optional expected role, compared case-insensitively to the stored one
    #[serde(default)]
    pub role: Option<String>,
}

/// Public user projection returned by both login and me
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub can_access_system: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emp_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<i32>,
}

impl UserResponse {
    pub fn new(identity: &Identity, profile: ResolvedProfile) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            role: identity.role,
            is_active: identity.is_active,
            can_access_system: identity.can_access_system,
            name: profile.name,
            specialization: profile.specialization,
            emp_id: profile.emp_id,
            employee_id: profile.employee_id,
            doctor_id: profile.doctor_id,
            patient_id: profile.patient_id,
            staff_id: profile.staff_id,
        }
    }
}

/// Successful login response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Response DTO for GET /auth/me
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CurrentUserResponse {
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("Doctor"), Some(Role::Doctor));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse(" patient "), Some(Role::Patient));
        assert_eq!(Role::parse("sTaFf"), Some(Role::Staff));
        assert_eq!(Role::parse("nurse"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), "\"doctor\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_role_specific_id_prefers_populated_reference() {
        let profile = ResolvedProfile {
            patient_id: Some(7),
            ..Default::default()
        };
        assert_eq!(profile.role_specific_id(), Some(7));
        assert_eq!(ResolvedProfile::default().role_specific_id(), None);
    }

    #[test]
    fn test_login_request_defaults_missing_fields_to_empty() {
        let request: LoginRequest = serde_json::from_str("{\"email\":\"a@b.com\"}").unwrap();
        assert_eq!(request.email, "a@b.com");
        assert_eq!(request.password, "");
        assert!(request.role.is_none());
    }
}
