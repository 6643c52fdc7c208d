// Credential store boundary and its Postgres implementation

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::auth::error::AuthError;
use crate::auth::models::{
    DoctorProfile, EmployeeProfile, Identity, PatientProfile, Profile, Role, StaffProfile,
};

/// Read-only view of the credential store.
///
/// Identity lookups eagerly load whichever profile variant the record
/// references. The three doctor lookups back the canonicalization fallback
/// chain in `ProfileResolver`.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, AuthError>;
    async fn find_identity_by_id(&self, id: i32) -> Result<Option<Identity>, AuthError>;
    async fn find_doctor_by_email(&self, email: &str) -> Result<Option<DoctorProfile>, AuthError>;
    async fn find_doctor_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<DoctorProfile>, AuthError>;
    async fn find_first_doctor(&self) -> Result<Option<DoctorProfile>, AuthError>;
}

/// Raw users row; the role string and profile reference are resolved into
/// the domain `Identity` after the fetch.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i32,
    email: String,
    password_hash: String,
    role: String,
    is_active: bool,
    can_access_system: bool,
    employee_id: Option<i32>,
    doctor_id: Option<i32>,
    patient_id: Option<i32>,
    staff_id: Option<i32>,
}

const USER_COLUMNS: &str = "id, email, password_hash, role, is_active, can_access_system, \
     employee_id, doctor_id, patient_id, staff_id";

const DOCTOR_COLUMNS: &str = "id, first_name, last_name, email, specialization, emp_id";

/// Postgres-backed credential store
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the single referenced profile variant, if any.
    ///
    /// When more than one reference is populated (the store does not enforce
    /// the invariant), the first in doctor/patient/staff/employee order wins.
    async fn load_profile(&self, row: &UserRow) -> Result<Option<Profile>, AuthError> {
        if let Some(doctor_id) = row.doctor_id {
            let doctor = sqlx::query_as::<_, DoctorProfile>(&format!(
                "SELECT {} FROM doctors WHERE id = $1",
                DOCTOR_COLUMNS
            ))
            .bind(doctor_id)
            .fetch_optional(&self.pool)
            .await?;
            return Ok(doctor.map(Profile::Doctor));
        }

        if let Some(patient_id) = row.patient_id {
            let patient = sqlx::query_as::<_, PatientProfile>(
                "SELECT id, first_name, last_name, email FROM patients WHERE id = $1",
            )
            .bind(patient_id)
            .fetch_optional(&self.pool)
            .await?;
            return Ok(patient.map(Profile::Patient));
        }

        if let Some(staff_id) = row.staff_id {
            let staff = sqlx::query_as::<_, StaffProfile>(
                "SELECT id, first_name, last_name, email, emp_id FROM staff WHERE id = $1",
            )
            .bind(staff_id)
            .fetch_optional(&self.pool)
            .await?;
            return Ok(staff.map(Profile::Staff));
        }

        if let Some(employee_id) = row.employee_id {
            let employee = sqlx::query_as::<_, EmployeeProfile>(
                "SELECT id, first_name, last_name, email, emp_id FROM employees WHERE id = $1",
            )
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?;
            return Ok(employee.map(Profile::Employee));
        }

        Ok(None)
    }

    async fn into_identity(&self, row: UserRow) -> Result<Identity, AuthError> {
        let role = Role::parse(&row.role).ok_or_else(|| {
            AuthError::Internal(format!(
                "identity {} has unrecognized role '{}'",
                row.id, row.role
            ))
        })?;
        let profile = self.load_profile(&row).await?;

        Ok(Identity {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            role,
            is_active: row.is_active,
            can_access_system: row.can_access_system,
            profile,
        })
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.into_identity(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_identity_by_id(&self, id: i32) -> Result<Option<Identity>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.into_identity(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_doctor_by_email(&self, email: &str) -> Result<Option<DoctorProfile>, AuthError> {
        let doctor = sqlx::query_as::<_, DoctorProfile>(&format!(
            "SELECT {} FROM doctors WHERE LOWER(email) = LOWER($1) ORDER BY id LIMIT 1",
            DOCTOR_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(doctor)
    }

    async fn find_doctor_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<DoctorProfile>, AuthError> {
        let doctor = sqlx::query_as::<_, DoctorProfile>(&format!(
            "SELECT {} FROM doctors WHERE first_name = $1 AND last_name = $2 ORDER BY id LIMIT 1",
            DOCTOR_COLUMNS
        ))
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(doctor)
    }

    async fn find_first_doctor(&self) -> Result<Option<DoctorProfile>, AuthError> {
        // "first" is pinned to id order so the fallback stays deterministic
        let doctor = sqlx::query_as::<_, DoctorProfile>(&format!(
            "SELECT {} FROM doctors ORDER BY id LIMIT 1",
            DOCTOR_COLUMNS
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(doctor)
    }
}
