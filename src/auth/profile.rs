// Profile resolution, including the canonical-doctor rule

use crate::auth::error::AuthError;
use crate::auth::models::{DoctorProfile, Identity, Profile, ResolvedProfile, Role};
use crate::auth::repository::IdentityStore;

/// The clinic's designated practitioner, as configured.
///
/// Doctor-role logins are re-pointed at this record no matter which doctor
/// record their identity references. The clinic operates as a
/// single-practitioner product; every doctor session resolves to the one
/// designated practitioner.
#[derive(Debug, Clone)]
pub struct CanonicalDoctor {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Produces the minimal public projection for an identity's profile
pub struct ProfileResolver {
    canonical: CanonicalDoctor,
}

impl ProfileResolver {
    pub fn new(canonical: CanonicalDoctor) -> Self {
        Self { canonical }
    }

    /// Resolve an identity's public projection.
    ///
    /// Patient, staff, and employee variants pass straight through. Doctor-
    /// role identities are canonicalized; the role, not the reference,
    /// selects that path, so a mis-linked non-doctor reference on a doctor
    /// account is still canonicalized.
    pub async fn resolve(
        &self,
        store: &dyn IdentityStore,
        identity: &Identity,
    ) -> Result<ResolvedProfile, AuthError> {
        if identity.role == Role::Doctor {
            return self.resolve_doctor(store, identity).await;
        }

        Ok(match &identity.profile {
            Some(Profile::Employee(p)) => ResolvedProfile {
                name: Some(full_name(&p.first_name, &p.last_name)),
                emp_id: p.emp_id.clone(),
                employee_id: Some(p.id),
                ..Default::default()
            },
            Some(Profile::Patient(p)) => ResolvedProfile {
                name: Some(full_name(&p.first_name, &p.last_name)),
                patient_id: Some(p.id),
                ..Default::default()
            },
            Some(Profile::Staff(p)) => ResolvedProfile {
                name: Some(full_name(&p.first_name, &p.last_name)),
                emp_id: p.emp_id.clone(),
                staff_id: Some(p.id),
                ..Default::default()
            },
            // A non-doctor role linked to a doctor record passes through
            // without canonicalization.
            Some(Profile::Doctor(p)) => doctor_projection(p),
            None => ResolvedProfile::default(),
        })
    }

    async fn resolve_doctor(
        &self,
        store: &dyn IdentityStore,
        identity: &Identity,
    ) -> Result<ResolvedProfile, AuthError> {
        if let Some(doctor) = self.resolve_canonical_doctor(store).await? {
            return Ok(doctor_projection(&doctor));
        }

        // No doctor record exists anywhere: fall back to the identity's own
        // linked record from the join.
        Ok(match &identity.profile {
            Some(Profile::Doctor(p)) => doctor_projection(p),
            _ => ResolvedProfile::default(),
        })
    }

    /// The canonical-doctor fallback chain, first match wins:
    /// configured email, then configured name, then the first record in
    /// store order.
    pub async fn resolve_canonical_doctor(
        &self,
        store: &dyn IdentityStore,
    ) -> Result<Option<DoctorProfile>, AuthError> {
        if let Some(doctor) = store.find_doctor_by_email(&self.canonical.email).await? {
            return Ok(Some(doctor));
        }

        if let Some(doctor) = store
            .find_doctor_by_name(&self.canonical.first_name, &self.canonical.last_name)
            .await?
        {
            return Ok(Some(doctor));
        }

        store.find_first_doctor().await
    }
}

fn doctor_projection(doctor: &DoctorProfile) -> ResolvedProfile {
    ResolvedProfile {
        name: Some(full_name(&doctor.first_name, &doctor.last_name)),
        specialization: doctor.specialization.clone(),
        emp_id: doctor.emp_id.clone(),
        doctor_id: Some(doctor.id),
        ..Default::default()
    }
}

fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first, last)
}
