use std::sync::Arc;

use tracing::{info, warn};

use super::error::{EntityKind, ServiceError};
use crate::assistance::domain::{Application, ApplicationPatch, NewApplication};
use crate::assistance::eligibility::EligibilityEngine;
use crate::assistance::ids::ApplicationId;
use crate::assistance::repository::{
    ApplicantRepository, ApplicationRepository, SchemeRepository,
};

/// Application lifecycle guarded by the eligibility gate on create and update.
pub struct ApplicationService<P, A, S> {
    applications: Arc<P>,
    applicants: Arc<A>,
    schemes: Arc<S>,
    engine: EligibilityEngine,
}

impl<P, A, S> ApplicationService<P, A, S>
where
    P: ApplicationRepository + 'static,
    A: ApplicantRepository + 'static,
    S: SchemeRepository + 'static,
{
    pub fn new(
        applications: Arc<P>,
        applicants: Arc<A>,
        schemes: Arc<S>,
        engine: EligibilityEngine,
    ) -> Self {
        Self {
            applications,
            applicants,
            schemes,
            engine,
        }
    }

    pub fn get(&self, id: ApplicationId) -> Result<Application, ServiceError> {
        self.applications
            .get_application(id)?
            .ok_or(ServiceError::NotFound(EntityKind::Application))
    }

    pub fn list(&self) -> Result<Vec<Application>, ServiceError> {
        Ok(self.applications.list_applications()?)
    }

    pub fn create(&self, application: NewApplication) -> Result<Application, ServiceError> {
        self.ensure_eligible(application)?;

        let created = self.applications.create_application(application)?;
        info!(
            application_id = %created.id,
            applicant_id = %created.applicant_id,
            scheme_id = %created.scheme_id,
            "application created"
        );
        Ok(created)
    }

    /// Apply the patch over the stored application and re-check eligibility of the result.
    pub fn update(
        &self,
        id: ApplicationId,
        patch: ApplicationPatch,
    ) -> Result<Application, ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::NoUpdateFields);
        }

        let existing = self.get(id)?;
        let candidate = patch.merged_with(&existing);
        self.ensure_eligible(candidate)?;

        let updated = self
            .applications
            .update_application(id, candidate)?
            .ok_or(ServiceError::NotFound(EntityKind::Application))?;
        info!(application_id = %id, "application updated");
        Ok(updated)
    }

    /// Deletion is not gated on eligibility.
    pub fn delete(&self, id: ApplicationId) -> Result<(), ServiceError> {
        if !self.applications.delete_application(id)? {
            return Err(ServiceError::NotFound(EntityKind::Application));
        }
        info!(application_id = %id, "application deleted");
        Ok(())
    }

    fn ensure_eligible(&self, candidate: NewApplication) -> Result<(), ServiceError> {
        let applicant = self
            .applicants
            .get_applicant(candidate.applicant_id)?
            .ok_or(ServiceError::NotFound(EntityKind::Applicant))?;
        let scheme = self
            .schemes
            .get_scheme(candidate.scheme_id)?
            .ok_or(ServiceError::NotFound(EntityKind::Scheme))?;
        let family = self.applicants.get_applicant_family(applicant.id)?;

        if !self.engine.is_eligible(&scheme, &applicant, &family) {
            warn!(
                applicant_id = %applicant.id,
                scheme_id = %scheme.id,
                "applicant does not meet scheme criteria"
            );
            return Err(ServiceError::SchemeNotEligible);
        }

        Ok(())
    }
}
