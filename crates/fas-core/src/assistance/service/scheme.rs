use std::sync::Arc;

use tracing::info;

use super::error::{EntityKind, ServiceError};
use crate::assistance::domain::{
    Benefit, BenefitPatch, CriteriaPatch, NewBenefit, NewScheme, NewSchemeCriteria, Scheme,
    SchemeCriteria, SchemePatch,
};
use crate::assistance::eligibility::{validate_criterion, EligibilityEngine};
use crate::assistance::ids::{ApplicantId, BenefitId, CriteriaId, SchemeId};
use crate::assistance::repository::{ApplicantRepository, SchemeRepository};

/// Scheme catalogue management and the "schemes available to me" query.
pub struct SchemeService<S, A> {
    schemes: Arc<S>,
    applicants: Arc<A>,
    engine: EligibilityEngine,
}

impl<S, A> SchemeService<S, A>
where
    S: SchemeRepository + 'static,
    A: ApplicantRepository + 'static,
{
    pub fn new(schemes: Arc<S>, applicants: Arc<A>, engine: EligibilityEngine) -> Self {
        Self {
            schemes,
            applicants,
            engine,
        }
    }

    pub fn get(&self, id: SchemeId) -> Result<Scheme, ServiceError> {
        self.schemes
            .get_scheme(id)?
            .ok_or(ServiceError::NotFound(EntityKind::Scheme))
    }

    pub fn list(&self) -> Result<Vec<Scheme>, ServiceError> {
        Ok(self.schemes.list_schemes()?)
    }

    pub fn create(&self, scheme: NewScheme) -> Result<Scheme, ServiceError> {
        let created = self.schemes.create_scheme(scheme)?;
        info!(scheme_id = %created.id, "scheme created");
        Ok(created)
    }

    pub fn update(&self, id: SchemeId, patch: SchemePatch) -> Result<Scheme, ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::NoUpdateFields);
        }

        let updated = self
            .schemes
            .update_scheme(id, &patch)?
            .ok_or(ServiceError::NotFound(EntityKind::Scheme))?;
        info!(scheme_id = %id, "scheme updated");
        Ok(updated)
    }

    pub fn delete(&self, id: SchemeId) -> Result<(), ServiceError> {
        if !self.schemes.delete_scheme(id)? {
            return Err(ServiceError::NotFound(EntityKind::Scheme));
        }
        info!(scheme_id = %id, "scheme deleted");
        Ok(())
    }

    /// Schemes whose every criterion the applicant currently satisfies.
    ///
    /// Any lookup failure aborts the whole query; there are no partial results.
    pub fn list_applicant_available_schemes(
        &self,
        applicant_id: ApplicantId,
    ) -> Result<Vec<Scheme>, ServiceError> {
        let schemes = self.schemes.list_schemes()?;
        let applicant = self
            .applicants
            .get_applicant(applicant_id)?
            .ok_or(ServiceError::NotFound(EntityKind::Applicant))?;
        let family = self.applicants.get_applicant_family(applicant_id)?;

        Ok(self.engine.available_schemes(schemes, &applicant, &family))
    }

    pub fn add_benefit(&self, benefit: NewBenefit) -> Result<Benefit, ServiceError> {
        self.get(benefit.scheme_id)?;

        let created = self.schemes.add_benefit(benefit)?;
        info!(scheme_id = %created.scheme_id, benefit_id = %created.id, "benefit added");
        Ok(created)
    }

    pub fn update_benefit(
        &self,
        id: BenefitId,
        patch: BenefitPatch,
    ) -> Result<Benefit, ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::NoUpdateFields);
        }

        let existing = self.get_benefit(id)?;
        self.get(patch.scheme_id.unwrap_or(existing.scheme_id))?;

        let updated = self
            .schemes
            .update_benefit(id, &patch)?
            .ok_or(ServiceError::NotFound(EntityKind::Benefit))?;
        info!(benefit_id = %id, "benefit updated");
        Ok(updated)
    }

    pub fn delete_benefit(&self, id: BenefitId) -> Result<(), ServiceError> {
        if !self.schemes.delete_benefit(id)? {
            return Err(ServiceError::NotFound(EntityKind::Benefit));
        }
        info!(benefit_id = %id, "benefit deleted");
        Ok(())
    }

    /// Validate, then attach a criterion to an existing scheme.
    pub fn add_criteria(
        &self,
        scheme_id: SchemeId,
        name: Option<&str>,
        value: Option<&str>,
    ) -> Result<SchemeCriteria, ServiceError> {
        let criterion = validate_criterion(name, value)?;
        self.get(scheme_id)?;

        let created = self.schemes.add_criteria(NewSchemeCriteria {
            scheme_id,
            name: criterion.name.to_string(),
            value: criterion.value,
        })?;
        info!(
            scheme_id = %scheme_id,
            criteria_id = %created.id,
            criterion = %created.name,
            "criteria added"
        );
        Ok(created)
    }

    /// Replace a criterion's name and value, optionally moving it to another scheme.
    pub fn update_criteria(
        &self,
        id: CriteriaId,
        patch: CriteriaPatch,
    ) -> Result<SchemeCriteria, ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::NoUpdateFields);
        }
        let criterion = validate_criterion(patch.name.as_deref(), patch.value.as_deref())?;

        let existing = self.get_criteria(id)?;
        self.get(patch.scheme_id.unwrap_or(existing.scheme_id))?;

        let normalized = CriteriaPatch {
            name: Some(criterion.name.to_string()),
            value: Some(criterion.value),
            scheme_id: patch.scheme_id,
        };
        let updated = self
            .schemes
            .update_criteria(id, &normalized)?
            .ok_or(ServiceError::NotFound(EntityKind::Criteria))?;
        info!(criteria_id = %id, "criteria updated");
        Ok(updated)
    }

    pub fn delete_criteria(&self, id: CriteriaId) -> Result<(), ServiceError> {
        if !self.schemes.delete_criteria(id)? {
            return Err(ServiceError::NotFound(EntityKind::Criteria));
        }
        info!(criteria_id = %id, "criteria deleted");
        Ok(())
    }

    fn get_benefit(&self, id: BenefitId) -> Result<Benefit, ServiceError> {
        self.schemes
            .get_benefit(id)?
            .ok_or(ServiceError::NotFound(EntityKind::Benefit))
    }

    fn get_criteria(&self, id: CriteriaId) -> Result<SchemeCriteria, ServiceError> {
        self.schemes
            .get_criteria(id)?
            .ok_or(ServiceError::NotFound(EntityKind::Criteria))
    }
}
