//! Storage ports for the assistance services.
//!
//! Lookups return `Ok(None)` on a miss (including soft-deleted rows); services
//! translate that into the matching not-found error.

use super::domain::{
    Applicant, ApplicantPatch, Application, Benefit, BenefitPatch, CriteriaPatch, Family,
    NewApplicant, NewApplication, NewBenefit, NewRelationship, NewScheme, NewSchemeCriteria,
    Relationship, Scheme, SchemeCriteria, SchemePatch,
};
use super::ids::{ApplicantId, ApplicationId, BenefitId, CriteriaId, SchemeId};

pub trait ApplicantRepository: Send + Sync {
    fn get_applicant(&self, id: ApplicantId) -> Result<Option<Applicant>, RepositoryError>;
    fn list_applicants(&self) -> Result<Vec<Applicant>, RepositoryError>;
    fn create_applicant(&self, applicant: NewApplicant) -> Result<Applicant, RepositoryError>;
    fn update_applicant(
        &self,
        id: ApplicantId,
        patch: &ApplicantPatch,
    ) -> Result<Option<Applicant>, RepositoryError>;
    /// Returns `false` when there was no live applicant to delete.
    fn delete_applicant(&self, id: ApplicantId) -> Result<bool, RepositoryError>;
    fn get_applicant_family(&self, id: ApplicantId) -> Result<Family, RepositoryError>;
    fn add_relationship(
        &self,
        relationship: NewRelationship,
    ) -> Result<Relationship, RepositoryError>;
}

pub trait SchemeRepository: Send + Sync {
    /// Loads the scheme together with its live benefits and criteria.
    fn get_scheme(&self, id: SchemeId) -> Result<Option<Scheme>, RepositoryError>;
    fn list_schemes(&self) -> Result<Vec<Scheme>, RepositoryError>;
    fn create_scheme(&self, scheme: NewScheme) -> Result<Scheme, RepositoryError>;
    fn update_scheme(
        &self,
        id: SchemeId,
        patch: &SchemePatch,
    ) -> Result<Option<Scheme>, RepositoryError>;
    fn delete_scheme(&self, id: SchemeId) -> Result<bool, RepositoryError>;

    fn get_benefit(&self, id: BenefitId) -> Result<Option<Benefit>, RepositoryError>;
    fn add_benefit(&self, benefit: NewBenefit) -> Result<Benefit, RepositoryError>;
    fn update_benefit(
        &self,
        id: BenefitId,
        patch: &BenefitPatch,
    ) -> Result<Option<Benefit>, RepositoryError>;
    fn delete_benefit(&self, id: BenefitId) -> Result<bool, RepositoryError>;

    fn get_criteria(&self, id: CriteriaId) -> Result<Option<SchemeCriteria>, RepositoryError>;
    fn add_criteria(&self, criteria: NewSchemeCriteria)
        -> Result<SchemeCriteria, RepositoryError>;
    fn update_criteria(
        &self,
        id: CriteriaId,
        patch: &CriteriaPatch,
    ) -> Result<Option<SchemeCriteria>, RepositoryError>;
    fn delete_criteria(&self, id: CriteriaId) -> Result<bool, RepositoryError>;
}

pub trait ApplicationRepository: Send + Sync {
    fn get_application(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn list_applications(&self) -> Result<Vec<Application>, RepositoryError>;
    fn create_application(
        &self,
        application: NewApplication,
    ) -> Result<Application, RepositoryError>;
    fn update_application(
        &self,
        id: ApplicationId,
        application: NewApplication,
    ) -> Result<Option<Application>, RepositoryError>;
    fn delete_application(&self, id: ApplicationId) -> Result<bool, RepositoryError>;
}

/// Error enumeration for storage failures other than lookup misses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
