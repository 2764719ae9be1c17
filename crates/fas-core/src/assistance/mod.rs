//! Financial assistance case management: applicants, schemes and applications.
//!
//! Eligibility is decided by [`eligibility`] against each scheme's criteria; the
//! application service refuses to persist pairs that fail the check.

pub mod domain;
pub mod eligibility;
pub mod ids;
pub mod repository;
pub mod router;
pub mod service;
pub mod store;

pub use domain::{
    Applicant, ApplicantPatch, Application, ApplicationPatch, Benefit, BenefitPatch,
    CriteriaPatch, EmploymentStatus, Family, MaritalStatus, NewApplicant, NewApplication,
    NewBenefit, NewRelationship, NewScheme, NewSchemeCriteria, Relationship, RelationshipType,
    Scheme, SchemeCriteria, SchemePatch, Sex,
};
pub use eligibility::{
    check_eligibility, CriteriaError, EligibilityAssessment, EligibilityEngine, EvaluationClock,
};
pub use ids::{ApplicantId, ApplicationId, BenefitId, CriteriaId, RelationshipId, SchemeId};
pub use repository::{
    ApplicantRepository, ApplicationRepository, RepositoryError, SchemeRepository,
};
pub use router::assistance_router;
pub use service::{
    ApplicantService, ApplicationService, EntityKind, SchemeService, ServiceError,
};
pub use store::InMemoryStore;

#[cfg(test)]
mod tests;
