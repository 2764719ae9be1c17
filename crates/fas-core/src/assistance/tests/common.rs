use std::sync::Arc;

use axum::response::Response;
use chrono::{Datelike, NaiveDate, Utc};
use serde_json::Value;

use crate::assistance::domain::{
    Applicant, Benefit, BenefitPatch, CriteriaPatch, EmploymentStatus, MaritalStatus,
    NewApplicant, NewBenefit, NewScheme, NewSchemeCriteria, Scheme, SchemeCriteria, SchemePatch,
    Sex,
};
use crate::assistance::eligibility::{EligibilityEngine, EvaluationClock};
use crate::assistance::ids::{ApplicantId, BenefitId, CriteriaId, SchemeId};
use crate::assistance::repository::{RepositoryError, SchemeRepository};
use crate::assistance::router::assistance_router;
use crate::assistance::service::{ApplicantService, ApplicationService, SchemeService};
use crate::assistance::store::InMemoryStore;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

pub(super) fn current_year() -> i32 {
    today().year()
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(EvaluationClock::Fixed(today()))
}

/// Born on 1 January of the year that makes the calendar age `age`.
pub(super) fn born_aged(age: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(current_year() - age, 1, 1).expect("valid date")
}

pub(super) fn new_applicant(
    name: &str,
    employment_status: EmploymentStatus,
    age: i32,
) -> NewApplicant {
    NewApplicant {
        name: name.to_string(),
        employment_status,
        marital_status: MaritalStatus::Single,
        sex: Sex::Female,
        date_of_birth: born_aged(age),
    }
}

pub(super) fn applicant(employment_status: EmploymentStatus, age: i32) -> Applicant {
    let now = Utc::now();
    Applicant {
        id: ApplicantId::new_v4(),
        name: "Test Applicant".to_string(),
        employment_status,
        marital_status: MaritalStatus::Single,
        sex: Sex::Male,
        date_of_birth: Some(born_aged(age)),
        created_at: now,
        updated_at: now,
    }
}

pub(super) fn scheme(criteria: &[(&str, &str)]) -> Scheme {
    let now = Utc::now();
    let id = SchemeId::new_v4();
    Scheme {
        id,
        name: "Test Scheme".to_string(),
        benefits: Vec::new(),
        criteria: criteria
            .iter()
            .map(|(name, value)| SchemeCriteria {
                id: CriteriaId::new_v4(),
                scheme_id: id,
                name: name.to_string(),
                value: value.to_string(),
                created_at: now,
                updated_at: now,
            })
            .collect(),
        created_at: now,
        updated_at: now,
    }
}

pub(super) struct Services {
    pub(super) store: Arc<InMemoryStore>,
    pub(super) applicants: Arc<ApplicantService<InMemoryStore>>,
    pub(super) schemes: Arc<SchemeService<InMemoryStore, InMemoryStore>>,
    pub(super) applications: Arc<ApplicationService<InMemoryStore, InMemoryStore, InMemoryStore>>,
}

pub(super) fn build_services() -> Services {
    let store = Arc::new(InMemoryStore::new());
    Services {
        applicants: Arc::new(ApplicantService::new(store.clone())),
        schemes: Arc::new(SchemeService::new(store.clone(), store.clone(), engine())),
        applications: Arc::new(ApplicationService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            engine(),
        )),
        store,
    }
}

impl Services {
    pub(super) fn router(&self) -> axum::Router {
        assistance_router(
            self.applicants.clone(),
            self.schemes.clone(),
            self.applications.clone(),
        )
    }

    /// Persist a scheme and attach the given criteria through the validating service path.
    pub(super) fn seed_scheme(&self, name: &str, criteria: &[(&str, &str)]) -> Scheme {
        let scheme = self
            .schemes
            .create(NewScheme {
                name: name.to_string(),
            })
            .expect("scheme created");
        for &(criterion, value) in criteria {
            self.schemes
                .add_criteria(scheme.id, Some(criterion), Some(value))
                .expect("criteria added");
        }
        self.schemes.get(scheme.id).expect("scheme reloads")
    }
}

/// Scheme storage that is always offline.
pub(super) struct UnavailableSchemes;

fn offline<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("database offline".to_string()))
}

impl SchemeRepository for UnavailableSchemes {
    fn get_scheme(&self, _id: SchemeId) -> Result<Option<Scheme>, RepositoryError> {
        offline()
    }

    fn list_schemes(&self) -> Result<Vec<Scheme>, RepositoryError> {
        offline()
    }

    fn create_scheme(&self, _scheme: NewScheme) -> Result<Scheme, RepositoryError> {
        offline()
    }

    fn update_scheme(
        &self,
        _id: SchemeId,
        _patch: &SchemePatch,
    ) -> Result<Option<Scheme>, RepositoryError> {
        offline()
    }

    fn delete_scheme(&self, _id: SchemeId) -> Result<bool, RepositoryError> {
        offline()
    }

    fn get_benefit(&self, _id: BenefitId) -> Result<Option<Benefit>, RepositoryError> {
        offline()
    }

    fn add_benefit(&self, _benefit: NewBenefit) -> Result<Benefit, RepositoryError> {
        offline()
    }

    fn update_benefit(
        &self,
        _id: BenefitId,
        _patch: &BenefitPatch,
    ) -> Result<Option<Benefit>, RepositoryError> {
        offline()
    }

    fn delete_benefit(&self, _id: BenefitId) -> Result<bool, RepositoryError> {
        offline()
    }

    fn get_criteria(&self, _id: CriteriaId) -> Result<Option<SchemeCriteria>, RepositoryError> {
        offline()
    }

    fn add_criteria(
        &self,
        _criteria: NewSchemeCriteria,
    ) -> Result<SchemeCriteria, RepositoryError> {
        offline()
    }

    fn update_criteria(
        &self,
        _id: CriteriaId,
        _patch: &CriteriaPatch,
    ) -> Result<Option<SchemeCriteria>, RepositoryError> {
        offline()
    }

    fn delete_criteria(&self, _id: CriteriaId) -> Result<bool, RepositoryError> {
        offline()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
