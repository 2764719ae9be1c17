use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::ids::{
    ApplicantId, ApplicationId, BenefitId, CriteriaId, RelationshipId, SchemeId,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    Unemployed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
    Widowed,
    Divorced,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

/// Tag carried by a directed family edge from applicant A to applicant B.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RelationshipType {
    Spouse,
    Child,
    Parent,
    Sibling,
}

/// A person tracked by the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub name: String,
    pub employment_status: EmploymentStatus,
    pub marital_status: MaritalStatus,
    pub sex: Sex,
    /// Age criteria fail closed when this is absent.
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Applicant {
    pub(crate) fn apply(&mut self, patch: &ApplicantPatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(status) = patch.employment_status {
            self.employment_status = status;
        }
        if let Some(status) = patch.marital_status {
            self.marital_status = status;
        }
        if let Some(sex) = patch.sex {
            self.sex = sex;
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            self.date_of_birth = Some(date_of_birth);
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplicant {
    pub name: String,
    pub employment_status: EmploymentStatus,
    pub marital_status: MaritalStatus,
    pub sex: Sex,
    pub date_of_birth: NaiveDate,
}

/// Partial update for an applicant; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantPatch {
    pub name: Option<String>,
    pub employment_status: Option<EmploymentStatus>,
    pub marital_status: Option<MaritalStatus>,
    pub sex: Option<Sex>,
    pub date_of_birth: Option<NaiveDate>,
}

impl ApplicantPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.employment_status.is_none()
            && self.marital_status.is_none()
            && self.sex.is_none()
            && self.date_of_birth.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelationshipId,
    pub applicant_a_id: ApplicantId,
    pub applicant_b_id: ApplicantId,
    pub relationship_type: RelationshipType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRelationship {
    pub applicant_a_id: ApplicantId,
    pub applicant_b_id: ApplicantId,
    pub relationship_type: RelationshipType,
}

/// Live family members of one applicant, grouped by relationship type.
///
/// Eligibility only looks at which relationship types are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Family(BTreeMap<RelationshipType, Vec<Applicant>>);

impl Family {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, relationship: RelationshipType, member: Applicant) {
        self.0.entry(relationship).or_default().push(member);
    }

    pub fn has(&self, relationship: RelationshipType) -> bool {
        self.0
            .get(&relationship)
            .is_some_and(|members| !members.is_empty())
    }

    pub fn members(&self, relationship: RelationshipType) -> &[Applicant] {
        self.0
            .get(&relationship)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn relationship_types(&self) -> impl Iterator<Item = RelationshipType> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(RelationshipType, Applicant)> for Family {
    fn from_iter<I: IntoIterator<Item = (RelationshipType, Applicant)>>(iter: I) -> Self {
        let mut family = Family::new();
        for (relationship, member) in iter {
            family.insert(relationship, member);
        }
        family
    }
}

/// An assistance programme with its benefits and eligibility criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: SchemeId,
    pub name: String,
    pub benefits: Vec<Benefit>,
    /// An empty list means the scheme is open to everyone.
    pub criteria: Vec<SchemeCriteria>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScheme {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemePatch {
    pub name: Option<String>,
}

impl SchemePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

/// Monetary entitlement attached to a scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benefit {
    pub id: BenefitId,
    pub scheme_id: SchemeId,
    pub name: String,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Benefit {
    pub(crate) fn apply(&mut self, patch: &BenefitPatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(scheme_id) = patch.scheme_id {
            self.scheme_id = scheme_id;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBenefit {
    pub scheme_id: SchemeId,
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenefitPatch {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub scheme_id: Option<SchemeId>,
}

impl BenefitPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.amount.is_none() && self.scheme_id.is_none()
    }
}

/// One named eligibility rule attached to a scheme.
///
/// `name` and `value` are stored in their normalized (trimmed, lower-case) form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeCriteria {
    pub id: CriteriaId,
    pub scheme_id: SchemeId,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchemeCriteria {
    pub scheme_id: SchemeId,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaPatch {
    pub name: Option<String>,
    pub value: Option<String>,
    pub scheme_id: Option<SchemeId>,
}

impl CriteriaPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.value.is_none() && self.scheme_id.is_none()
    }
}

/// An applicant's enrollment record for one scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub applicant_id: ApplicantId,
    pub scheme_id: SchemeId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewApplication {
    pub applicant_id: ApplicantId,
    pub scheme_id: SchemeId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationPatch {
    pub applicant_id: Option<ApplicantId>,
    pub scheme_id: Option<SchemeId>,
}

impl ApplicationPatch {
    pub fn is_empty(&self) -> bool {
        self.applicant_id.is_none() && self.scheme_id.is_none()
    }

    /// Overlay the patch on an existing application, yielding the pair to gate.
    pub fn merged_with(&self, existing: &Application) -> NewApplication {
        NewApplication {
            applicant_id: self.applicant_id.unwrap_or(existing.applicant_id),
            scheme_id: self.scheme_id.unwrap_or(existing.scheme_id),
        }
    }
}
