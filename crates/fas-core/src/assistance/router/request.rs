//! Wire payloads and their conversion into domain inputs.
//!
//! Every field is optional on the wire so that missing and malformed values
//! are reported per field instead of as an opaque body rejection.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

use super::response::{
    ApiError, FieldErrors, INVALID_DATE, INVALID_EMPLOYMENT_STATUS, INVALID_MARITAL_STATUS,
    INVALID_RELATIONSHIP_TYPE, INVALID_SEX, NEGATIVE_AMOUNT, REQUIRED,
};
use crate::assistance::domain::{
    ApplicantPatch, ApplicationPatch, BenefitPatch, EmploymentStatus, MaritalStatus, NewApplicant,
    NewApplication, NewBenefit, NewScheme, RelationshipType, SchemePatch, Sex,
};
use crate::assistance::ids::{ApplicantId, SchemeId};
use crate::assistance::service::{EntityKind, ServiceError};

/// Parse a path or body identifier, failing with the entity's invalid-id error.
pub(crate) fn parse_id<T: FromStr>(raw: &str, kind: EntityKind) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Service(ServiceError::InvalidId(kind)))
}

fn parse_optional_id<T: FromStr>(
    raw: Option<String>,
    kind: EntityKind,
) -> Result<Option<T>, ApiError> {
    raw.map(|raw| parse_id(&raw, kind)).transpose()
}

impl FieldErrors {
    fn required(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        match value {
            Some(value) if !value.trim().is_empty() => Some(value),
            _ => {
                self.push(field, REQUIRED);
                None
            }
        }
    }

    fn parsed<T: FromStr>(
        &mut self,
        field: &'static str,
        value: Option<String>,
        message: &'static str,
    ) -> Option<T> {
        let parsed = value?.trim().parse().ok();
        if parsed.is_none() {
            self.push(field, message);
        }
        parsed
    }

    fn required_parsed<T: FromStr>(
        &mut self,
        field: &'static str,
        value: Option<String>,
        message: &'static str,
    ) -> Option<T> {
        let value = self.required(field, value)?;
        self.parsed(field, Some(value), message)
    }

    fn date(&mut self, field: &'static str, value: Option<String>) -> Option<NaiveDate> {
        let value = value?;
        let parsed = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok();
        if parsed.is_none() {
            self.push(field, INVALID_DATE);
        }
        parsed
    }

    fn amount(&mut self, field: &'static str, value: Option<f64>) -> Option<f64> {
        let value = value?;
        if value.is_finite() && value >= 0.0 {
            Some(value)
        } else {
            self.push(field, NEGATIVE_AMOUNT);
            None
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CreateApplicantRequest {
    pub(crate) name: Option<String>,
    pub(crate) employment_status: Option<String>,
    pub(crate) sex: Option<String>,
    pub(crate) date_of_birth: Option<String>,
    pub(crate) marital_status: Option<String>,
}

impl CreateApplicantRequest {
    pub(crate) fn into_new_applicant(self) -> Result<NewApplicant, ApiError> {
        let mut errors = FieldErrors::default();
        let name = errors.required("name", self.name);
        let employment_status = errors.required_parsed(
            "employment_status",
            self.employment_status,
            INVALID_EMPLOYMENT_STATUS,
        );
        let sex = errors.required_parsed("sex", self.sex, INVALID_SEX);
        let date_of_birth = match errors.required("date_of_birth", self.date_of_birth) {
            Some(raw) => errors.date("date_of_birth", Some(raw)),
            None => None,
        };
        let marital_status =
            errors.required_parsed("marital_status", self.marital_status, INVALID_MARITAL_STATUS);

        match (name, employment_status, sex, date_of_birth, marital_status) {
            (
                Some(name),
                Some(employment_status),
                Some(sex),
                Some(date_of_birth),
                Some(marital_status),
            ) => Ok(NewApplicant {
                name,
                employment_status,
                marital_status,
                sex,
                date_of_birth,
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateApplicantRequest {
    pub(crate) name: Option<String>,
    pub(crate) employment_status: Option<String>,
    pub(crate) sex: Option<String>,
    pub(crate) date_of_birth: Option<String>,
    pub(crate) marital_status: Option<String>,
}

impl UpdateApplicantRequest {
    pub(crate) fn into_patch(self) -> Result<ApplicantPatch, ApiError> {
        let mut errors = FieldErrors::default();
        let patch = ApplicantPatch {
            name: self.name,
            employment_status: errors.parsed::<EmploymentStatus>(
                "employment_status",
                self.employment_status,
                INVALID_EMPLOYMENT_STATUS,
            ),
            marital_status: errors.parsed::<MaritalStatus>(
                "marital_status",
                self.marital_status,
                INVALID_MARITAL_STATUS,
            ),
            sex: errors.parsed::<Sex>("sex", self.sex, INVALID_SEX),
            date_of_birth: errors.date("date_of_birth", self.date_of_birth),
        };
        errors.finish(patch)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LinkFamilyMemberRequest {
    pub(crate) member_id: Option<String>,
    pub(crate) relationship_type: Option<String>,
}

impl LinkFamilyMemberRequest {
    pub(crate) fn into_link(self) -> Result<(ApplicantId, RelationshipType), ApiError> {
        let mut errors = FieldErrors::default();
        let member_id = errors.required("member_id", self.member_id);
        let relationship_type = errors.required_parsed(
            "relationship_type",
            self.relationship_type,
            INVALID_RELATIONSHIP_TYPE,
        );

        match (member_id, relationship_type) {
            (Some(member_id), Some(relationship_type)) => {
                Ok((parse_id(&member_id, EntityKind::Applicant)?, relationship_type))
            }
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CreateSchemeRequest {
    pub(crate) name: Option<String>,
}

impl CreateSchemeRequest {
    pub(crate) fn into_new_scheme(self) -> Result<NewScheme, ApiError> {
        let mut errors = FieldErrors::default();
        match errors.required("name", self.name) {
            Some(name) => Ok(NewScheme { name }),
            None => Err(ApiError::Validation(errors)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateSchemeRequest {
    pub(crate) name: Option<String>,
}

impl UpdateSchemeRequest {
    pub(crate) fn into_patch(self) -> SchemePatch {
        SchemePatch { name: self.name }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddBenefitRequest {
    pub(crate) name: Option<String>,
    pub(crate) amount: Option<f64>,
}

impl AddBenefitRequest {
    pub(crate) fn into_new_benefit(self, scheme_id: SchemeId) -> Result<NewBenefit, ApiError> {
        let mut errors = FieldErrors::default();
        let name = errors.required("name", self.name);
        let amount = match self.amount {
            Some(amount) => errors.amount("amount", Some(amount)),
            None => {
                errors.push("amount", REQUIRED);
                None
            }
        };

        match (name, amount) {
            (Some(name), Some(amount)) => Ok(NewBenefit {
                scheme_id,
                name,
                amount,
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateBenefitRequest {
    pub(crate) name: Option<String>,
    pub(crate) amount: Option<f64>,
    pub(crate) scheme_id: Option<String>,
}

impl UpdateBenefitRequest {
    pub(crate) fn into_patch(self) -> Result<BenefitPatch, ApiError> {
        let mut errors = FieldErrors::default();
        let amount = errors.amount("amount", self.amount);
        errors.finish(())?;

        Ok(BenefitPatch {
            name: self.name,
            amount,
            scheme_id: parse_optional_id(self.scheme_id, EntityKind::Scheme)?,
        })
    }
}

/// Criteria name and value stay raw here; the service validates and normalizes them.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CriteriaRequest {
    pub(crate) name: Option<String>,
    pub(crate) value: Option<String>,
    pub(crate) scheme_id: Option<String>,
}

impl CriteriaRequest {
    pub(crate) fn target_scheme(&self) -> Result<Option<SchemeId>, ApiError> {
        parse_optional_id(self.scheme_id.clone(), EntityKind::Scheme)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CreateApplicationRequest {
    pub(crate) applicant_id: Option<String>,
    pub(crate) scheme_id: Option<String>,
}

impl CreateApplicationRequest {
    pub(crate) fn into_new_application(self) -> Result<NewApplication, ApiError> {
        let mut errors = FieldErrors::default();
        let applicant_id = errors.required("applicant_id", self.applicant_id);
        let scheme_id = errors.required("scheme_id", self.scheme_id);

        match (applicant_id, scheme_id) {
            (Some(applicant_id), Some(scheme_id)) => Ok(NewApplication {
                applicant_id: parse_id(&applicant_id, EntityKind::Applicant)?,
                scheme_id: parse_id(&scheme_id, EntityKind::Scheme)?,
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateApplicationRequest {
    pub(crate) applicant_id: Option<String>,
    pub(crate) scheme_id: Option<String>,
}

impl UpdateApplicationRequest {
    pub(crate) fn into_patch(self) -> Result<ApplicationPatch, ApiError> {
        Ok(ApplicationPatch {
            applicant_id: parse_optional_id(self.applicant_id, EntityKind::Applicant)?,
            scheme_id: parse_optional_id(self.scheme_id, EntityKind::Scheme)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EligibleSchemesQuery {
    pub(crate) applicant: Option<String>,
}

impl EligibleSchemesQuery {
    pub(crate) fn applicant_id(self) -> Result<ApplicantId, ApiError> {
        let mut errors = FieldErrors::default();
        match errors.required("applicant", self.applicant) {
            Some(raw) => parse_id(&raw, EntityKind::Applicant),
            None => Err(ApiError::Validation(errors)),
        }
    }
}
