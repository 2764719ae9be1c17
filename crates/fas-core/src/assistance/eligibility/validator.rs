use super::comparison::NumericCondition;
use super::rules::{normalize, CriterionName};
use crate::assistance::domain::{EmploymentStatus, MaritalStatus};

/// Write-time validation failures for scheme criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    #[error("empty scheme criteria")]
    Empty,
    #[error("invalid scheme criteria name")]
    InvalidName,
    #[error("invalid scheme criteria age value")]
    InvalidAgeValue,
    #[error("invalid scheme criteria employment status value")]
    InvalidEmploymentStatusValue,
    #[error("invalid scheme criteria marital status value")]
    InvalidMaritalStatusValue,
    #[error("invalid scheme criteria has children value")]
    InvalidHasChildrenValue,
}

/// A criterion that passed validation, in normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCriterion {
    pub name: CriterionName,
    pub value: String,
}

/// Check that a criterion name is recognised and its value fits the name's grammar.
///
/// Blank strings count as absent.
pub fn validate_criterion(
    name: Option<&str>,
    value: Option<&str>,
) -> Result<ValidCriterion, CriteriaError> {
    fn present(raw: Option<&str>) -> Option<&str> {
        raw.filter(|raw| !raw.trim().is_empty())
    }

    let (Some(name), Some(value)) = (present(name), present(value)) else {
        return Err(CriteriaError::Empty);
    };

    let name = normalize(name)
        .parse::<CriterionName>()
        .map_err(|_| CriteriaError::InvalidName)?;
    let value = normalize(value);

    match name {
        CriterionName::EmploymentStatus => {
            value
                .parse::<EmploymentStatus>()
                .map_err(|_| CriteriaError::InvalidEmploymentStatusValue)?;
        }
        CriterionName::MaritalStatus => {
            value
                .parse::<MaritalStatus>()
                .map_err(|_| CriteriaError::InvalidMaritalStatusValue)?;
        }
        CriterionName::HasChildren => {
            if value != "true" && value != "false" {
                return Err(CriteriaError::InvalidHasChildrenValue);
            }
        }
        CriterionName::Age => {
            value
                .parse::<NumericCondition>()
                .map_err(|_| CriteriaError::InvalidAgeValue)?;
        }
    }

    Ok(ValidCriterion { name, value })
}
