use chrono::Datelike;
use strum::{AsRefStr, Display, EnumString};
use tracing::debug;

use super::comparison::compare_number;
use crate::assistance::domain::{Applicant, Family, RelationshipType};

/// Fixed vocabulary of criterion names a scheme may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum CriterionName {
    EmploymentStatus,
    MaritalStatus,
    HasChildren,
    Age,
}

/// Lower-case and trim a criterion name or value before dispatch.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Age as calendar-year difference, ignoring whether the birthday has passed yet.
pub fn calendar_age(applicant: &Applicant, current_year: i32) -> Option<i64> {
    applicant
        .date_of_birth
        .map(|date_of_birth| i64::from(current_year) - i64::from(date_of_birth.year()))
}

/// Evaluate one criterion against an applicant and their family.
///
/// Unknown names are vacuously satisfied; they cannot pass write-time validation.
pub fn evaluate_criterion(
    name: &str,
    value: &str,
    applicant: &Applicant,
    family: &Family,
    current_year: i32,
) -> bool {
    let value = normalize(value);
    let Ok(name) = normalize(name).parse::<CriterionName>() else {
        return true;
    };

    let satisfied = match name {
        CriterionName::EmploymentStatus => value == applicant.employment_status.to_string(),
        CriterionName::MaritalStatus => value == applicant.marital_status.to_string(),
        // "false" is not checked against the family; only "true" can fail.
        CriterionName::HasChildren => value != "true" || family.has(RelationshipType::Child),
        CriterionName::Age => match calendar_age(applicant, current_year) {
            Some(age) => compare_number(&value, age).unwrap_or(false),
            None => false,
        },
    };

    if !satisfied {
        debug!(
            applicant_id = %applicant.id,
            criterion = %name,
            %value,
            "criterion not satisfied"
        );
    }

    satisfied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criterion_names_parse_from_snake_case() {
        assert_eq!(
            "employment_status".parse::<CriterionName>(),
            Ok(CriterionName::EmploymentStatus)
        );
        assert_eq!("age".parse::<CriterionName>(), Ok(CriterionName::Age));
        assert!("favorite_color".parse::<CriterionName>().is_err());
        assert!("Age".parse::<CriterionName>().is_err());
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Has_Children \t"), "has_children");
        assert_eq!(normalize(">= 18 "), ">= 18");
    }
}
