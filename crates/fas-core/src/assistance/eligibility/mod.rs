mod comparison;
mod rules;
mod validator;

pub use comparison::{compare_number, ComparisonError, ComparisonOperator, NumericCondition};
pub use rules::{calendar_age, evaluate_criterion, normalize, CriterionName};
pub use validator::{validate_criterion, CriteriaError, ValidCriterion};

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{Applicant, Family, Scheme};

/// Source of "today" for age-based criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationClock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl EvaluationClock {
    pub fn today(&self) -> NaiveDate {
        match self {
            EvaluationClock::System => Local::now().date_naive(),
            EvaluationClock::Fixed(date) => *date,
        }
    }
}

/// AND over every criterion of the scheme; a scheme without criteria admits everyone.
pub fn check_eligibility(
    scheme: &Scheme,
    applicant: &Applicant,
    family: &Family,
    current_year: i32,
) -> bool {
    scheme.criteria.iter().all(|criterion| {
        evaluate_criterion(
            &criterion.name,
            &criterion.value,
            applicant,
            family,
            current_year,
        )
    })
}

/// Stateless evaluator binding the pure checker to a clock.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    clock: EvaluationClock,
}

impl EligibilityEngine {
    pub fn new(clock: EvaluationClock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> EvaluationClock {
        self.clock
    }

    pub fn is_eligible(&self, scheme: &Scheme, applicant: &Applicant, family: &Family) -> bool {
        check_eligibility(scheme, applicant, family, self.clock.today().year())
    }

    /// Keep only the schemes the applicant currently qualifies for.
    pub fn available_schemes(
        &self,
        schemes: Vec<Scheme>,
        applicant: &Applicant,
        family: &Family,
    ) -> Vec<Scheme> {
        let current_year = self.clock.today().year();
        schemes
            .into_iter()
            .filter(|scheme| check_eligibility(scheme, applicant, family, current_year))
            .collect()
    }

    /// Evaluate every criterion without short-circuiting, for explanations.
    pub fn assess(
        &self,
        scheme: &Scheme,
        applicant: &Applicant,
        family: &Family,
    ) -> EligibilityAssessment {
        let current_year = self.clock.today().year();
        let outcomes: Vec<CriterionOutcome> = scheme
            .criteria
            .iter()
            .map(|criterion| CriterionOutcome {
                name: criterion.name.clone(),
                value: criterion.value.clone(),
                satisfied: evaluate_criterion(
                    &criterion.name,
                    &criterion.value,
                    applicant,
                    family,
                    current_year,
                ),
            })
            .collect();

        EligibilityAssessment {
            eligible: outcomes.iter().all(|outcome| outcome.satisfied),
            outcomes,
        }
    }
}

/// Result of one criterion within an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionOutcome {
    pub name: String,
    pub value: String,
    pub satisfied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    pub eligible: bool,
    pub outcomes: Vec<CriterionOutcome>,
}
