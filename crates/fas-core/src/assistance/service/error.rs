use std::fmt;

use crate::assistance::eligibility::CriteriaError;
use crate::assistance::repository::RepositoryError;

/// Entity a lookup or identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Applicant,
    Scheme,
    Benefit,
    Application,
    Criteria,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            EntityKind::Applicant => "applicant",
            EntityKind::Scheme => "scheme",
            EntityKind::Benefit => "benefit",
            EntityKind::Application => "application",
            EntityKind::Criteria => "scheme criteria",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed set of failures the assistance services report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid {0} id")]
    InvalidId(EntityKind),
    #[error("{0} not found")]
    NotFound(EntityKind),
    #[error(transparent)]
    Criteria(#[from] CriteriaError),
    #[error("no fields to update")]
    NoUpdateFields,
    #[error("scheme not eligible")]
    SchemeNotEligible,
    #[error("applicant cannot be linked to themselves")]
    SelfRelationship,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
