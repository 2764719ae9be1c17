mod applicant;
mod application;
mod error;
mod scheme;

pub use applicant::ApplicantService;
pub use application::ApplicationService;
pub use error::{EntityKind, ServiceError};
pub use scheme::SchemeService;
