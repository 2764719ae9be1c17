//! HTTP surface for applicants, schemes and applications.
//!
//! Responses share the `{success, message, data}` envelope; failures use
//! `{success: false, message, errors?}`.

mod applicant;
mod application;
mod request;
mod response;
mod scheme;

use std::sync::Arc;

use axum::Router;

pub use applicant::applicant_router;
pub use application::application_router;
pub use scheme::scheme_router;

use super::repository::{ApplicantRepository, ApplicationRepository, SchemeRepository};
use super::service::{ApplicantService, ApplicationService, SchemeService};

/// Merge the three resource routers into one.
pub fn assistance_router<A, S, P>(
    applicants: Arc<ApplicantService<A>>,
    schemes: Arc<SchemeService<S, A>>,
    applications: Arc<ApplicationService<P, A, S>>,
) -> Router
where
    A: ApplicantRepository + 'static,
    S: SchemeRepository + 'static,
    P: ApplicationRepository + 'static,
{
    applicant_router(applicants)
        .merge(scheme_router(schemes))
        .merge(application_router(applications))
}
