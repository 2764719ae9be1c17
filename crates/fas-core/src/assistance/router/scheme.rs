use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Response,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use super::request::{
    parse_id, AddBenefitRequest, CreateSchemeRequest, CriteriaRequest, EligibleSchemesQuery,
    UpdateBenefitRequest, UpdateSchemeRequest,
};
use super::response::{ApiError, ApiResponse};
use crate::assistance::domain::CriteriaPatch;
use crate::assistance::ids::{BenefitId, CriteriaId, SchemeId};
use crate::assistance::repository::{ApplicantRepository, SchemeRepository};
use crate::assistance::service::{EntityKind, SchemeService};

type SharedSchemes<S, A> = Arc<SchemeService<S, A>>;

pub fn scheme_router<S, A>(service: SharedSchemes<S, A>) -> Router
where
    S: SchemeRepository + 'static,
    A: ApplicantRepository + 'static,
{
    Router::new()
        .route(
            "/api/schemes",
            get(list_handler::<S, A>).post(create_handler::<S, A>),
        )
        .route("/api/schemes/eligible", get(eligible_handler::<S, A>))
        .route(
            "/api/schemes/:scheme_id",
            get(get_handler::<S, A>)
                .put(update_handler::<S, A>)
                .delete(delete_handler::<S, A>),
        )
        .route(
            "/api/schemes/:scheme_id/benefits",
            post(add_benefit_handler::<S, A>),
        )
        .route(
            "/api/schemes/:scheme_id/criteria",
            post(add_criteria_handler::<S, A>),
        )
        .route(
            "/api/schemes/benefits/:benefit_id",
            put(update_benefit_handler::<S, A>).delete(delete_benefit_handler::<S, A>),
        )
        .route(
            "/api/schemes/criteria/:criteria_id",
            put(update_criteria_handler::<S, A>).delete(delete_criteria_handler::<S, A>),
        )
        .with_state(service)
}

fn scheme_id(raw: &str) -> Result<SchemeId, ApiError> {
    parse_id(raw, EntityKind::Scheme)
}

pub(crate) async fn list_handler<S, A>(
    State(service): State<SharedSchemes<S, A>>,
) -> Result<Response, ApiError>
where
    S: SchemeRepository + 'static,
    A: ApplicantRepository + 'static,
{
    let schemes = service.list()?;
    Ok(ApiResponse::ok(
        "Successfully retrieved schemes.",
        json!({ "schemes": schemes }),
    ))
}

pub(crate) async fn eligible_handler<S, A>(
    State(service): State<SharedSchemes<S, A>>,
    query: Result<Query<EligibleSchemesQuery>, QueryRejection>,
) -> Result<Response, ApiError>
where
    S: SchemeRepository + 'static,
    A: ApplicantRepository + 'static,
{
    let Query(query) = query?;
    let schemes = service.list_applicant_available_schemes(query.applicant_id()?)?;
    Ok(ApiResponse::ok(
        "Successfully retrieved eligible schemes.",
        json!({ "schemes": schemes }),
    ))
}

pub(crate) async fn get_handler<S, A>(
    State(service): State<SharedSchemes<S, A>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    S: SchemeRepository + 'static,
    A: ApplicantRepository + 'static,
{
    let scheme = service.get(scheme_id(&id)?)?;
    Ok(ApiResponse::ok("Successfully retrieved scheme.", scheme))
}

pub(crate) async fn create_handler<S, A>(
    State(service): State<SharedSchemes<S, A>>,
    payload: Result<Json<CreateSchemeRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    S: SchemeRepository + 'static,
    A: ApplicantRepository + 'static,
{
    let Json(request) = payload?;
    let scheme = service.create(request.into_new_scheme()?)?;
    Ok(ApiResponse::created("Successfully created scheme.", scheme))
}

pub(crate) async fn update_handler<S, A>(
    State(service): State<SharedSchemes<S, A>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSchemeRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    S: SchemeRepository + 'static,
    A: ApplicantRepository + 'static,
{
    let id = scheme_id(&id)?;
    let Json(request) = payload?;
    let scheme = service.update(id, request.into_patch())?;
    Ok(ApiResponse::ok("Successfully updated scheme.", scheme))
}

pub(crate) async fn delete_handler<S, A>(
    State(service): State<SharedSchemes<S, A>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    S: SchemeRepository + 'static,
    A: ApplicantRepository + 'static,
{
    service.delete(scheme_id(&id)?)?;
    Ok(ApiResponse::message("Successfully deleted scheme."))
}

pub(crate) async fn add_benefit_handler<S, A>(
    State(service): State<SharedSchemes<S, A>>,
    Path(id): Path<String>,
    payload: Result<Json<AddBenefitRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    S: SchemeRepository + 'static,
    A: ApplicantRepository + 'static,
{
    let id = scheme_id(&id)?;
    let Json(request) = payload?;
    let benefit = service.add_benefit(request.into_new_benefit(id)?)?;
    Ok(ApiResponse::created(
        "Successfully added benefit to scheme.",
        benefit,
    ))
}

pub(crate) async fn update_benefit_handler<S, A>(
    State(service): State<SharedSchemes<S, A>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBenefitRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    S: SchemeRepository + 'static,
    A: ApplicantRepository + 'static,
{
    let id: BenefitId = parse_id(&id, EntityKind::Benefit)?;
    let Json(request) = payload?;
    let benefit = service.update_benefit(id, request.into_patch()?)?;
    Ok(ApiResponse::ok("Successfully updated benefit.", benefit))
}

pub(crate) async fn delete_benefit_handler<S, A>(
    State(service): State<SharedSchemes<S, A>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    S: SchemeRepository + 'static,
    A: ApplicantRepository + 'static,
{
    let id: BenefitId = parse_id(&id, EntityKind::Benefit)?;
    service.delete_benefit(id)?;
    Ok(ApiResponse::message("Successfully deleted benefit."))
}

pub(crate) async fn add_criteria_handler<S, A>(
    State(service): State<SharedSchemes<S, A>>,
    Path(id): Path<String>,
    payload: Result<Json<CriteriaRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    S: SchemeRepository + 'static,
    A: ApplicantRepository + 'static,
{
    let id = scheme_id(&id)?;
    let Json(request) = payload?;
    let criteria =
        service.add_criteria(id, request.name.as_deref(), request.value.as_deref())?;
    Ok(ApiResponse::created(
        "Successfully added criteria to scheme.",
        criteria,
    ))
}

pub(crate) async fn update_criteria_handler<S, A>(
    State(service): State<SharedSchemes<S, A>>,
    Path(id): Path<String>,
    payload: Result<Json<CriteriaRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    S: SchemeRepository + 'static,
    A: ApplicantRepository + 'static,
{
    let id: CriteriaId = parse_id(&id, EntityKind::Criteria)?;
    let Json(request) = payload?;
    let patch = CriteriaPatch {
        scheme_id: request.target_scheme()?,
        name: request.name,
        value: request.value,
    };
    let criteria = service.update_criteria(id, patch)?;
    Ok(ApiResponse::ok("Successfully updated criteria.", criteria))
}

pub(crate) async fn delete_criteria_handler<S, A>(
    State(service): State<SharedSchemes<S, A>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    S: SchemeRepository + 'static,
    A: ApplicantRepository + 'static,
{
    let id: CriteriaId = parse_id(&id, EntityKind::Criteria)?;
    service.delete_criteria(id)?;
    Ok(ApiResponse::message("Successfully deleted criteria."))
}
