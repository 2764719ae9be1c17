use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::request::{
    parse_id, CreateApplicantRequest, LinkFamilyMemberRequest, UpdateApplicantRequest,
};
use super::response::{ApiError, ApiResponse};
use crate::assistance::ids::ApplicantId;
use crate::assistance::repository::ApplicantRepository;
use crate::assistance::service::{ApplicantService, EntityKind};

pub fn applicant_router<A>(service: Arc<ApplicantService<A>>) -> Router
where
    A: ApplicantRepository + 'static,
{
    Router::new()
        .route(
            "/api/applicants",
            get(list_handler::<A>).post(create_handler::<A>),
        )
        .route(
            "/api/applicants/:id",
            get(get_handler::<A>)
                .put(update_handler::<A>)
                .delete(delete_handler::<A>),
        )
        .route(
            "/api/applicants/:id/family",
            get(family_handler::<A>).post(link_family_handler::<A>),
        )
        .with_state(service)
}

fn applicant_id(raw: &str) -> Result<ApplicantId, ApiError> {
    parse_id(raw, EntityKind::Applicant)
}

pub(crate) async fn list_handler<A>(
    State(service): State<Arc<ApplicantService<A>>>,
) -> Result<Response, ApiError>
where
    A: ApplicantRepository + 'static,
{
    let applicants = service.list()?;
    Ok(ApiResponse::ok(
        "Successfully retrieved applicants.",
        json!({ "applicants": applicants }),
    ))
}

pub(crate) async fn get_handler<A>(
    State(service): State<Arc<ApplicantService<A>>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    A: ApplicantRepository + 'static,
{
    let applicant = service.get(applicant_id(&id)?)?;
    Ok(ApiResponse::ok("Successfully retrieved applicant.", applicant))
}

pub(crate) async fn create_handler<A>(
    State(service): State<Arc<ApplicantService<A>>>,
    payload: Result<Json<CreateApplicantRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    A: ApplicantRepository + 'static,
{
    let Json(request) = payload?;
    let applicant = service.create(request.into_new_applicant()?)?;
    Ok(ApiResponse::created("Successfully created applicant.", applicant))
}

pub(crate) async fn update_handler<A>(
    State(service): State<Arc<ApplicantService<A>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateApplicantRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    A: ApplicantRepository + 'static,
{
    let id = applicant_id(&id)?;
    let Json(request) = payload?;
    let applicant = service.update(id, request.into_patch()?)?;
    Ok(ApiResponse::ok("Successfully updated applicant.", applicant))
}

pub(crate) async fn delete_handler<A>(
    State(service): State<Arc<ApplicantService<A>>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    A: ApplicantRepository + 'static,
{
    service.delete(applicant_id(&id)?)?;
    Ok(ApiResponse::message("Successfully deleted applicant."))
}

pub(crate) async fn family_handler<A>(
    State(service): State<Arc<ApplicantService<A>>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    A: ApplicantRepository + 'static,
{
    let family = service.family(applicant_id(&id)?)?;
    Ok(ApiResponse::ok("Successfully retrieved family.", family))
}

pub(crate) async fn link_family_handler<A>(
    State(service): State<Arc<ApplicantService<A>>>,
    Path(id): Path<String>,
    payload: Result<Json<LinkFamilyMemberRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    A: ApplicantRepository + 'static,
{
    let id = applicant_id(&id)?;
    let Json(request) = payload?;
    let (member_id, relationship_type) = request.into_link()?;
    let relationship = service.link_family_member(id, member_id, relationship_type)?;
    Ok(ApiResponse::created(
        "Successfully added family member.",
        relationship,
    ))
}
