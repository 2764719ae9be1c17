use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::request::{parse_id, CreateApplicationRequest, UpdateApplicationRequest};
use super::response::{ApiError, ApiResponse};
use crate::assistance::ids::ApplicationId;
use crate::assistance::repository::{
    ApplicantRepository, ApplicationRepository, SchemeRepository,
};
use crate::assistance::service::{ApplicationService, EntityKind};

type SharedApplications<P, A, S> = Arc<ApplicationService<P, A, S>>;

pub fn application_router<P, A, S>(service: SharedApplications<P, A, S>) -> Router
where
    P: ApplicationRepository + 'static,
    A: ApplicantRepository + 'static,
    S: SchemeRepository + 'static,
{
    Router::new()
        .route(
            "/api/applications",
            get(list_handler::<P, A, S>).post(create_handler::<P, A, S>),
        )
        .route(
            "/api/applications/:id",
            get(get_handler::<P, A, S>)
                .put(update_handler::<P, A, S>)
                .delete(delete_handler::<P, A, S>),
        )
        .with_state(service)
}

fn application_id(raw: &str) -> Result<ApplicationId, ApiError> {
    parse_id(raw, EntityKind::Application)
}

pub(crate) async fn list_handler<P, A, S>(
    State(service): State<SharedApplications<P, A, S>>,
) -> Result<Response, ApiError>
where
    P: ApplicationRepository + 'static,
    A: ApplicantRepository + 'static,
    S: SchemeRepository + 'static,
{
    let applications = service.list()?;
    Ok(ApiResponse::ok(
        "Successfully retrieved applications.",
        json!({ "applications": applications }),
    ))
}

pub(crate) async fn get_handler<P, A, S>(
    State(service): State<SharedApplications<P, A, S>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    P: ApplicationRepository + 'static,
    A: ApplicantRepository + 'static,
    S: SchemeRepository + 'static,
{
    let application = service.get(application_id(&id)?)?;
    Ok(ApiResponse::ok(
        "Successfully retrieved application.",
        application,
    ))
}

pub(crate) async fn create_handler<P, A, S>(
    State(service): State<SharedApplications<P, A, S>>,
    payload: Result<Json<CreateApplicationRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    P: ApplicationRepository + 'static,
    A: ApplicantRepository + 'static,
    S: SchemeRepository + 'static,
{
    let Json(request) = payload?;
    let application = service.create(request.into_new_application()?)?;
    Ok(ApiResponse::created(
        "Successfully created application.",
        application,
    ))
}

pub(crate) async fn update_handler<P, A, S>(
    State(service): State<SharedApplications<P, A, S>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateApplicationRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    P: ApplicationRepository + 'static,
    A: ApplicantRepository + 'static,
    S: SchemeRepository + 'static,
{
    let id = application_id(&id)?;
    let Json(request) = payload?;
    let application = service.update(id, request.into_patch()?)?;
    Ok(ApiResponse::ok(
        "Successfully updated application.",
        application,
    ))
}

pub(crate) async fn delete_handler<P, A, S>(
    State(service): State<SharedApplications<P, A, S>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    P: ApplicationRepository + 'static,
    A: ApplicantRepository + 'static,
    S: SchemeRepository + 'static,
{
    service.delete(application_id(&id)?)?;
    Ok(ApiResponse::message("Successfully deleted application."))
}
