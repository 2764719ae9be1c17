//! End-to-end eligibility scenarios through the public services and HTTP router.
//!
//! The reference date is pinned so calendar ages stay stable across runs.

mod common {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use fas_core::assistance::{
        ApplicantService, ApplicationService, EligibilityEngine, EmploymentStatus,
        EvaluationClock, InMemoryStore, MaritalStatus, NewApplicant, SchemeService, Sex,
    };

    pub(super) const YEAR: i32 = 2024;

    pub(super) type Applicants = ApplicantService<InMemoryStore>;
    pub(super) type Schemes = SchemeService<InMemoryStore, InMemoryStore>;
    pub(super) type Applications = ApplicationService<InMemoryStore, InMemoryStore, InMemoryStore>;

    pub(super) fn services() -> (Arc<Applicants>, Arc<Schemes>, Arc<Applications>) {
        let store = Arc::new(InMemoryStore::new());
        let today = NaiveDate::from_ymd_opt(YEAR, 3, 15).expect("valid date");
        let engine = EligibilityEngine::new(EvaluationClock::Fixed(today));

        (
            Arc::new(ApplicantService::new(store.clone())),
            Arc::new(SchemeService::new(store.clone(), store.clone(), engine.clone())),
            Arc::new(ApplicationService::new(
                store.clone(),
                store.clone(),
                store,
                engine,
            )),
        )
    }

    pub(super) fn person(name: &str, employment_status: EmploymentStatus, age: i32) -> NewApplicant {
        NewApplicant {
            name: name.to_string(),
            employment_status,
            marital_status: MaritalStatus::Married,
            sex: Sex::Male,
            date_of_birth: NaiveDate::from_ymd_opt(YEAR - age, 7, 1).expect("valid date"),
        }
    }
}

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use fas_core::assistance::{
    assistance_router, EmploymentStatus, EntityKind, NewApplication, NewScheme, ServiceError,
};

use common::*;

#[test]
fn unemployed_seniors_scheme_admits_only_qualifying_applicants() {
    let (applicants, schemes, applications) = services();

    let scheme = schemes
        .create(NewScheme {
            name: "Senior Jobseeker Support".to_string(),
        })
        .expect("scheme created");
    schemes
        .add_criteria(scheme.id, Some("employment_status"), Some("unemployed"))
        .expect("employment criterion");
    schemes
        .add_criteria(scheme.id, Some("age"), Some(">=60"))
        .expect("age criterion");

    let a = applicants
        .create(person("A", EmploymentStatus::Unemployed, 65))
        .expect("A created");
    let b = applicants
        .create(person("B", EmploymentStatus::Employed, 65))
        .expect("B created");
    let c = applicants
        .create(person("C", EmploymentStatus::Unemployed, 50))
        .expect("C created");

    let available_to = |id| {
        schemes
            .list_applicant_available_schemes(id)
            .expect("query succeeds")
            .len()
    };
    assert_eq!(available_to(a.id), 1);
    assert_eq!(available_to(b.id), 0);
    assert_eq!(available_to(c.id), 0);

    applications
        .create(NewApplication {
            applicant_id: a.id,
            scheme_id: scheme.id,
        })
        .expect("A qualifies");
    for ineligible in [b.id, c.id] {
        assert_eq!(
            applications.create(NewApplication {
                applicant_id: ineligible,
                scheme_id: scheme.id,
            }),
            Err(ServiceError::SchemeNotEligible)
        );
    }
    assert_eq!(applications.list().expect("list succeeds").len(), 1);
}

#[test]
fn deleted_applicant_cannot_apply() {
    let (applicants, schemes, applications) = services();
    let open = schemes
        .create(NewScheme {
            name: "Open".to_string(),
        })
        .expect("scheme created");
    let gone = applicants
        .create(person("Gone", EmploymentStatus::Employed, 30))
        .expect("created");
    applicants.delete(gone.id).expect("deleted");

    assert_eq!(
        applications.create(NewApplication {
            applicant_id: gone.id,
            scheme_id: open.id,
        }),
        Err(ServiceError::NotFound(EntityKind::Applicant))
    );
}

async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("route executes");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&body).expect("json payload"))
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn http_flow_from_scheme_setup_to_application() {
    let (applicants, schemes, applications) = services();
    let router = assistance_router(applicants, schemes, applications);

    let (status, scheme) = send(
        &router,
        post("/api/schemes", json!({ "name": "Retrenchment Assistance" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let scheme_id = scheme["data"]["id"].as_str().expect("scheme id").to_string();

    let (status, _) = send(
        &router,
        post(
            &format!("/api/schemes/{scheme_id}/criteria"),
            json!({ "name": "Employment_Status", "value": "Unemployed" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, applicant) = send(
        &router,
        post(
            "/api/applicants",
            json!({
                "name": "James",
                "employment_status": "unemployed",
                "sex": "male",
                "date_of_birth": "1990-07-01",
                "marital_status": "single"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let applicant_id = applicant["data"]["id"]
        .as_str()
        .expect("applicant id")
        .to_string();

    let (status, eligible) = send(
        &router,
        Request::get(format!("/api/schemes/eligible?applicant={applicant_id}"))
            .body(Body::empty())
            .expect("request builds"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(eligible["data"]["schemes"][0]["id"], json!(scheme_id));

    let (status, application) = send(
        &router,
        post(
            "/api/applications",
            json!({ "applicant_id": applicant_id, "scheme_id": scheme_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        application["message"],
        json!("Successfully created application.")
    );
}
