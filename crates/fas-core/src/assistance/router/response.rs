use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::assistance::repository::RepositoryError;
use crate::assistance::service::ServiceError;

pub(crate) const REQUIRED: &str = "This field is required";
pub(crate) const INVALID_DATE: &str = "Invalid date format, please use the YYYY-MM-DD format.";
pub(crate) const INVALID_MARITAL_STATUS: &str =
    "Invalid marital status, must be either single, married, widowed or divorced.";
pub(crate) const INVALID_SEX: &str = "Invalid sex, must be either male or female.";
pub(crate) const INVALID_RELATIONSHIP_TYPE: &str =
    "Invalid relationship type, must be either spouse, child, parent or sibling.";
pub(crate) const INVALID_EMPLOYMENT_STATUS: &str =
    "Invalid employment status, must be either employed or unemployed.";
pub(crate) const NEGATIVE_AMOUNT: &str = "Amount must not be negative.";

const NOT_ELIGIBLE: &str = "Applicant does not meet the eligibility criteria for the scheme.";
const INTERNAL: &str = "Internal Server Error";

/// Success envelope shared by every assistance endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct ApiResponse<T> {
    success: bool,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub(crate) fn ok(message: &'static str, data: T) -> Response {
        Self::with_status(StatusCode::OK, message, Some(data))
    }

    pub(crate) fn created(message: &'static str, data: T) -> Response {
        Self::with_status(StatusCode::CREATED, message, Some(data))
    }

    fn with_status(status: StatusCode, message: &'static str, data: Option<T>) -> Response {
        let body = ApiResponse {
            success: true,
            message,
            data,
        };
        (status, Json(body)).into_response()
    }
}

impl ApiResponse<()> {
    pub(crate) fn message(message: &'static str) -> Response {
        Self::with_status(StatusCode::OK, message, None)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<&'static str, &'static str>>,
}

/// Per-field request validation failures, keyed by JSON field name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    pub(crate) fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` when no field failed.
    pub(crate) fn finish<T>(self, value: T) -> Result<T, ApiError> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(ApiError::Validation(self))
        }
    }
}

/// Everything a handler can fail with, rendered into the error envelope.
#[derive(Debug)]
pub(crate) enum ApiError {
    Service(ServiceError),
    Validation(FieldErrors),
    MalformedBody(String),
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        ApiError::Service(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::MalformedBody(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        ApiError::MalformedBody(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                "Validation error".to_string(),
                Some(fields.0),
            ),
            ApiError::MalformedBody(detail) => (StatusCode::BAD_REQUEST, sentence(&detail), None),
            ApiError::Service(error) => {
                let (status, message) = service_error_status(&error);
                (status, message, None)
            }
        };

        let body = ErrorBody {
            success: false,
            message,
            errors,
        };
        (status, Json(body)).into_response()
    }
}

fn service_error_status(error: &ServiceError) -> (StatusCode, String) {
    match error {
        ServiceError::InvalidId(_)
        | ServiceError::Criteria(_)
        | ServiceError::NoUpdateFields
        | ServiceError::SelfRelationship => {
            (StatusCode::BAD_REQUEST, sentence(&error.to_string()))
        }
        ServiceError::SchemeNotEligible => (StatusCode::BAD_REQUEST, NOT_ELIGIBLE.to_string()),
        ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, sentence(&error.to_string())),
        ServiceError::Repository(RepositoryError::Conflict) => {
            (StatusCode::CONFLICT, sentence(&error.to_string()))
        }
        ServiceError::Repository(RepositoryError::Unavailable(detail)) => {
            error!(%detail, "repository failure while handling request");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string())
        }
    }
}

/// "applicant not found" becomes "Applicant not found."
fn sentence(raw: &str) -> String {
    let mut chars = raw.chars();
    let mut message = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => return String::new(),
    };
    if !message.ends_with('.') {
        message.push('.');
    }
    message
}
