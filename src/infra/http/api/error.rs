use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::error::ErrorReport;
use crate::application::meta::MetaError;
use crate::application::repos::RepoError;
use crate::application::seo_config::SeoConfigError;

/// Envelope shared by every `/api/seo` response.
#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, None)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, None)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            Some(detail.into()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let report_detail = match self.detail.as_deref() {
            Some(detail) => format!("{}: {detail}", self.message),
            None => self.message.clone(),
        };
        let body = ApiEnvelope::<()> {
            success: false,
            data: None,
            error: Some(self.message),
        };
        let mut response = (self.status, Json(body)).into_response();
        ErrorReport::from_message("infra::http::api", self.status, report_detail)
            .attach(&mut response);
        response
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Invalid JSON body",
            Some(rejection.body_text()),
        )
    }
}

pub(crate) fn repo_to_api(err: RepoError) -> ApiError {
    match err {
        RepoError::Duplicate { constraint } => ApiError::new(
            StatusCode::CONFLICT,
            "Duplicate record",
            Some(constraint),
        ),
        RepoError::NotFound => ApiError::not_found("Resource not found"),
        RepoError::InvalidInput { message } => {
            ApiError::new(StatusCode::BAD_REQUEST, "Invalid input", Some(message))
        }
        RepoError::Timeout => ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Database timeout",
            None,
        ),
        RepoError::Persistence(message) => ApiError::internal(message),
    }
}

pub(crate) fn meta_to_api(err: MetaError) -> ApiError {
    match err {
        MetaError::Configuration(repo) => repo_to_api(repo),
        MetaError::Encode(err) => ApiError::internal(err.to_string()),
    }
}

pub(crate) fn seo_config_to_api(err: SeoConfigError) -> ApiError {
    match err {
        SeoConfigError::MissingPageType => ApiError::bad_request("pageType is required"),
        SeoConfigError::Repo(repo) => repo_to_api(repo),
    }
}
