use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header::CACHE_CONTROL},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::application::repos::SeoConfigurationParams;
use crate::domain::meta::MetaOverrides;
use crate::domain::types::PageType;
use crate::infra::http::HttpState;

use super::error::{ApiEnvelope, ApiError, meta_to_api, seo_config_to_api};
use super::models::{AnalyzeRequest, PageIdQuery, StructuredDataRequest};

const API_CACHE_CONTROL: &str = "public, max-age=3600";

fn cached_json<T: Serialize>(data: T) -> Response {
    let mut response = Json(ApiEnvelope::ok(data)).into_response();
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static(API_CACHE_CONTROL));
    response
}

fn json<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(ApiEnvelope::ok(data))).into_response()
}

/// Optional JSON body: an empty body means "no input".
fn optional_body<T: DeserializeOwned>(body: &Bytes) -> Result<Option<T>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body).map(Some).map_err(|err| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "Invalid JSON body",
            Some(err.to_string()),
        )
    })
}

async fn resolve_meta(
    state: &HttpState,
    page_type: &str,
    page_id: Option<&str>,
    overrides: MetaOverrides,
) -> Response {
    let page_type = PageType::parse(page_type);
    match state.meta.resolve(&page_type, page_id, overrides).await {
        Ok(bundle) => cached_json(bundle),
        Err(err) => meta_to_api(err).into_response(),
    }
}

pub async fn get_meta(State(state): State<HttpState>, Path(page_type): Path<String>) -> Response {
    resolve_meta(&state, &page_type, None, MetaOverrides::default()).await
}

pub async fn get_meta_for_page(
    State(state): State<HttpState>,
    Path((page_type, page_id)): Path<(String, String)>,
) -> Response {
    resolve_meta(&state, &page_type, Some(&page_id), MetaOverrides::default()).await
}

pub async fn post_meta(
    State(state): State<HttpState>,
    Path(page_type): Path<String>,
    body: Bytes,
) -> Response {
    match optional_body::<MetaOverrides>(&body) {
        Ok(overrides) => {
            resolve_meta(&state, &page_type, None, overrides.unwrap_or_default()).await
        }
        Err(err) => err.into_response(),
    }
}

pub async fn post_meta_for_page(
    State(state): State<HttpState>,
    Path((page_type, page_id)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    match optional_body::<MetaOverrides>(&body) {
        Ok(overrides) => {
            resolve_meta(&state, &page_type, Some(&page_id), overrides.unwrap_or_default()).await
        }
        Err(err) => err.into_response(),
    }
}

fn compose_structured_data(
    state: &HttpState,
    page_type: &str,
    page_id: Option<&str>,
    body: &Bytes,
) -> Response {
    let request = match optional_body::<StructuredDataRequest>(body) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };
    let data = request.and_then(StructuredDataRequest::into_page_data);
    let page_type = PageType::parse(page_type);
    cached_json(
        state
            .structured_data
            .compose(&page_type, page_id, data.as_ref()),
    )
}

pub async fn get_structured_data(
    State(state): State<HttpState>,
    Path(page_type): Path<String>,
) -> Response {
    compose_structured_data(&state, &page_type, None, &Bytes::new())
}

pub async fn get_structured_data_for_page(
    State(state): State<HttpState>,
    Path((page_type, page_id)): Path<(String, String)>,
) -> Response {
    compose_structured_data(&state, &page_type, Some(&page_id), &Bytes::new())
}

pub async fn post_structured_data(
    State(state): State<HttpState>,
    Path(page_type): Path<String>,
    body: Bytes,
) -> Response {
    compose_structured_data(&state, &page_type, None, &body)
}

pub async fn post_structured_data_for_page(
    State(state): State<HttpState>,
    Path((page_type, page_id)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    compose_structured_data(&state, &page_type, Some(&page_id), &body)
}

pub async fn analyze(State(state): State<HttpState>, body: Bytes) -> Response {
    let request = match optional_body::<Value>(&body) {
        Ok(value) => value
            .map(|value| AnalyzeRequest::from_value(&value))
            .unwrap_or_default(),
        Err(err) => return err.into_response(),
    };
    let (Some(url), Some(content)) = (request.url, request.content) else {
        return ApiError::bad_request("URL and content are required").into_response();
    };

    json(StatusCode::OK, state.analyzer.analyze(&url, &content))
}

pub async fn list_configurations(State(state): State<HttpState>) -> Response {
    match state.seo_config.list().await {
        Ok(records) => json(StatusCode::OK, records),
        Err(err) => seo_config_to_api(err).into_response(),
    }
}

pub async fn get_configuration(
    State(state): State<HttpState>,
    Path(page_type): Path<String>,
    Query(query): Query<PageIdQuery>,
) -> Response {
    let page_type = PageType::parse(&page_type);
    let page_id = query.page_id.as_deref().filter(|id| !id.trim().is_empty());
    match state.seo_config.find(&page_type, page_id).await {
        Ok(Some(record)) => json(StatusCode::OK, record),
        Ok(None) => ApiError::not_found("SEO configuration not found").into_response(),
        Err(err) => seo_config_to_api(err).into_response(),
    }
}

pub async fn create_configuration(
    State(state): State<HttpState>,
    payload: Result<Json<SeoConfigurationParams>, JsonRejection>,
) -> Response {
    let Json(params) = match payload {
        Ok(payload) => payload,
        Err(err) => return ApiError::from(err).into_response(),
    };
    match state.seo_config.create(params).await {
        Ok(record) => json(StatusCode::CREATED, record),
        Err(err) => seo_config_to_api(err).into_response(),
    }
}

pub async fn update_configuration(
    State(state): State<HttpState>,
    Path(id): Path<String>,
    payload: Result<Json<SeoConfigurationParams>, JsonRejection>,
) -> Response {
    let Ok(id) = Uuid::parse_str(&id) else {
        return ApiError::bad_request("Invalid configuration id").into_response();
    };
    let Json(params) = match payload {
        Ok(payload) => payload,
        Err(err) => return ApiError::from(err).into_response(),
    };
    match state.seo_config.update(id, params).await {
        Ok(record) => json(StatusCode::OK, record),
        Err(err) => seo_config_to_api(err).into_response(),
    }
}
