use axum::{
    Router,
    body::Body,
    extract::State,
    http::{
        StatusCode,
        header::{CACHE_CONTROL, CONTENT_TYPE},
    },
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    application::error::HttpError,
    domain::types::SitemapKind,
};

use super::{
    HttpState, api, db_health_response,
    middleware::{log_responses, set_request_context},
};

const DOCUMENT_CACHE_CONTROL: &str = "public, max-age=86400, s-maxage=86400";

pub fn build_router(state: HttpState) -> Router {
    let documents = Router::new()
        .route("/sitemap.xml", get(sitemap_main))
        .route("/sitemap-services.xml", get(sitemap_services))
        .route("/sitemap-projects.xml", get(sitemap_projects))
        .route("/sitemap-images.xml", get(sitemap_images))
        .route("/robots.txt", get(robots_txt))
        .route("/_health/db", get(public_health));

    documents
        .merge(api::build_api_router())
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn sitemap_main(State(state): State<HttpState>) -> Response {
    sitemap(state, SitemapKind::Main).await
}

async fn sitemap_services(State(state): State<HttpState>) -> Response {
    sitemap(state, SitemapKind::Services).await
}

async fn sitemap_projects(State(state): State<HttpState>) -> Response {
    sitemap(state, SitemapKind::Projects).await
}

async fn sitemap_images(State(state): State<HttpState>) -> Response {
    sitemap(state, SitemapKind::Images).await
}

async fn sitemap(state: HttpState, kind: SitemapKind) -> Response {
    match state.sitemap.generate(kind).await {
        Ok(body) => document_response(body, "application/xml"),
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn robots_txt(State(state): State<HttpState>) -> Response {
    match state.robots.robots_txt().await {
        Ok(body) => document_response(body, "text/plain; charset=utf-8"),
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn public_health(State(state): State<HttpState>) -> Response {
    db_health_response(state.health.ping().await)
}

fn document_response(body: String, content_type: &str) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CACHE_CONTROL, DOCUMENT_CACHE_CONTROL)
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
