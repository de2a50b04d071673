//! JSON routes under `/api/seo`.

pub mod error;
mod handlers;
pub mod models;

use axum::{
    Router,
    routing::{get, post},
};

use super::HttpState;

pub fn build_api_router() -> Router<HttpState> {
    Router::new()
        .route(
            "/api/seo/meta/{page_type}",
            get(handlers::get_meta).post(handlers::post_meta),
        )
        .route(
            "/api/seo/meta/{page_type}/{page_id}",
            get(handlers::get_meta_for_page).post(handlers::post_meta_for_page),
        )
        .route(
            "/api/seo/structured-data/{page_type}",
            get(handlers::get_structured_data).post(handlers::post_structured_data),
        )
        .route(
            "/api/seo/structured-data/{page_type}/{page_id}",
            get(handlers::get_structured_data_for_page)
                .post(handlers::post_structured_data_for_page),
        )
        .route("/api/seo/analyze", post(handlers::analyze))
        .route(
            "/api/seo/config",
            get(handlers::list_configurations).post(handlers::create_configuration),
        )
        // `{key}` is a page type for reads and a configuration id for writes.
        .route(
            "/api/seo/config/{key}",
            get(handlers::get_configuration).put(handlers::update_configuration),
        )
}
