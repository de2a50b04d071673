use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    application::{robots::RobotsError, sitemap::SitemapError},
    infra::error::InfraError,
};

/// Error chain attached to a response so the logging middleware can report it.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub status: StatusCode,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, status: StatusCode, error: &dyn StdError) -> Self {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self {
            source,
            status,
            messages,
        }
    }

    pub fn from_message(
        source: &'static str,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source,
            status,
            messages: vec![message.into()],
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

/// Plain-text failure for the sitemap and robots documents.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    public_message: &'static str,
    report: ErrorReport,
}

impl HttpError {
    pub fn from_error(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        error: &dyn StdError,
    ) -> Self {
        Self {
            status,
            public_message,
            report: ErrorReport::from_error(source, status, error),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.public_message).into_response();
        self.report.attach(&mut response);
        response
    }
}

impl From<SitemapError> for HttpError {
    fn from(error: SitemapError) -> Self {
        HttpError::from_error(
            "infra::http::sitemap_error_to_http_error",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            &error,
        )
    }
}

impl From<RobotsError> for HttpError {
    fn from(error: RobotsError) -> Self {
        HttpError::from_error(
            "infra::http::robots_error_to_http_error",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            &error,
        )
    }
}

/// Failure of a command-line run; printed by `main` before exiting.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Sitemap(#[from] SitemapError),
    #[error(transparent)]
    Robots(#[from] RobotsError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::repos::RepoError;

    #[test]
    fn report_collects_source_chain() {
        let error = SitemapError::Services(RepoError::Timeout);
        let report = ErrorReport::from_error("test", StatusCode::INTERNAL_SERVER_ERROR, &error);
        assert_eq!(
            report.messages,
            vec![
                "failed to list services".to_string(),
                "database timeout".to_string()
            ]
        );
    }

    #[test]
    fn sitemap_failures_are_internal_errors() {
        let response =
            HttpError::from(SitemapError::Projects(RepoError::NotFound)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.messages.len(), 2);
    }

    #[test]
    fn app_error_keeps_the_underlying_chain() {
        let error = AppError::from(SitemapError::Services(RepoError::Timeout));
        assert_eq!(error.to_string(), "failed to list services");
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("database timeout")
        );

        let error = AppError::from(InfraError::database("down"));
        assert!(matches!(error, AppError::Infra(InfraError::Database { .. })));
    }
}
