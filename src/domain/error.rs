use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("sitemap priority `{value}` must lie within 0.0..=1.0")]
    PriorityOutOfRange { value: f64 },
    #[error("sitemap entry url must not be empty")]
    EmptyUrl,
    #[error("domain validation failed: {message}")]
    Validation { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
