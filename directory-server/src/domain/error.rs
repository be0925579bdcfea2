use thiserror::Error;

use super::list_query::FieldErrors;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("invalid list query: {0}")]
    InvalidQuery(FieldErrors),

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
