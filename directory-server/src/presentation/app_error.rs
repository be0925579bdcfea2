use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Domain(DomainError::InvalidQuery(errors)) => {
                warn!(%errors, "list query rejected");
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response();
            }
            // Entity invariants only fail on stored rows.
            AppError::Domain(
                err @ (DomainError::Validation { .. } | DomainError::Unexpected(_)),
            ) => {
                error!(error = %err, "unexpected domain error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
            AppError::BadRequest(msg) => {
                warn!(error = %msg, "query string rejected");
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
        };

        (status, Json(ErrorBody { error: msg })).into_response()
    }
}
