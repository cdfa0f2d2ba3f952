use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::{SubmissionStatus, ERROR_BANNER};
use crate::services::intake::WorkflowError;
use crate::services::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed")]
    Validation(FieldErrors),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("booking acceptance error: {0}")]
    Acceptance(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Workflow(_) => StatusCode::CONFLICT,
            AppError::Acceptance(_) => StatusCode::BAD_GATEWAY,
        };

        let body = match self {
            AppError::Validation(errors) => serde_json::json!({
                "error": "validation failed",
                "errors": errors,
            }),
            // Every submission failure shows the same banner; the cause is
            // only logged.
            AppError::Acceptance(_) => serde_json::json!({
                "error": ERROR_BANNER,
                "status": SubmissionStatus::Error,
            }),
            other => serde_json::json!({ "error": other.to_string() }),
        };
        (status, axum::Json(body)).into_response()
    }
}
