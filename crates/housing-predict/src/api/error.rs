use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::task::JoinError;
use crate::inference::InferenceError;
use crate::schema::{ErrorDetail, ValidationErrors};

/// Everything that can end a request early
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body could not be read
    #[error(transparent)]
    Body(#[from] BytesRejection),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Model not loaded.")]
    ModelUnavailable,

    #[error("Prediction failed: {0}")]
    Inference(#[from] InferenceError),

    /// The inference task panicked or was cancelled
    #[error("Prediction failed: {0}")]
    Aborted(#[from] JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Inference(_) | ApiError::Aborted(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// `{"detail": ...}`, the body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody<T> {
    pub detail: T,
}

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        let body: ErrorBody<Vec<ErrorDetail>> = ErrorBody {
            detail: self.into_errors(),
        };
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Body(rejection) => rejection.into_response(),
            ApiError::Validation(errors) => errors.into_response(),
            other => {
                let body = ErrorBody {
                    detail: other.to_string(),
                };
                (other.status(), Json(body)).into_response()
            }
        }
    }
}
