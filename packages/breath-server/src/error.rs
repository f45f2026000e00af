use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use breath_filter::FilterError;
use serde::Serialize;

/// Request failures, reported to the caller as `{"error": "..."}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The payload or query could not be turned into a filter request
    #[error("{0}")]
    InvalidInput(String),
    /// The request body exceeded the configured size limit
    #[error("{0}")]
    PayloadTooLarge(String),
    /// Filtering failed on otherwise valid input
    #[error("{0}")]
    Processing(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        if err.is_input_error() {
            ApiError::InvalidInput(err.to_string())
        } else {
            ApiError::Processing(err.to_string())
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::InvalidInput(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
