//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use stockstudy_core::error::{DataError, IndicatorError};
use thiserror::Error;
use tracing::{error, warn};

/// Errors a request can end in.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or out-of-range request input
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// The provider returned a series the engine refuses to enrich
    #[error("Malformed price series: {0}")]
    Unprocessable(#[from] IndicatorError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::SymbolNotFound(_) => ApiError::NotFound(err.to_string()),
            DataError::InvalidRange { .. } => ApiError::BadRequest(err.to_string()),
            DataError::ParseError(_) | DataError::Io(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
