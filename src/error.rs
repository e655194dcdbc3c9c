//! Unified application error types
//!
//! Provides a single error type for the service layer, mapped onto HTTP
//! status codes and a serializable error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::dataset::DatasetError;
use crate::mining::MiningError;
use crate::session::SessionError;
use crate::transform::TransformError;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Encode/encrypt failure
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Dataset intake failure
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Mining dispatch failure
    #[error(transparent)]
    Mining(#[from] MiningError),

    /// Session lookup/insert failure
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Malformed request
    #[error("{0}")]
    BadRequest(String),
}

/// Serializable error response
///
/// Serialized as `{"error": message, "code": code}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client-side handling
    pub code: String,
    /// Human-readable error message
    #[serde(rename = "error")]
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ErrorResponse::from(self).serialize(serializer)
    }
}

impl AppError {
    /// Create a bad-request error
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transform(TransformError::Serialization(_)) => "SERIALIZATION_ERROR",
            Self::Transform(TransformError::Decryption(_)) => "DECRYPTION_ERROR",
            Self::Dataset(DatasetError::Empty) => "EMPTY_DATASET",
            Self::Mining(MiningError::InvalidAlgorithm(_)) => "INVALID_ALGORITHM",
            Self::Session(SessionError::NotFound(_)) => "NOT_FOUND",
            Self::Session(SessionError::IdSpaceExhausted { .. }) => "SESSION_ID_EXHAUSTED",
            Self::BadRequest(_) => "BAD_REQUEST",
        }
    }

    /// Matching HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Dataset(_) | Self::Mining(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Session(SessionError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        } else {
            tracing::debug!(code = self.code(), error = %self, "Request rejected");
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
