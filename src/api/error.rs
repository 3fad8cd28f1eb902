//! Everything `/predict` can fail with, and how each failure is rendered.
//!
//! | Variant | Status |
//! |---|---|
//! | [`PredictError::MissingImage`] | 400 |
//! | [`PredictError::EmptyFilename`] | 400 |
//! | [`PredictError::Handler`] (decode) | 422 |
//! | [`PredictError::Upload`] (body too large) | 413 |
//! | everything else | 500 |

use crate::imaging::HandlerError;
use crate::types::ApiError;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("No image file provided in the request.")]
    MissingImage,
    #[error("No selected image file.")]
    EmptyFilename,
    #[error("Failed to process image: {0}")]
    Upload(#[source] MultipartError),
    #[error("Failed to process image: {0}")]
    Handler(#[from] HandlerError),
    #[error("Failed to process image: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl PredictError {
    pub fn status(&self) -> StatusCode {
        match self {
            PredictError::MissingImage | PredictError::EmptyFilename => StatusCode::BAD_REQUEST,
            PredictError::Upload(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            PredictError::Handler(e) if e.is_client_error() => StatusCode::UNPROCESSABLE_ENTITY,
            PredictError::Upload(_) | PredictError::Handler(_) | PredictError::Worker(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self, "predict failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "predict rejected");
        }
        (status, Json(ApiError { error: self.to_string() })).into_response()
    }
}
