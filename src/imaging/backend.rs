//! Image handler trait and shared types.
//!
//! The [`ImageHandler`] trait is the single capability the HTTP layer depends
//! on: given the raw bytes of an upload, produce a [`HandlerOutput`] or fail
//! with a [`HandlerError`]. Which implementation runs is a deployment choice
//! made in [`config`](crate::config); the endpoint never knows the difference.
//!
//! The production implementations live in [`handlers`](super::handlers):
//! [`MetadataHandler`](super::handlers::MetadataHandler) and
//! [`GrayscaleHandler`](super::handlers::GrayscaleHandler).

use super::color_mode::ColorMode;
use crate::types::PredictionResult;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandlerError {
    /// The upload is not a decodable image (corrupt, unsupported, or over limits).
    #[error("{0}")]
    Decode(#[source] image::ImageError),
    #[error("PNG encode failed: {0}")]
    Encode(#[source] image::ImageError),
}

impl HandlerError {
    /// True when the failure is caused by the uploaded bytes themselves.
    pub fn is_client_error(&self) -> bool {
        matches!(self, HandlerError::Decode(_))
    }
}

/// Read-only summary of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub color_mode: ColorMode,
}

impl ImageMetadata {
    /// Formatted as `"<width>x<height>"`.
    pub fn size_label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// What a handler hands back to the endpoint layer.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutput {
    /// Serialized as the JSON response body.
    Prediction(PredictionResult),
    /// Written as the response body with `Content-Type: image/png`.
    Png(Vec<u8>),
}

/// Given image bytes, produce a result or fail.
///
/// Implementations are shared across requests behind an `Arc`, so they must
/// be `Send + Sync` and hold no per-request state.
pub trait ImageHandler: Send + Sync {
    /// Short name used in logs and the `handler.mode` config key.
    fn name(&self) -> &'static str;

    /// Process one uploaded image.
    fn handle(&self, bytes: &[u8]) -> Result<HandlerOutput, HandlerError>;
}
