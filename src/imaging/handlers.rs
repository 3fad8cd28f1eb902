//! The two production [`ImageHandler`]s.
//!
//! These combine codec calls into a complete bytes-in, result-out operation.
//! Exactly one of them is wired into the router per deployment; see
//! [`handler_for`].

use super::backend::{HandlerError, HandlerOutput, ImageHandler};
use super::codec;
use super::params::DecodeLimits;
use crate::config::HandlerMode;
use crate::types::PredictionResult;
use std::sync::Arc;

/// Inspects the upload and reports its size and color mode as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataHandler {
    limits: DecodeLimits,
}

impl MetadataHandler {
    pub fn new(limits: DecodeLimits) -> Self {
        Self { limits }
    }
}

impl ImageHandler for MetadataHandler {
    fn name(&self) -> &'static str {
        HandlerMode::Metadata.as_str()
    }

    fn handle(&self, bytes: &[u8]) -> Result<HandlerOutput, HandlerError> {
        let img = codec::decode(bytes, self.limits).map_err(HandlerError::Decode)?;
        let meta = codec::inspect(&img);
        Ok(HandlerOutput::Prediction(PredictionResult::from_metadata(
            &meta,
        )))
    }
}

/// Returns the upload re-encoded as a single-channel PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrayscaleHandler {
    limits: DecodeLimits,
}

impl GrayscaleHandler {
    pub fn new(limits: DecodeLimits) -> Self {
        Self { limits }
    }
}

impl ImageHandler for GrayscaleHandler {
    fn name(&self) -> &'static str {
        HandlerMode::Grayscale.as_str()
    }

    fn handle(&self, bytes: &[u8]) -> Result<HandlerOutput, HandlerError> {
        let img = codec::decode(bytes, self.limits).map_err(HandlerError::Decode)?;
        let png = codec::encode_grayscale_png(&img).map_err(HandlerError::Encode)?;
        Ok(HandlerOutput::Png(png))
    }
}

/// Build the handler selected by configuration.
pub fn handler_for(mode: HandlerMode, limits: DecodeLimits) -> Arc<dyn ImageHandler> {
    match mode {
        HandlerMode::Metadata => Arc::new(MetadataHandler::new(limits)),
        HandlerMode::Grayscale => Arc::new(GrayscaleHandler::new(limits)),
    }
}
