//! Response bodies shared between the handlers, the HTTP layer, and the CLI.

use crate::imaging::{ColorMode, ImageMetadata};
use serde::{Deserialize, Serialize};

/// Fixed disclaimer attached to every prediction.
pub const PROTOTYPE_DISCLAIMER: &str =
    "This is a prototype prediction. Replace with a real ML model!";

/// JSON body returned by the metadata handler.
///
/// ```json
/// {
///   "prediction": "Color Image Detected",
///   "image_size": "640x480",
///   "image_mode": "color-no-alpha",
///   "message": "This is a prototype prediction. Replace with a real ML model!"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: String,
    /// `"<width>x<height>"`
    pub image_size: String,
    pub image_mode: ColorMode,
    pub message: String,
}

impl PredictionResult {
    pub fn from_metadata(meta: &ImageMetadata) -> Self {
        Self {
            prediction: meta.color_mode.prediction().to_string(),
            image_size: meta.size_label(),
            image_mode: meta.color_mode,
            message: PROTOTYPE_DISCLAIMER.to_string(),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}
