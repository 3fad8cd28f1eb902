//! Pulls the `image` file out of a multipart body.

use super::error::PredictError;
use axum::body::Bytes;
use axum::extract::Multipart;

/// Multipart field carrying the upload.
pub const IMAGE_FIELD: &str = "image";

/// The uploaded file, alive for one request.
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Find the first file part named [`IMAGE_FIELD`] and read it fully.
///
/// A part only counts as a file when its Content-Disposition carries a
/// `filename` parameter; a plain form field called `image` is skipped.
pub async fn read_image_field(multipart: &mut Multipart) -> Result<Upload, PredictError> {
    while let Some(field) = multipart.next_field().await.map_err(PredictError::Upload)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        if file_name.is_empty() {
            return Err(PredictError::EmptyFilename);
        }
        let bytes = field.bytes().await.map_err(PredictError::Upload)?;
        return Ok(Upload { file_name, bytes });
    }
    Err(PredictError::MissingImage)
}
