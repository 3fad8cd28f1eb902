//! Run an [`ImageHandler`] on a local file, without the HTTP server.
//!
//! Backs the `image-probe inspect` subcommand. Metadata results come back for
//! printing; grayscale PNGs are written to disk next to the input unless an
//! explicit output path is given.

use crate::imaging::{HandlerError, HandlerOutput, ImageHandler};
use crate::types::PredictionResult;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Handler {
        path: PathBuf,
        #[source]
        source: HandlerError,
    },
}

/// What inspecting one file produced.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectOutcome {
    Prediction(PredictionResult),
    WrotePng { path: PathBuf, bytes: usize },
}

pub fn inspect_file(
    handler: &dyn ImageHandler,
    input: &Path,
    output: Option<&Path>,
) -> Result<InspectOutcome, InspectError> {
    let bytes = std::fs::read(input).map_err(|source| InspectError::Io {
        path: input.to_path_buf(),
        source,
    })?;

    let result = handler
        .handle(&bytes)
        .map_err(|source| InspectError::Handler {
            path: input.to_path_buf(),
            source,
        })?;

    match result {
        HandlerOutput::Prediction(prediction) => Ok(InspectOutcome::Prediction(prediction)),
        HandlerOutput::Png(png) => {
            let path = output.map_or_else(|| default_gray_path(input), Path::to_path_buf);
            std::fs::write(&path, &png).map_err(|source| InspectError::Io {
                path: path.clone(),
                source,
            })?;
            Ok(InspectOutcome::WrotePng {
                path,
                bytes: png.len(),
            })
        }
    }
}

/// `photos/cat.jpg` → `photos/cat-gray.png`
pub fn default_gray_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{stem}-gray.png"))
}
