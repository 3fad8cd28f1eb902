//! Image handling — decode, inspect, convert, all in memory.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` with format sniffing and [`DecodeLimits`] |
//! | **Inspect** | width, height, [`ColorMode`] from the decoded layout |
//! | **Grayscale → PNG** | `to_luma8` + PNG encoder |
//!
//! The module is split into:
//! - **Color mode**: Pure classification of pixel layouts (unit testable)
//! - **Parameters**: Decode limits
//! - **Backend**: [`ImageHandler`] trait, [`HandlerOutput`], [`HandlerError`]
//! - **Codec**: Thin wrappers over the `image` crate
//! - **Handlers**: [`MetadataHandler`] and [`GrayscaleHandler`]

pub mod backend;
pub mod codec;
mod color_mode;
pub mod handlers;
mod params;

pub use backend::{HandlerError, HandlerOutput, ImageHandler, ImageMetadata};
pub use color_mode::ColorMode;
pub use handlers::{GrayscaleHandler, MetadataHandler, handler_for};
pub use params::{DEFAULT_MAX_DIMENSION, DecodeLimits};
