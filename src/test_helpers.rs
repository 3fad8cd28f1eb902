//! Shared test utilities for the image-probe test suite.
//!
//! Provides synthetic image fixtures, a multipart body builder, and response
//! readers for driving the router in-process with `tower::ServiceExt::oneshot`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let body = MultipartBuilder::new().file("image", "a.png", &png_bytes(8, 8, ColorType::L8));
//! let resp = app.oneshot(post_multipart(body)).await.unwrap();
//! let json = body_json(resp).await;
//! ```

use axum::body::{Body, Bytes};
use axum::http::{Request, header};
use axum::response::Response;
use http_body_util::BodyExt;
use image::{ColorType, DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, RgbImage};
use std::io::Cursor;

// =========================================================================
// Image fixtures
// =========================================================================

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

/// Encode a gradient of the given size as PNG in the requested layout.
///
/// Panics for layouts the PNG encoder can't write.
pub fn png_bytes(width: u32, height: u32, color: ColorType) -> Vec<u8> {
    let rgb = gradient(width, height);
    let img = match color {
        ColorType::L8 => DynamicImage::ImageLuma8(rgb.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(rgb.to_luma_alpha8()),
        ColorType::Rgb8 => rgb,
        ColorType::Rgba8 => DynamicImage::ImageRgba8(rgb.to_rgba8()),
        ColorType::L16 => DynamicImage::ImageLuma16(rgb.to_luma16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(rgb.to_rgb16()),
        other => panic!("no PNG fixture for {other:?}"),
    };
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Encode an RGB gradient of the given size as JPEG.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = gradient(width, height).to_rgb8();
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut buf)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

// =========================================================================
// Requests
// =========================================================================

pub const BOUNDARY: &str = "image-probe-test-boundary";

/// Builds a `multipart/form-data` body part by part.
#[derive(Default)]
pub struct MultipartBuilder {
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A file part (Content-Disposition carries `filename`).
    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// A plain form field (no `filename`).
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{name}\"\r\n\r\n\
                 {value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_multipart(parts: MultipartBuilder) -> Request<Body> {
    post_multipart_raw(parts.finish())
}

/// POST `/predict` with a hand-written body under the [`BOUNDARY`] header.
pub fn post_multipart_raw(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

// =========================================================================
// Responses
// =========================================================================

pub async fn body_bytes(resp: Response) -> Bytes {
    resp.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}
