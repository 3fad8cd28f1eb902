//! In-memory decode and encode on top of the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Format sniffing | `ImageReader::with_guessed_format` (magic bytes, not filename) |
//! | Decode (BMP, GIF, JPEG, PNG, TIFF, WebP) | `ImageReader::decode` with [`DecodeLimits`] |
//! | Color mode | `DynamicImage::color` → [`ColorMode`] |
//! | Grayscale | ITU-R 601-2 luma (PIL `convert("L")` weights), alpha dropped |
//! | Encode → PNG | `DynamicImage::write_to` with `ImageFormat::Png` |

use super::backend::ImageMetadata;
use super::color_mode::ColorMode;
use super::params::DecodeLimits;
use image::{ColorType, DynamicImage, GrayImage, ImageError, ImageFormat, ImageReader, Luma};
use std::io::Cursor;

/// Decode an image from raw bytes, sniffing the format from its header.
pub fn decode(bytes: &[u8], limits: DecodeLimits) -> Result<DynamicImage, ImageError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::IoError)?;
    reader.limits(limits.to_image_limits());
    reader.decode()
}

/// Width, height, and color mode of a decoded image.
pub fn inspect(img: &DynamicImage) -> ImageMetadata {
    ImageMetadata {
        width: img.width(),
        height: img.height(),
        color_mode: ColorMode::from(img.color()),
    }
}

/// Single luminance channel using ITU-R 601-2 weights in 16.16 fixed point:
/// `L = (19595 R + 38470 G + 7471 B + 0x8000) >> 16`.
///
/// `to_luma8` is only used for input that is already luma; for color it
/// would apply Rec. 709 weights instead.
pub fn rec601_luma(img: &DynamicImage) -> GrayImage {
    if matches!(
        img.color(),
        ColorType::L8 | ColorType::L16 | ColorType::La8 | ColorType::La16
    ) {
        return img.to_luma8();
    }
    let rgb = img.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let l = (u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000) >> 16;
        Luma([l as u8])
    })
}

/// Convert to a single luminance channel and encode as PNG.
///
/// The output is always `L8`, even for 16-bit or alpha-carrying input.
pub fn encode_grayscale_png(img: &DynamicImage) -> Result<Vec<u8>, ImageError> {
    let gray = DynamicImage::ImageLuma8(rec601_luma(img));
    let mut buf = Cursor::new(Vec::new());
    gray.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}
