//! Color mode classification.
//!
//! Pure functions mapping a decoded pixel layout to one of four coarse
//! [`ColorMode`] labels, and a color mode to the placeholder "prediction"
//! text. No decoding happens here, which keeps every branch unit testable.

use image::ColorType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse channel layout of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// Single luminance channel.
    Monochrome,
    /// Three color channels.
    ColorNoAlpha,
    /// Three color channels plus alpha.
    ColorWithAlpha,
    /// Anything else (luminance plus alpha, future layouts).
    Other,
}

impl ColorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Monochrome => "monochrome",
            ColorMode::ColorNoAlpha => "color-no-alpha",
            ColorMode::ColorWithAlpha => "color-with-alpha",
            ColorMode::Other => "other",
        }
    }

    /// Human-readable label reported as the placeholder prediction.
    pub fn prediction(self) -> &'static str {
        match self {
            ColorMode::Monochrome => "Grayscale Image Detected",
            ColorMode::ColorNoAlpha | ColorMode::ColorWithAlpha => "Color Image Detected",
            ColorMode::Other => "Unknown Image Type",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ColorType> for ColorMode {
    fn from(color: ColorType) -> Self {
        match color {
            ColorType::L8 | ColorType::L16 => ColorMode::Monochrome,
            ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => ColorMode::ColorNoAlpha,
            ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => {
                ColorMode::ColorWithAlpha
            }
            // La8, La16, and whatever the non-exhaustive enum grows next
            _ => ColorMode::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_layouts_are_monochrome() {
        assert_eq!(ColorMode::from(ColorType::L8), ColorMode::Monochrome);
        assert_eq!(ColorMode::from(ColorType::L16), ColorMode::Monochrome);
    }

    #[test]
    fn rgb_layouts_are_color_without_alpha() {
        for color in [ColorType::Rgb8, ColorType::Rgb16, ColorType::Rgb32F] {
            assert_eq!(ColorMode::from(color), ColorMode::ColorNoAlpha);
        }
    }

    #[test]
    fn rgba_layouts_are_color_with_alpha() {
        for color in [ColorType::Rgba8, ColorType::Rgba16, ColorType::Rgba32F] {
            assert_eq!(ColorMode::from(color), ColorMode::ColorWithAlpha);
        }
    }

    #[test]
    fn luma_alpha_is_other() {
        assert_eq!(ColorMode::from(ColorType::La8), ColorMode::Other);
        assert_eq!(ColorMode::from(ColorType::La16), ColorMode::Other);
    }

    #[test]
    fn prediction_labels() {
        assert_eq!(
            ColorMode::Monochrome.prediction(),
            "Grayscale Image Detected"
        );
        assert_eq!(ColorMode::ColorNoAlpha.prediction(), "Color Image Detected");
        assert_eq!(
            ColorMode::ColorWithAlpha.prediction(),
            "Color Image Detected"
        );
        assert_eq!(ColorMode::Other.prediction(), "Unknown Image Type");
    }

    #[test]
    fn serde_uses_kebab_case_labels() {
        let json = serde_json::to_string(&ColorMode::ColorWithAlpha).unwrap();
        assert_eq!(json, "\"color-with-alpha\"");
        assert_eq!(ColorMode::ColorNoAlpha.to_string(), "color-no-alpha");
    }
}
