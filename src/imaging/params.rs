//! Parameter types for decoding.
//!
//! [`DecodeLimits`] describes how large an image the handlers agree to
//! decode. It is built from [`LimitsConfig`](crate::config::LimitsConfig)
//! at startup and copied into each handler.

/// Largest width or height accepted when no limit is configured.
pub const DEFAULT_MAX_DIMENSION: u32 = 16_384;

/// Upper bound on decoded width and height, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    max_dimension: u32,
}

impl DecodeLimits {
    /// `0` is rejected earlier by [`ServerConfig::validate`](crate::config::ServerConfig::validate).
    pub fn new(max_dimension: u32) -> Self {
        Self { max_dimension }
    }

    pub fn max_dimension(self) -> u32 {
        self.max_dimension
    }

    /// Translate into the codec's own limits type.
    pub fn to_image_limits(self) -> image::Limits {
        let mut limits = image::Limits::default();
        limits.max_image_width = Some(self.max_dimension);
        limits.max_image_height = Some(self.max_dimension);
        limits
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIMENSION)
    }
}
