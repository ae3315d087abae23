use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ExtendedColorType, ImageEncoder};

use super::calculations::fit_within;
use crate::error::{HeadshotError, Result};
use crate::models::{NormalizedImage, JPEG_MIME_TYPE};

pub const DEFAULT_MAX_DIMENSION: u32 = 1024;

/// Browsers and form libraries are sloppy about padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// JPEG quality (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Removes a leading `data:image/<subtype>;base64,` header, if any.
pub fn strip_data_uri_prefix(payload: &str) -> &str {
    let Some(rest) = payload.strip_prefix("data:image/") else {
        return payload;
    };
    let Some((subtype, data)) = rest.split_once(";base64,") else {
        return payload;
    };

    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    if !subtype.is_empty() && subtype.chars().all(is_word) {
        data
    } else {
        payload
    }
}

/// Decodes a data URI or bare base64 string into raw image bytes.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>> {
    let cleaned: String = strip_data_uri_prefix(payload.trim())
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(HeadshotError::InvalidImage("image data is empty".into()));
    }

    LENIENT
        .decode(cleaned.as_bytes())
        .map_err(|e| HeadshotError::InvalidImage(format!("invalid base64: {}", e)))
}

/// Turns arbitrary uploads into a bounded JPEG.
#[derive(Debug, Clone, Copy)]
pub struct ImagePreprocessor {
    max_dimension: u32,
    quality: Quality,
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            quality: Quality::default(),
        }
    }
}

impl ImagePreprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension.max(1);
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn process_payload(&self, payload: &str) -> Result<NormalizedImage> {
        let bytes = decode_payload(payload)?;
        self.process(&bytes)
    }

    pub fn process(&self, bytes: &[u8]) -> Result<NormalizedImage> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| HeadshotError::InvalidImage(format!("failed to decode image: {}", e)))?;

        let source = (img.width(), img.height());
        let (width, height) = fit_within(source, self.max_dimension);
        let img = if (width, height) != source {
            log::debug!(
                "Resizing upload from {}x{} to {}x{}",
                source.0,
                source.1,
                width,
                height
            );
            img.resize_exact(width, height, FilterType::Lanczos3)
        } else {
            img
        };

        // JPEG has no alpha channel.
        let rgb = img.to_rgb8();
        let mut encoded = Vec::new();
        JpegEncoder::new_with_quality(&mut encoded, self.quality.value())
            .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
            .map_err(|e| HeadshotError::Unexpected(format!("failed to encode JPEG: {}", e)))?;

        Ok(NormalizedImage {
            base64: STANDARD.encode(&encoded),
            bytes: encoded,
            width,
            height,
            mime_type: JPEG_MIME_TYPE,
        })
    }
}
