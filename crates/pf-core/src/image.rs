//! Image domain types.
//!
//! The vocabulary here mirrors what the external transcoder reports: formats
//! are codec names (`mjpeg` for ordinary JPEG), dimensions come from the
//! first video stream, and compression levels are a UI-facing 1-5 scale that
//! gets re-mapped onto each codec's native quality axis.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Largest width or height accepted by a resize request.
pub const MAX_DIMENSION: u32 = 4096;

/// Formats that can be resized.
pub const RESIZE_FORMATS: &[ImageFormat] = &[
    ImageFormat::Mjpeg,
    ImageFormat::Png,
    ImageFormat::Webp,
    ImageFormat::Bmp,
];

/// Formats that can be compressed. Bitmap has no lossy quality parameter.
pub const COMPRESS_FORMATS: &[ImageFormat] =
    &[ImageFormat::Mjpeg, ImageFormat::Png, ImageFormat::Webp];

/// Formats accepted by the PNG to JPEG conversion.
pub const CONVERT_FORMATS: &[ImageFormat] = &[ImageFormat::Png];

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// The three image operations exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Convert,
    Resize,
    Compress,
}

impl Operation {
    /// Formats this operation accepts as input.
    pub fn allowed_formats(self) -> &'static [ImageFormat] {
        match self {
            Operation::Convert => CONVERT_FORMATS,
            Operation::Resize => RESIZE_FORMATS,
            Operation::Compress => COMPRESS_FORMATS,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Convert => "convert",
            Operation::Resize => "resize",
            Operation::Compress => "compress",
        })
    }
}

// ---------------------------------------------------------------------------
// ImageFormat
// ---------------------------------------------------------------------------

/// Canonical codec name of an image as reported by the prober.
///
/// Unknown codec names are kept verbatim in [`ImageFormat::Other`]; they are
/// unsupported by every operation but are not a probing failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Baseline JPEG, which ffmpeg names after its motion-JPEG codec.
    Mjpeg,
    Png,
    Webp,
    Bmp,
    Other(String),
}

impl ImageFormat {
    /// Parse a codec name. Never fails.
    pub fn from_codec_name(name: &str) -> Self {
        match name.trim() {
            "mjpeg" => ImageFormat::Mjpeg,
            "png" => ImageFormat::Png,
            "webp" => ImageFormat::Webp,
            "bmp" => ImageFormat::Bmp,
            other => ImageFormat::Other(other.to_string()),
        }
    }

    /// The codec name used both for probing results and encoder selection.
    pub fn codec_name(&self) -> &str {
        match self {
            ImageFormat::Mjpeg => "mjpeg",
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Other(name) => name,
        }
    }

    /// MIME type for a response carrying this format.
    pub fn mime_type(&self) -> String {
        match self {
            ImageFormat::Mjpeg => "image/jpeg".to_string(),
            other => format!("image/{}", other.codec_name()),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.codec_name())
    }
}

/// Membership test against an allow-list.
pub fn is_supported(format: &ImageFormat, allowed: &[ImageFormat]) -> bool {
    allowed.contains(format)
}

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

/// Width and height of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check that both sides are usable as a resize target.
    ///
    /// Width is checked before height so a request with both sides out of
    /// range always reports the width.
    pub fn validate_resize_target(&self) -> Result<()> {
        if !(1..=MAX_DIMENSION).contains(&self.width) {
            return Err(Error::InvalidDimensions(format!(
                "width must be between 1 and {MAX_DIMENSION}, got {}",
                self.width
            )));
        }
        if !(1..=MAX_DIMENSION).contains(&self.height) {
            return Err(Error::InvalidDimensions(format!(
                "height must be between 1 and {MAX_DIMENSION}, got {}",
                self.height
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// CompressionLevel
// ---------------------------------------------------------------------------

/// Compression level on the 1 (largest file) to 5 (smallest file) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(Error::InvalidCompressionLevel(level))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The encoder option and value expressing this level for `format`.
    ///
    /// - png: `compression_level` on 1-9 (zlib level)
    /// - webp: `compression_level` on 1-6 (encoder method)
    /// - mjpeg: `q` on 1-31, where a higher quantizer means a smaller file
    ///
    /// Returns `None` for formats without a compression axis.
    pub fn native_option(self, format: &ImageFormat) -> Option<(&'static str, f64)> {
        let (name, out_max) = match format {
            ImageFormat::Png => ("compression_level", 9.0),
            ImageFormat::Webp => ("compression_level", 6.0),
            ImageFormat::Mjpeg => ("q", 31.0),
            ImageFormat::Bmp | ImageFormat::Other(_) => return None,
        };
        let value = map_range(
            f64::from(self.0),
            f64::from(Self::MIN),
            f64::from(Self::MAX),
            1.0,
            out_max,
        );
        Some((name, value))
    }
}

/// Affine map of `x` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// `in_min == in_max` divides by zero.
pub fn map_range(x: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}
