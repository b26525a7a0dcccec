//! Image operations: PNG to JPEG conversion, resizing, and compression.
//!
//! Each operation is a straight validate-then-transform pipeline over an
//! immutable input buffer. The buffer is cloned (a reference-count bump) for
//! the probe and again for the transcode, so there is no read cursor to
//! rewind between the two.

mod compress;
mod convert;
mod resize;

pub use compress::compress;
pub use convert::convert_png_to_jpeg;
pub use resize::resize;

use bytes::Bytes;

use pf_core::{is_supported, Error, ImageFormat, Operation, Result};

use crate::backend::MediaTool;
use crate::probe::probe_format;

/// Output of an image operation.
#[derive(Debug, Clone)]
pub struct Transformed {
    /// Encoded image bytes.
    pub data: Bytes,
    /// Format of `data`.
    pub format: ImageFormat,
}

impl Transformed {
    /// MIME type for `data`, with `mjpeg` reported as `image/jpeg`.
    pub fn content_type(&self) -> String {
        self.format.mime_type()
    }
}

/// Probe `input` and check the result against `operation`'s allow-list.
async fn probe_supported(
    tool: &dyn MediaTool,
    input: &Bytes,
    operation: Operation,
) -> Result<ImageFormat> {
    let format = probe_format(tool, input.clone()).await?;
    if !is_supported(&format, operation.allowed_formats()) {
        tracing::debug!("{operation}: rejecting {format}");
        return Err(Error::unsupported(format.to_string(), operation));
    }
    Ok(format)
}
