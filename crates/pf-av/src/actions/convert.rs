//! PNG to JPEG conversion.

use bytes::Bytes;

use pf_core::{ImageFormat, Operation, Result};

use super::{probe_supported, Transformed};
use crate::backend::MediaTool;
use crate::options::TranscodeOptions;

/// Convert a PNG image to JPEG, keeping its dimensions.
///
/// Any input that does not probe as `png` is rejected with
/// [`pf_core::Error::UnsupportedFormat`].
pub async fn convert_png_to_jpeg(tool: &dyn MediaTool, input: Bytes) -> Result<Transformed> {
    probe_supported(tool, &input, Operation::Convert).await?;

    let options = TranscodeOptions::new().codec(&ImageFormat::Mjpeg);
    let data = tool.transcode(input, &options).await?;

    tracing::debug!("convert: png -> mjpeg, {} bytes", data.len());

    Ok(Transformed {
        data,
        format: ImageFormat::Mjpeg,
    })
}
