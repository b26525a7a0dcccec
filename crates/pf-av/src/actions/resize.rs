//! Resizing to an exact width and height.

use bytes::Bytes;

use pf_core::{Dimensions, Operation, Result};

use super::{probe_supported, Transformed};
use crate::backend::MediaTool;
use crate::options::TranscodeOptions;

/// Resize `input` to exactly `target`, keeping its format.
///
/// The target is validated before anything is probed. The aspect ratio is
/// not preserved: a target with a different ratio stretches the image.
pub async fn resize(tool: &dyn MediaTool, input: Bytes, target: Dimensions) -> Result<Transformed> {
    target.validate_resize_target()?;

    let format = probe_supported(tool, &input, Operation::Resize).await?;

    let options = TranscodeOptions::new().scale(target).codec(&format);
    let data = tool.transcode(input, &options).await?;

    tracing::debug!("resize: {format} -> {target}, {} bytes", data.len());

    Ok(Transformed { data, format })
}
