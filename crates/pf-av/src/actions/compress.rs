//! Lossy compression on a 1-5 scale.

use bytes::Bytes;

use pf_core::{CompressionLevel, Error, Operation, Result};

use super::{probe_supported, Transformed};
use crate::backend::MediaTool;
use crate::options::TranscodeOptions;

/// Re-encode `input` in its own format at compression `level`.
///
/// The format is checked before the level, so a bitmap is rejected as
/// unsupported whatever level was asked for.
pub async fn compress(tool: &dyn MediaTool, input: Bytes, level: u8) -> Result<Transformed> {
    let format = probe_supported(tool, &input, Operation::Compress).await?;
    let level = CompressionLevel::new(level)?;

    let (name, value) = level
        .native_option(&format)
        .ok_or_else(|| Error::unsupported(format.to_string(), Operation::Compress))?;

    let options = TranscodeOptions::new().set(name, value).codec(&format);
    let data = tool.transcode(input, &options).await?;

    tracing::debug!(
        "compress: {format} level {} ({name}={value}), {} bytes",
        level.get(),
        data.len()
    );

    Ok(Transformed { data, format })
}
