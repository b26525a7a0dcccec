//! Format and size probing over any [`MediaTool`].

use bytes::Bytes;

use pf_core::{Dimensions, Error, ImageFormat, Result};

use crate::backend::{MediaTool, ProbeEntries};

/// Probe the codec of the first stream in `input`.
///
/// Unknown codecs come back as [`ImageFormat::Other`]; deciding whether they
/// are acceptable is the caller's business.
pub async fn probe_format(tool: &dyn MediaTool, input: Bytes) -> Result<ImageFormat> {
    let text = tool.probe(input, ProbeEntries::CodecName).await?;
    let codec = fields(&text)
        .next()
        .ok_or_else(|| Error::Probe("no stream found".into()))?;
    Ok(ImageFormat::from_codec_name(codec))
}

/// Probe the width and height of the first stream in `input`.
pub async fn probe_size(tool: &dyn MediaTool, input: Bytes) -> Result<Dimensions> {
    let text = tool.probe(input, ProbeEntries::Size).await?;
    parse_size(&text)
}

fn parse_size(text: &str) -> Result<Dimensions> {
    let mut lines = fields(text);
    let width = parse_field(lines.next(), "width")?;
    let height = parse_field(lines.next(), "height")?;
    Ok(Dimensions::new(width, height))
}

fn parse_field(field: Option<&str>, name: &str) -> Result<u32> {
    let raw = field.ok_or_else(|| Error::Probe(format!("{name} missing from probe output")))?;
    raw.parse()
        .map_err(|e| Error::Probe(format!("invalid {name} {raw:?}: {e}")))
}

/// Non-empty lines of probe output, tolerant of CRLF.
fn fields(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}
