//! The [`MediaTool`] trait: the capability boundary to whatever actually
//! decodes and encodes pixels.

use async_trait::async_trait;
use bytes::Bytes;

use crate::options::TranscodeOptions;

/// Entries to extract when probing.
///
/// Rendered in ffprobe's `-show_entries` syntax, but any backend can
/// interpret them: the answer is one field value per line, in the order
/// listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeEntries {
    /// The first stream's codec name.
    CodecName,
    /// The first stream's width, then height.
    Size,
}

impl ProbeEntries {
    pub fn as_show_entries(self) -> &'static str {
        match self {
            ProbeEntries::CodecName => "stream=codec_name",
            ProbeEntries::Size => "stream=width,height",
        }
    }
}

/// A media tool capable of probing and transcoding in-memory images.
///
/// Implementations must be safe to share across threads (`Send + Sync`).
#[async_trait]
pub trait MediaTool: Send + Sync {
    /// Human-readable name identifying this implementation.
    fn name(&self) -> &'static str;

    /// Probe `input` and return the requested fields as newline-delimited
    /// text.
    ///
    /// # Errors
    ///
    /// [`pf_core::Error::Probe`] if the input cannot be decoded or the tool
    /// fails.
    async fn probe(&self, input: Bytes, entries: ProbeEntries) -> pf_core::Result<String>;

    /// Transcode `input` into a single image using `options`.
    ///
    /// # Errors
    ///
    /// [`pf_core::Error::Transcode`] if the tool cannot be started or fails.
    async fn transcode(&self, input: Bytes, options: &TranscodeOptions) -> pf_core::Result<Bytes>;
}
