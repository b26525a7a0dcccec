//! [`MediaTool`] implementation that shells out to `ffprobe` and `ffmpeg`.
//!
//! Images travel over pipes in both directions; nothing touches the
//! filesystem.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use pf_core::config::ToolsConfig;

use crate::backend::{MediaTool, ProbeEntries};
use crate::command::ToolCommand;
use crate::options::TranscodeOptions;
use crate::tools::ToolRegistry;

/// Single-image muxer used for every transcode.
const OUTPUT_CONTAINER: &str = "image2";

/// A media tool backed by the `ffmpeg` and `ffprobe` CLIs.
#[derive(Debug, Clone)]
pub struct FfmpegTool {
    ffmpeg_path: PathBuf,
    ffprobe_path: PathBuf,
    probe_timeout: Option<Duration>,
    transcode_timeout: Option<Duration>,
}

impl FfmpegTool {
    /// Create a tool using the given binaries and no timeouts.
    pub fn new(ffmpeg_path: PathBuf, ffprobe_path: PathBuf) -> Self {
        Self {
            ffmpeg_path,
            ffprobe_path,
            probe_timeout: None,
            transcode_timeout: None,
        }
    }

    /// Resolve both binaries from the registry and apply configured timeouts.
    pub fn from_registry(tools: &ToolRegistry, config: &ToolsConfig) -> pf_core::Result<Self> {
        let ffmpeg = tools.require("ffmpeg")?.to_path_buf();
        let ffprobe = tools.require("ffprobe")?.to_path_buf();
        Ok(Self::new(ffmpeg, ffprobe)
            .with_probe_timeout(config.probe_timeout())
            .with_transcode_timeout(config.transcode_timeout()))
    }

    /// Create a tool that finds both binaries on `PATH`.
    pub fn from_path() -> Option<Self> {
        let ffmpeg = which::which("ffmpeg").ok()?;
        let ffprobe = which::which("ffprobe").ok()?;
        Some(Self::new(ffmpeg, ffprobe))
    }

    pub fn with_probe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_transcode_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.transcode_timeout = timeout;
        self
    }

    fn probe_command(&self, input: Bytes, entries: ProbeEntries) -> ToolCommand {
        let mut cmd = ToolCommand::new(self.ffprobe_path.clone());
        cmd.args(["-v", "error"])
            .args(["-show_entries", entries.as_show_entries()])
            .args(["-of", "default=noprint_wrappers=1:nokey=1"])
            .args(["-i", "pipe:"])
            .timeout(self.probe_timeout)
            .stdin(input);
        cmd
    }

    fn transcode_command(&self, input: Bytes, options: &TranscodeOptions) -> ToolCommand {
        let mut cmd = ToolCommand::new(self.ffmpeg_path.clone());
        cmd.args(["-hide_banner", "-loglevel", "error"])
            .args(["-i", "pipe:"])
            .args(options.to_args())
            .args(["-f", OUTPUT_CONTAINER, "pipe:"])
            .timeout(self.transcode_timeout)
            .stdin(input);
        cmd
    }
}

#[async_trait]
impl MediaTool for FfmpegTool {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    async fn probe(&self, input: Bytes, entries: ProbeEntries) -> pf_core::Result<String> {
        let output = self
            .probe_command(input, entries)
            .execute()
            .await
            .map_err(|e| match e {
                pf_core::Error::Transcode { message, .. } => pf_core::Error::Probe(message),
                other => other,
            })?;
        Ok(output.stdout_lossy())
    }

    async fn transcode(&self, input: Bytes, options: &TranscodeOptions) -> pf_core::Result<Bytes> {
        let output = self.transcode_command(input, options).execute().await?;
        if output.stdout.is_empty() {
            return Err(pf_core::Error::transcode("ffmpeg", "produced no output"));
        }
        Ok(Bytes::from(output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::{Dimensions, ImageFormat};

    fn tool() -> FfmpegTool {
        FfmpegTool::new(PathBuf::from("ffmpeg"), PathBuf::from("ffprobe"))
    }

    #[test]
    fn probe_command_line() {
        let cmd = tool().probe_command(Bytes::new(), ProbeEntries::Size);
        assert_eq!(
            cmd.get_args(),
            [
                "-v",
                "error",
                "-show_entries",
                "stream=width,height",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
                "-i",
                "pipe:",
            ]
        );
    }

    #[test]
    fn transcode_command_line() {
        let options = TranscodeOptions::new()
            .codec(&ImageFormat::Mjpeg)
            .scale(Dimensions::new(64, 32))
            .set("q", 16.0);
        let cmd = tool().transcode_command(Bytes::new(), &options);
        assert_eq!(
            cmd.get_args(),
            [
                "-hide_banner",
                "-loglevel",
                "error",
                "-i",
                "pipe:",
                "-q",
                "16",
                "-vcodec",
                "mjpeg",
                "-vf",
                "scale=64:32",
                "-f",
                "image2",
                "pipe:",
            ]
        );
    }

    #[tokio::test]
    async fn missing_binary_maps_to_probe_error() {
        let tool = FfmpegTool::new(
            PathBuf::from("nonexistent_ffmpeg_xyz"),
            PathBuf::from("nonexistent_ffprobe_xyz"),
        );
        let err = tool
            .probe(Bytes::from_static(b"not an image"), ProbeEntries::CodecName)
            .await
            .unwrap_err();
        assert!(matches!(err, pf_core::Error::Probe(_)), "{err}");

        let err = tool
            .transcode(Bytes::from_static(b"x"), &TranscodeOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, pf_core::Error::Transcode { .. }), "{err}");
    }

    #[test]
    fn from_registry_requires_both_tools() {
        let registry =
            ToolRegistry::with_paths([("ffmpeg".to_string(), PathBuf::from("/usr/bin/ffmpeg"))]);
        let err = FfmpegTool::from_registry(&registry, &ToolsConfig::default()).unwrap_err();
        assert!(matches!(err, pf_core::Error::ToolNotFound(ref n) if n == "ffprobe"));
    }
}
