//! # pf-av
//!
//! External tool management, probing and image operations for pixforge.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache paths to
//!   ffmpeg and ffprobe.
//! - **Command execution** ([`ToolCommand`]) -- async builder that pipes an
//!   in-memory buffer through an external process.
//! - **The tool boundary** ([`MediaTool`]) -- probe and transcode operations
//!   over byte buffers, implemented by [`FfmpegTool`].
//! - **Probing** ([`probe_format`], [`probe_size`]) -- codec and dimensions
//!   of an image.
//! - **Operations** ([`actions`]) -- PNG to JPEG conversion, resizing and
//!   compression.

pub mod actions;
pub mod backend;
pub mod command;
#[cfg(any(test, feature = "test-util"))]
pub mod fake;
pub mod ffmpeg;
pub mod options;
pub mod probe;
pub mod tools;

// ---- Re-exports for convenience ----

pub use backend::{MediaTool, ProbeEntries};
pub use command::{ToolCommand, ToolOutput};
pub use ffmpeg::FfmpegTool;
pub use options::{OptionValue, TranscodeOptions};
pub use probe::{probe_format, probe_size};
pub use tools::{ToolInfo, ToolRegistry};

// Operations
pub use actions::{compress, convert_png_to_jpeg, resize, Transformed};
