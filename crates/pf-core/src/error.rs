//! Unified error type for pixforge.
//!
//! Every crate funnels its failures into [`Error`], which carries enough
//! context for the HTTP layer to derive a status code via
//! [`Error::http_status`].

use crate::image::Operation;

/// Unified error type covering all failure modes in pixforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request parameters were malformed or missing.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The external tool could not determine format or dimensions.
    #[error("Can't probe file, make sure the file is a valid image: {0}")]
    Probe(String),

    /// The probed format is not accepted by the requested operation.
    #[error("File format {format} is not supported by {operation}")]
    UnsupportedFormat {
        /// Codec name reported by the prober.
        format: String,
        /// The operation that rejected it.
        operation: Operation,
    },

    /// Requested width or height is outside `[1, MAX_DIMENSION]`.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Requested compression level is outside `[1, 5]`.
    #[error("Compression level must be 1 <= level <= 5, got {0}")]
    InvalidCompressionLevel(u8),

    /// The external tool failed while transforming the image.
    #[error("Error while transcoding [{tool}]: {message}")]
    Transcode {
        /// Name of the tool that failed.
        tool: String,
        /// Diagnostic output or spawn failure description.
        message: String,
    },

    /// A required external tool was not found.
    #[error("{0} not found; is it installed and in PATH?")]
    ToolNotFound(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The configuration could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Map this error to an HTTP status code.
    ///
    /// Everything that can happen while serving an image request is reported
    /// as 400, including tool failures: a crashing transcoder is not
    /// distinguished from bad input.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Validation(_)
            | Error::Probe(_)
            | Error::UnsupportedFormat { .. }
            | Error::InvalidDimensions(_)
            | Error::InvalidCompressionLevel(_)
            | Error::Transcode { .. } => 400,
            Error::ToolNotFound(_) | Error::Io { .. } | Error::Config(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::Transcode`].
    pub fn transcode(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Transcode {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::UnsupportedFormat`].
    pub fn unsupported(format: impl Into<String>, operation: Operation) -> Self {
        Error::UnsupportedFormat {
            format: format.into(),
            operation,
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
