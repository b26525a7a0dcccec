//! Output-side transcoding options.

use std::collections::BTreeMap;
use std::fmt;

use pf_core::{Dimensions, ImageFormat};

/// A single option value, rendered as the tool's command-line argument.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Text(s) => f.write_str(s),
            // f64's Display drops a zero fraction: 3.0 renders as "3".
            OptionValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        OptionValue::Number(n)
    }
}

/// Mapping of option name to value applied to the transcoder's output.
///
/// Keys are kept sorted so the rendered command line is deterministic. The
/// container is not part of the mapping: the transcoder always writes a
/// single-image container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscodeOptions {
    entries: BTreeMap<String, OptionValue>,
}

impl TranscodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary option, replacing any previous value.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    /// Select the output codec.
    pub fn codec(self, format: &ImageFormat) -> Self {
        self.set("vcodec", format.codec_name())
    }

    /// Scale to exactly `size`, ignoring the source aspect ratio.
    pub fn scale(self, size: Dimensions) -> Self {
        self.set("vf", format!("scale={}:{}", size.width, size.height))
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries.get(name)
    }

    /// Render as `-name value` argument pairs.
    pub fn to_args(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|(name, value)| [format!("-{name}"), value.to_string()])
            .collect()
    }
}
