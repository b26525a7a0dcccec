//! A scriptable [`MediaTool`] for tests that must not spawn processes.
//!
//! [`FakeTool`] answers probes from fixed values and records every call so
//! tests can assert on validation order and on the exact options an
//! operation produced.

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;

use pf_core::{Dimensions, Error, Result};

use crate::backend::{MediaTool, ProbeEntries};
use crate::options::TranscodeOptions;

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum FakeCall {
    Probe(ProbeEntries),
    Transcode {
        input: Bytes,
        options: TranscodeOptions,
    },
}

/// A fake media tool.
///
/// By default probes report the configured codec and a 1000x1000 size, and
/// transcodes echo the input back.
#[derive(Debug)]
pub struct FakeTool {
    codec: Option<String>,
    size: Dimensions,
    output: Option<Bytes>,
    transcode_error: Option<String>,
    calls: Mutex<Vec<FakeCall>>,
}

impl FakeTool {
    /// A tool whose probes report `codec`.
    pub fn new(codec: &str) -> Self {
        Self {
            codec: Some(codec.to_string()),
            size: Dimensions::new(1000, 1000),
            output: None,
            transcode_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A tool that cannot make sense of any input.
    pub fn unprobeable() -> Self {
        Self {
            codec: None,
            ..Self::new("")
        }
    }

    pub fn with_size(mut self, size: Dimensions) -> Self {
        self.size = size;
        self
    }

    /// Return `output` from every transcode instead of echoing the input.
    pub fn with_output(mut self, output: Bytes) -> Self {
        self.output = Some(output);
        self
    }

    /// Make every transcode fail with `message`.
    pub fn failing_transcode(mut self, message: &str) -> Self {
        self.transcode_error = Some(message.to_string());
        self
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().clone()
    }

    /// Options of every transcode made so far.
    pub fn transcode_options(&self) -> Vec<TranscodeOptions> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                FakeCall::Transcode { options, .. } => Some(options.clone()),
                FakeCall::Probe(_) => None,
            })
            .collect()
    }

    /// Inputs of every transcode made so far.
    pub fn transcode_inputs(&self) -> Vec<Bytes> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                FakeCall::Transcode { input, .. } => Some(input.clone()),
                FakeCall::Probe(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl MediaTool for FakeTool {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn probe(&self, _input: Bytes, entries: ProbeEntries) -> Result<String> {
        self.calls.lock().push(FakeCall::Probe(entries));
        let codec = self
            .codec
            .as_deref()
            .ok_or_else(|| Error::Probe("Invalid data found when processing input".into()))?;
        Ok(match entries {
            ProbeEntries::CodecName => format!("{codec}\n"),
            ProbeEntries::Size => format!("{}\n{}\n", self.size.width, self.size.height),
        })
    }

    async fn transcode(&self, input: Bytes, options: &TranscodeOptions) -> Result<Bytes> {
        self.calls.lock().push(FakeCall::Transcode {
            input: input.clone(),
            options: options.clone(),
        });
        if let Some(ref message) = self.transcode_error {
            return Err(Error::transcode("fake", message.clone()));
        }
        Ok(self.output.clone().unwrap_or(input))
    }
}
