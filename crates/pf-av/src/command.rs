//! Builder for executing external tool commands with in-memory I/O.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use bytes::Bytes;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output, unmodified.
    pub stdout: Vec<u8>,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

impl ToolOutput {
    /// Standard output decoded as lossy UTF-8.
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// A builder for constructing and executing external tool invocations.
///
/// # Example
///
/// ```no_run
/// use pf_av::ToolCommand;
/// use std::path::PathBuf;
///
/// # async fn example(png: bytes::Bytes) -> pf_core::Result<()> {
/// let output = ToolCommand::new(PathBuf::from("ffprobe"))
///     .args(["-v", "error", "-show_entries", "stream=codec_name"])
///     .args(["-of", "default=noprint_wrappers=1:nokey=1", "-i", "pipe:"])
///     .stdin(png)
///     .execute()
///     .await?;
/// println!("{}", output.stdout_lossy());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
    stdin_data: Option<Bytes>,
}

impl ToolCommand {
    /// Create a new command for the given program path. No timeout is set.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            timeout: None,
            stdin_data: None,
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Set the maximum execution time. `None` waits indefinitely.
    pub fn timeout(&mut self, d: Option<Duration>) -> &mut Self {
        self.timeout = d;
        self
    }

    /// Provide data to be written to the process's stdin.
    pub fn stdin(&mut self, data: Bytes) -> &mut Self {
        self.stdin_data = Some(data);
        self
    }

    /// The arguments collected so far.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// Stdin is fed from a separate task while output is drained, so a tool
    /// that starts writing before it has consumed all of its input cannot
    /// deadlock on a full pipe.
    ///
    /// # Errors
    ///
    /// Returns [`pf_core::Error::Transcode`] if spawning fails, if the
    /// process exits with a non-zero status (message is the trimmed stderr),
    /// or if the timeout expires. The child is killed on timeout; without a
    /// timeout it is left to run to completion even if the caller goes away.
    pub async fn execute(&self) -> pf_core::Result<ToolOutput> {
        let program_name = self
            .program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(if self.stdin_data.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(self.timeout.is_some());

        tracing::trace!("exec {} {}", program_name, self.args.join(" "));

        let mut child = cmd
            .spawn()
            .map_err(|e| pf_core::Error::transcode(&program_name, format!("failed to spawn: {e}")))?;

        let writer = match (self.stdin_data.clone(), child.stdin.take()) {
            (Some(data), Some(mut stdin)) => Some(tokio::spawn(async move {
                let result = stdin.write_all(&data).await;
                // Dropping stdin closes the pipe so the child sees EOF.
                drop(stdin);
                result
            })),
            _ => None,
        };

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_elapsed| {
                    pf_core::Error::transcode(&program_name, format!("timed out after {limit:?}"))
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(|e| {
            pf_core::Error::transcode(&program_name, format!("I/O error waiting for process: {e}"))
        })?;

        if let Some(handle) = writer {
            match handle.await {
                Ok(Ok(())) => {}
                // Probers may stop reading once they have seen enough.
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => tracing::debug!("{program_name}: failed to write stdin: {e}"),
                Err(e) => tracing::debug!("{program_name}: stdin writer task failed: {e}"),
            }
        }

        let tool_output = ToolOutput {
            status: output.status,
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !tool_output.status.success() {
            let stderr = tool_output.stderr.trim();
            let message = if stderr.is_empty() {
                format!("exited with status {}", tool_output.status)
            } else {
                format!("exited with status {}: {stderr}", tool_output.status)
            };
            return Err(pf_core::Error::transcode(program_name, message));
        }

        Ok(tool_output)
    }
}
