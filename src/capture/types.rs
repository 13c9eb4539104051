//! Error taxonomy and reply codes for screenshot capture.

use thiserror::Error;

/// Reply code for a capture command that ran and exited non-zero.
pub const CODE_CAPTURE_FAILED: &str = "CAPTURE_FAILED";
/// Reply code for a capture command that could not be started at all.
pub const CODE_LAUNCH_FAILED: &str = "LAUNCH_FAILED";
/// Reply code for a capture command that exceeded the bounded wait.
pub const CODE_CAPTURE_TIMEOUT: &str = "CAPTURE_TIMEOUT";

/// Errors that can occur while capturing a screenshot.
///
/// Each variant maps to one reply code; `CommandFailed` keeps the historical
/// message expected by existing hosts.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The screenshot command ran and exited with a non-zero status.
    #[error("Failed to capture screenshot")]
    CommandFailed { exit_code: Option<i32> },

    /// The screenshot command could not be launched (missing binary,
    /// permission denied).
    #[error("Failed to launch screenshot command '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The screenshot command was killed after exceeding the bounded wait.
    #[error("Screenshot command did not finish within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// No screenshot command is known for this platform and none was
    /// configured.
    #[error("No screenshot command is available on this platform")]
    Unsupported,
}

impl CaptureError {
    /// The reply code carried across the host channel for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CommandFailed { .. } => CODE_CAPTURE_FAILED,
            Self::Launch { .. } | Self::Unsupported => CODE_LAUNCH_FAILED,
            Self::Timeout { .. } => CODE_CAPTURE_TIMEOUT,
        }
    }
}
