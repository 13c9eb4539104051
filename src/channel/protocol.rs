//! Wire types for the method-call channel.
//!
//! One request line in, one reply line out. The host writes a
//! [`MethodCall`] as a JSONL line and reads back exactly one
//! [`MethodReply`] line, tagged by its `status` field.

use serde::{Deserialize, Serialize};

/// The only method this service implements.
pub const METHOD_CAPTURE_SCREENSHOT: &str = "captureScreenshot";

/// Reply code for a request line that could not be parsed.
pub const CODE_INVALID_REQUEST: &str = "INVALID_REQUEST";

/// A named method call from the host. No parameters: the single supported
/// method takes none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MethodCall {
    pub method: String,
}

/// Reply to a method call. Exactly one of the three shapes is produced for
/// every request; nothing else ever crosses the channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodReply {
    /// The capture succeeded; `path` is the absolute location of the PNG.
    Ok { path: String },
    /// The capture subsystem failed.
    Error { code: String, message: String },
    /// The requested method does not exist. Distinct from `Error` so the
    /// caller can tell "unknown operation" from "operation failed".
    NotImplemented,
}

impl MethodReply {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Reply for a request line that was not a well-formed method call.
    pub fn invalid_request(detail: impl std::fmt::Display) -> Self {
        Self::error(CODE_INVALID_REQUEST, format!("Malformed request: {detail}"))
    }
}
