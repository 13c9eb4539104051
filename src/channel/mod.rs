//! The method-call channel between the host shell and the capture service.
//!
//! Requests and replies are single JSON objects, one per line. The reply
//! vocabulary is fixed: success-with-path, error-with-code-and-message, or
//! the not-implemented sentinel for unknown methods.

pub mod dispatcher;
pub mod protocol;

pub use dispatcher::Dispatcher;
pub use protocol::{METHOD_CAPTURE_SCREENSHOT, MethodCall, MethodReply};
