//! Screenshot capture via the platform screenshot command.
//!
//! This module owns the capture side of the service:
//! - Output path allocation under the configured directory
//! - Building the per-platform capture command line
//! - Running the command with a bounded wait
//! - Translating exit status into the capture error taxonomy

pub mod command;
pub mod dependencies;
pub mod invoker;
pub mod paths;
pub mod types;


pub use command::CommandSpec;
pub use dependencies::{CaptureDependencies, Clock, CommandExit, CommandRunner};
pub use invoker::Invoker;
pub use paths::PathAllocator;
pub use types::CaptureError;
