//! The capture invoker: one blocking call per screenshot.

use std::path::PathBuf;
use std::time::Duration;

use crate::capture::{
    command::CommandSpec,
    dependencies::{CaptureDependencies, CommandExit},
    paths::PathAllocator,
    types::CaptureError,
};
use crate::config::CaptureConfig;

/// Runs the platform screenshot command and reports where the image landed.
///
/// `capture` blocks until the child process exits or the bounded wait
/// expires; callers that must not block (the dispatcher) move it onto a
/// blocking worker.
pub struct Invoker {
    paths: PathAllocator,
    command: Option<CommandSpec>,
    timeout: Duration,
    deps: CaptureDependencies,
}

impl Invoker {
    /// Builds an invoker from configuration, wiring the real clock and
    /// process runner.
    pub fn from_config(config: &CaptureConfig) -> Self {
        Self::with_dependencies(config, CaptureDependencies::default())
    }

    /// Builds an invoker with custom collaborators (useful for testing).
    pub fn with_dependencies(config: &CaptureConfig, deps: CaptureDependencies) -> Self {
        let command = match &config.command {
            Some(argv) => CommandSpec::from_override(argv),
            None => CommandSpec::platform_default(),
        };
        Self {
            paths: PathAllocator::new(config.resolved_output_dir()),
            command,
            timeout: Duration::from_secs(config.timeout_secs),
            deps,
        }
    }

    /// Captures the full screen to a freshly allocated path.
    ///
    /// Does not pre-validate the output directory and does not clean up a
    /// partially written file when the command fails.
    pub fn capture(&self) -> Result<PathBuf, CaptureError> {
        let Some(command) = &self.command else {
            log::error!("No screenshot command for this platform and none configured");
            return Err(CaptureError::Unsupported);
        };

        let output = self.paths.allocate(self.deps.clock.as_ref());
        let argv = command.argv_for(&output);
        log::info!(
            "Capturing screen via {} to {}",
            command.program(),
            output.display()
        );

        match self.deps.runner.run(&argv, self.timeout) {
            Ok(CommandExit::Success) => {
                log::info!("Screenshot written to {}", output.display());
                Ok(output)
            }
            Ok(CommandExit::Failure(exit_code)) => {
                log::warn!(
                    "{} exited with status {:?} while capturing to {}",
                    command.program(),
                    exit_code,
                    output.display()
                );
                Err(CaptureError::CommandFailed { exit_code })
            }
            Ok(CommandExit::TimedOut) => Err(CaptureError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }),
            // Tool missing or not executable, as opposed to ran-and-failed.
            Err(source) => {
                log::error!(
                    "Could not launch {} (is it installed?): {}",
                    command.program(),
                    source
                );
                Err(CaptureError::Launch {
                    program: command.program().to_string(),
                    source,
                })
            }
        }
    }
}
