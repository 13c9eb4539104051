//! Injected collaborators for the capture invoker.
//!
//! The clock and the process runner are trait objects so tests can pin the
//! timestamp and simulate exit statuses without launching anything.

use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of the current time, in whole seconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn unix_seconds(&self) -> i64;
}

/// How a launched capture command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandExit {
    /// Exited with status 0.
    Success,
    /// Exited with a non-zero status (None when killed by a signal).
    Failure(Option<i32>),
    /// Killed after exceeding the bounded wait.
    TimedOut,
}

/// Runs a capture command to completion. A launch failure is an `Err`;
/// everything after a successful launch is a `CommandExit`.
pub trait CommandRunner: Send + Sync {
    fn run(&self, argv: &[String], timeout: Duration) -> std::io::Result<CommandExit>;
}

/// Bundle of collaborators used by the invoker. Each can be mocked in tests.
#[derive(Clone)]
pub struct CaptureDependencies {
    pub clock: Arc<dyn Clock>,
    pub runner: Arc<dyn CommandRunner>,
}

impl Default for CaptureDependencies {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            runner: Arc::new(OsCommandRunner),
        }
    }
}

struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Interval between `try_wait` polls while waiting for the child.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

struct OsCommandRunner;

impl CommandRunner for OsCommandRunner {
    fn run(&self, argv: &[String], timeout: Duration) -> std::io::Result<CommandExit> {
        let Some((program, args)) = argv.split_first() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "empty capture command",
            ));
        };
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        let deadline = Instant::now() + timeout;
        let status = loop {
            match child.try_wait()? {
                Some(status) => break status,
                None if Instant::now() >= deadline => {
                    log::warn!(
                        "{} exceeded the {}s capture timeout, killing it",
                        program,
                        timeout.as_secs()
                    );
                    let _ = child.kill();
                    let _ = child.wait();
                    return Ok(CommandExit::TimedOut);
                }
                None => std::thread::sleep(WAIT_POLL_INTERVAL),
            }
        };

        if status.success() {
            Ok(CommandExit::Success)
        } else {
            // Screenshot tools report the interesting detail on stderr.
            let mut stderr = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                let _ = pipe.read_to_string(&mut stderr);
            }
            let stderr = stderr.trim();
            if !stderr.is_empty() {
                log::warn!("{} stderr: {}", program, stderr);
            }
            Ok(CommandExit::Failure(status.code()))
        }
    }
}
