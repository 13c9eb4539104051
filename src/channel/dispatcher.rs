//! Maps incoming method names to actions and reply shapes.

use std::sync::Arc;

use tokio::task;

use crate::capture::Invoker;
use crate::capture::types::{CODE_CAPTURE_FAILED, CaptureError};
use crate::channel::protocol::{METHOD_CAPTURE_SCREENSHOT, MethodReply};

/// Stateless per-call dispatch over the fixed method surface.
///
/// Every execution path ends in exactly one of the three reply shapes;
/// invoker failures never escape to the host channel. The blocking capture
/// runs on a dedicated blocking worker so the dispatching task stays free.
#[derive(Clone)]
pub struct Dispatcher {
    invoker: Arc<Invoker>,
}

impl Dispatcher {
    pub fn new(invoker: Arc<Invoker>) -> Self {
        Self { invoker }
    }

    pub async fn dispatch(&self, method: &str) -> MethodReply {
        match method {
            METHOD_CAPTURE_SCREENSHOT => self.capture_screenshot().await,
            other => {
                log::debug!("Method not implemented: {other:?}");
                MethodReply::NotImplemented
            }
        }
    }

    async fn capture_screenshot(&self) -> MethodReply {
        let invoker = Arc::clone(&self.invoker);
        match task::spawn_blocking(move || invoker.capture()).await {
            Ok(Ok(path)) => MethodReply::Ok {
                path: path.display().to_string(),
            },
            Ok(Err(err)) => MethodReply::error(err.code(), err.to_string()),
            Err(join_err) => {
                // A panicked worker must still produce a well-formed reply.
                log::error!("Capture worker failed to join: {join_err}");
                MethodReply::error(
                    CODE_CAPTURE_FAILED,
                    CaptureError::CommandFailed { exit_code: None }.to_string(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::capture::{CaptureDependencies, Clock, CommandExit, CommandRunner};
    use crate::config::CaptureConfig;

    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn unix_seconds(&self) -> i64 {
            self.0
        }
    }

    struct MockRunner {
        exit: Mutex<Vec<std::io::Result<CommandExit>>>,
        calls: Mutex<usize>,
    }

    impl MockRunner {
        fn with_exits(exits: Vec<std::io::Result<CommandExit>>) -> Arc<Self> {
            Arc::new(Self {
                exit: Mutex::new(exits),
                calls: Mutex::new(0),
            })
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl CommandRunner for MockRunner {
        fn run(&self, _argv: &[String], _timeout: Duration) -> std::io::Result<CommandExit> {
            *self.calls.lock().unwrap() += 1;
            self.exit
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Ok(CommandExit::Success))
        }
    }

    fn dispatcher_with(runner: Arc<MockRunner>) -> Dispatcher {
        let config = CaptureConfig {
            output_directory: Some(PathBuf::from("/tmp")),
            command: Some(vec!["fake-screenshot".into()]),
            ..Default::default()
        };
        let deps = CaptureDependencies {
            clock: Arc::new(FixedClock(1_700_000_000)),
            runner,
        };
        Dispatcher::new(Arc::new(Invoker::with_dependencies(&config, deps)))
    }

    #[tokio::test]
    async fn test_capture_success_replies_with_path() {
        let runner = MockRunner::with_exits(vec![Ok(CommandExit::Success)]);
        let dispatcher = dispatcher_with(Arc::clone(&runner));

        let reply = dispatcher.dispatch("captureScreenshot").await;
        assert_eq!(
            reply,
            MethodReply::Ok {
                path: "/tmp/screenshot_1700000000.png".into()
            }
        );
        assert_eq!(runner.calls(), 1);
    }

    #[tokio::test]
    async fn test_nonzero_exit_replies_capture_failed() {
        let runner = MockRunner::with_exits(vec![Ok(CommandExit::Failure(Some(1)))]);
        let dispatcher = dispatcher_with(runner);

        let reply = dispatcher.dispatch("captureScreenshot").await;
        assert_eq!(
            reply,
            MethodReply::error("CAPTURE_FAILED", "Failed to capture screenshot")
        );
    }

    #[tokio::test]
    async fn test_unknown_method_never_invokes_the_runner() {
        let runner = MockRunner::with_exits(vec![]);
        let dispatcher = dispatcher_with(Arc::clone(&runner));

        let reply = dispatcher.dispatch("foo").await;
        assert_eq!(reply, MethodReply::NotImplemented);
        assert_eq!(runner.calls(), 0);
    }

    #[tokio::test]
    async fn test_launch_error_becomes_error_reply() {
        let runner = MockRunner::with_exits(vec![Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ))]);
        let dispatcher = dispatcher_with(runner);

        let reply = dispatcher.dispatch("captureScreenshot").await;
        match reply {
            MethodReply::Error { code, message } => {
                assert_eq!(code, "LAUNCH_FAILED");
                assert!(message.contains("fake-screenshot"));
            }
            other => panic!("expected error reply, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_becomes_distinct_error_reply() {
        let runner = MockRunner::with_exits(vec![Ok(CommandExit::TimedOut)]);
        let dispatcher = dispatcher_with(runner);

        let reply = dispatcher.dispatch("captureScreenshot").await;
        match reply {
            MethodReply::Error { code, .. } => assert_eq!(code, "CAPTURE_TIMEOUT"),
            other => panic!("expected error reply, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_back_to_back_dispatches_produce_distinct_paths() {
        let runner =
            MockRunner::with_exits(vec![Ok(CommandExit::Success), Ok(CommandExit::Success)]);
        let dispatcher = dispatcher_with(runner);

        let first = dispatcher.dispatch("captureScreenshot").await;
        let second = dispatcher.dispatch("captureScreenshot").await;
        let paths: Vec<_> = [first, second]
            .into_iter()
            .map(|reply| match reply {
                MethodReply::Ok { path } => path,
                other => panic!("expected success, got {other:?}"),
            })
            .collect();
        assert_ne!(paths[0], paths[1]);
    }
}
