//! Serve mode: run the method channel over stdio.
//!
//! One request per line in, one reply per line out, until the host closes
//! stdin or a shutdown signal arrives. This is the mode a desktop shell
//! embeds: it owns the process, writes method calls, and reads replies.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use signal_hook::consts::signal::{SIGINT, SIGTERM};

use crate::capture::Invoker;
use crate::channel::{Dispatcher, MethodCall, MethodReply};
use crate::config::Config;
use crate::notification;

pub fn run(config: Config) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    let dispatcher = Dispatcher::new(Arc::new(Invoker::from_config(&config.capture)));

    let should_quit = Arc::new(AtomicBool::new(false));
    for signal in [SIGTERM, SIGINT] {
        signal_hook::flag::register(signal, Arc::clone(&should_quit))
            .context("Failed to register signal handler")?;
    }

    info!("Serving method calls on stdio (one JSON object per line)");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    for line in stdin.lock().lines() {
        if should_quit.load(Ordering::Acquire) {
            info!("Shutdown signal received, leaving serve loop");
            break;
        }

        let line = line.context("Failed to read request line")?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<MethodCall>(&line) {
            Ok(call) => {
                debug!("Dispatching method {:?}", call.method);
                runtime.block_on(dispatcher.dispatch(&call.method))
            }
            Err(err) => {
                warn!("Discarding malformed request line: {err}");
                MethodReply::invalid_request(err)
            }
        };

        if config.notification.enabled {
            notify_result(runtime.handle(), &reply);
        }

        let mut out = stdout.lock();
        serde_json::to_writer(&mut out, &reply).context("Failed to serialize reply")?;
        out.write_all(b"\n")
            .and_then(|()| out.flush())
            .context("Failed to write reply to host channel")?;
    }

    info!("Host channel closed, shutting down");
    Ok(())
}

fn notify_result(handle: &tokio::runtime::Handle, reply: &MethodReply) {
    match reply {
        MethodReply::Ok { path } => {
            notification::send_notification_async(handle, "Screenshot captured".into(), path.clone());
        }
        MethodReply::Error { message, .. } => {
            notification::send_notification_async(handle, "Screenshot failed".into(), message.clone());
        }
        MethodReply::NotImplemented => {}
    }
}
