use clap::{ArgAction, Parser};

mod capture;
mod channel;
mod config;
mod notification;
mod serve;

use channel::METHOD_CAPTURE_SCREENSHOT;

#[derive(Parser, Debug)]
#[command(name = "screensnap")]
#[command(version, about = "Screenshot capture service for desktop application shells")]
struct Cli {
    /// Serve method calls over stdio (for embedding in a host application)
    #[arg(long, short = 's', action = ArgAction::SetTrue)]
    serve: bool,

    /// Capture one screenshot, print its path, and exit
    #[arg(long, short = 'c', action = ArgAction::SetTrue)]
    capture: bool,

    /// Load configuration from an explicit path instead of the default
    #[arg(long, value_name = "FILE")]
    config: Option<std::path::PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!(
        "screensnap {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("SCREENSNAP_GIT_HASH")
    );

    let config = match &cli.config {
        Some(path) => config::Config::load_from(path)?,
        None => config::Config::load()?,
    };

    if cli.serve {
        log::info!("Starting in serve mode");
        serve::run(config)?;
    } else if cli.capture {
        capture_once(&config)?;
    } else {
        // No flags: show usage
        println!("screensnap: screenshot capture service for desktop application shells");
        println!();
        println!("Usage:");
        println!("  screensnap --serve     Serve method calls over stdio");
        println!("  screensnap --capture   Capture one screenshot and print its path");
        println!("  screensnap --help      Show help");
        println!();
        println!("Serve mode speaks one JSON object per line:");
        println!("  request:  {{\"method\": \"captureScreenshot\"}}");
        println!("  success:  {{\"status\": \"ok\", \"path\": \"/tmp/screenshot_1700000000.png\"}}");
        println!("  failure:  {{\"status\": \"error\", \"code\": \"CAPTURE_FAILED\", \"message\": \"...\"}}");
        println!("  unknown:  {{\"status\": \"not_implemented\"}}");
    }

    Ok(())
}

/// One-shot capture for shell scripting: path on stdout, errors via the exit
/// status.
fn capture_once(config: &config::Config) -> anyhow::Result<()> {
    use channel::{Dispatcher, MethodReply};
    use std::sync::Arc;

    let runtime = tokio::runtime::Runtime::new()?;
    let dispatcher = Dispatcher::new(Arc::new(capture::Invoker::from_config(&config.capture)));

    match runtime.block_on(dispatcher.dispatch(METHOD_CAPTURE_SCREENSHOT)) {
        MethodReply::Ok { path } => {
            println!("{path}");
            Ok(())
        }
        MethodReply::Error { code, message } => anyhow::bail!("{code}: {message}"),
        MethodReply::NotImplemented => anyhow::bail!("capture method not implemented"),
    }
}
