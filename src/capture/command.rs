//! Per-platform screenshot command lines.

use std::path::Path;

/// A capture command line: program plus leading arguments. The output path
/// is appended as the final argument when the command is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    argv: Vec<String>,
}

impl CommandSpec {
    /// The default full-screen, non-interactive capture command for the
    /// current platform, if one is known.
    pub fn platform_default() -> Option<Self> {
        if cfg!(target_os = "macos") {
            // -x suppresses the capture sound; writes PNG by default.
            Some(Self::from_argv(vec!["screencapture".into(), "-x".into()]))
        } else if cfg!(target_os = "linux") {
            Some(Self::from_argv(vec!["grim".into()]))
        } else {
            None
        }
    }

    /// Builds a spec from an explicit argv prefix. Empty argv has no program
    /// to run and is rejected.
    pub fn from_override(argv: &[String]) -> Option<Self> {
        if argv.is_empty() || argv[0].trim().is_empty() {
            log::warn!("Ignoring empty screenshot command override");
            return None;
        }
        Some(Self::from_argv(argv.to_vec()))
    }

    fn from_argv(argv: Vec<String>) -> Self {
        Self { argv }
    }

    /// The program that will be executed.
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// The full argument vector for a capture writing to `output`.
    pub fn argv_for(&self, output: &Path) -> Vec<String> {
        let mut argv = self.argv.clone();
        argv.push(output.display().to_string());
        argv
    }
}
