//! Configuration file support for screensnap.
//!
//! Settings are loaded from `~/.config/screensnap/config.toml`. If no config
//! file exists, sensible defaults are used automatically.
//!
//! # Example TOML
//! ```toml
//! [capture]
//! output_directory = "/var/tmp"
//! command = ["grim"]
//! timeout_secs = 30
//!
//! [notification]
//! enabled = true
//! ```

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Root configuration, deserialized from the TOML file. Every field has a
/// default so a partial (or absent) file is fine.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Capture command and output settings.
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Desktop notification settings for serve mode.
    #[serde(default)]
    pub notification: NotificationConfig,
}

/// Settings for the capture invoker.
#[derive(Debug, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Directory screenshots are written to. Defaults to the system temp
    /// directory.
    pub output_directory: Option<PathBuf>,

    /// Override for the screenshot command: program plus leading arguments.
    /// The output path is appended as the final argument. When unset, the
    /// platform default is used (`screencapture -x` on macOS, `grim` on
    /// Linux).
    pub command: Option<Vec<String>>,

    /// Bounded wait for the capture command, in seconds. The child is killed
    /// on expiry.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_directory: None,
            command: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CaptureConfig {
    /// The effective output directory.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_directory
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}

/// Desktop notification settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Send a freedesktop notification after each serve-mode capture.
    pub enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { enabled: false }
    }
}

impl Config {
    /// Loads configuration from the default path. A missing file yields
    /// defaults; a file that exists but fails to parse is an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                debug!("Could not determine config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate_and_clamp();
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// The default config file location.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("screensnap").join("config.toml"))
    }

    /// Clamps out-of-range values to something workable, with a logged
    /// warning.
    fn validate_and_clamp(&mut self) {
        // Timeout: 1 - 300 seconds
        if !(1..=300).contains(&self.capture.timeout_secs) {
            log::warn!(
                "Invalid timeout_secs {}, clamping to 1-300 range",
                self.capture.timeout_secs
            );
            self.capture.timeout_secs = self.capture.timeout_secs.clamp(1, 300);
        }

        if let Some(command) = &self.capture.command
            && (command.is_empty() || command[0].trim().is_empty())
        {
            log::warn!("Empty capture command override in config, ignoring it");
            self.capture.command = None;
        }
    }
}
