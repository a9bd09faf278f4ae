use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Editor settings, read from a JSON file
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Width that tab characters expand to
    #[serde(default = "default_tab_stop")]
    pub tab_stop: usize,

    /// Ctrl-Q presses needed to quit with unsaved changes
    #[serde(default = "default_quit_times")]
    pub quit_times: usize,

    /// Seconds a status message stays visible
    #[serde(default = "default_status_message_ttl_secs")]
    pub status_message_ttl_secs: u64,

    /// How long one input read waits before the screen is redrawn anyway
    #[serde(default = "default_input_timeout_ms")]
    pub input_timeout_ms: u64,
}

fn default_tab_stop() -> usize {
    crate::buffer::DEFAULT_TAB_STOP
}
fn default_quit_times() -> usize {
    3
}
fn default_status_message_ttl_secs() -> u64 {
    5
}
fn default_input_timeout_ms() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: default_tab_stop(),
            quit_times: default_quit_times(),
            status_message_ttl_secs: default_status_message_ttl_secs(),
            input_timeout_ms: default_input_timeout_ms(),
        }
    }
}

impl Config {
    /// Parse a config from JSON text
    pub fn from_json(content: &str) -> io::Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        Ok(config.normalized())
    }

    /// Load a config file; missing or malformed files are errors
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Load the user's config if present, otherwise defaults
    ///
    /// A file that exists but cannot be read or parsed is logged and ignored.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path.filter(|p| p.exists()) else {
            return Self::default();
        };
        match Self::load_from_file(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// `<config dir>/notavi/config.json`
    #[cfg(feature = "runtime")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("notavi").join("config.json"))
    }

    /// Clamp values that would break the editor
    fn normalized(mut self) -> Self {
        self.tab_stop = self.tab_stop.max(1);
        self
    }

    pub fn status_message_ttl(&self) -> Duration {
        Duration::from_secs(self.status_message_ttl_secs)
    }

    pub fn input_timeout(&self) -> Duration {
        Duration::from_millis(self.input_timeout_ms)
    }

    /// Log file used when `--log-file` is not given
    pub fn default_log_file() -> PathBuf {
        std::env::temp_dir().join("notavi.log")
    }
}
