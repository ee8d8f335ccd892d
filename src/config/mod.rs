pub mod agents;

pub use agents::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CourierError, Result};

/// Returns the global config directory path: `~/.config/perm-courier/`
pub fn dirs_config() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home).join(".config").join("perm-courier")
}

/// Returns the state directory path: `~/.local/state/perm-courier/`
/// This is where the exchange mailboxes live by default.
pub fn dirs_state() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home)
        .join(".local")
        .join("state")
        .join("perm-courier")
}

/// Courier configuration from `~/.config/perm-courier/config.yml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourierConfig {
    /// Directory where request records are written.
    #[serde(default = "default_request_dir")]
    pub request_dir: PathBuf,

    /// Directory watched for broker response records.
    #[serde(default = "default_response_dir")]
    pub response_dir: PathBuf,

    /// Poll interval in milliseconds. Default: 2000.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum number of polls before giving up. Default: 30.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Path to the agent registry snapshot.
    #[serde(default = "default_agents_file")]
    pub agents_file: PathBuf,
}

fn default_request_dir() -> PathBuf {
    dirs_state().join("requests")
}
fn default_response_dir() -> PathBuf {
    dirs_state().join("responses")
}
fn default_poll_interval_ms() -> u64 {
    2000
}
fn default_max_attempts() -> u32 {
    30
}
fn default_agents_file() -> PathBuf {
    dirs_config().join("agents.yml")
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self {
            request_dir: default_request_dir(),
            response_dir: default_response_dir(),
            poll_interval_ms: default_poll_interval_ms(),
            max_attempts: default_max_attempts(),
            agents_file: default_agents_file(),
        }
    }
}

impl CourierConfig {
    /// Load config from a YAML file. Returns default if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&contents).map_err(|e| CourierError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load config from the well-known location.
    pub fn load() -> Result<Self> {
        Self::load_from(&dirs_config().join("config.yml"))
    }

    /// Total wait ceiling in seconds, for the timeout message.
    pub fn total_wait_secs(&self) -> u64 {
        self.poll_interval_ms * u64::from(self.max_attempts) / 1000
    }
}
