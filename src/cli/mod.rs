pub mod queue;
pub mod request;

use std::path::{Path, PathBuf};

use crate::config::CourierConfig;
use crate::error::Result;

/// Load the courier config, honoring an explicit `--config` override.
pub fn load_config(override_path: Option<&Path>) -> Result<CourierConfig> {
    match override_path {
        Some(path) => CourierConfig::load_from(path),
        None => CourierConfig::load(),
    }
}

/// Apply mailbox directory overrides on top of the loaded config.
pub fn apply_dir_overrides(
    config: &mut CourierConfig,
    request_dir: Option<PathBuf>,
    response_dir: Option<PathBuf>,
) {
    if let Some(dir) = request_dir {
        config.request_dir = dir;
    }
    if let Some(dir) = response_dir {
        config.response_dir = dir;
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
