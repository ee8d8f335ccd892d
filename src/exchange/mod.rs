pub mod outcome;
pub mod publish;
pub mod submit;
pub mod wait;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{AgentsConfig, CourierConfig};
use crate::grants::CurrentPermissions;
use outcome::Outcome;

/// The closed set of permission categories an agent can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionType {
    ToolAccess,
    NetworkAccess,
    WorkspaceAccess,
    MemoryIncrease,
}

impl std::fmt::Display for PermissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionType::ToolAccess => write!(f, "tool_access"),
            PermissionType::NetworkAccess => write!(f, "network_access"),
            PermissionType::WorkspaceAccess => write!(f, "workspace_access"),
            PermissionType::MemoryIncrease => write!(f, "memory_increase"),
        }
    }
}

impl std::str::FromStr for PermissionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "tool_access" => Ok(PermissionType::ToolAccess),
            "network_access" => Ok(PermissionType::NetworkAccess),
            "workspace_access" => Ok(PermissionType::WorkspaceAccess),
            "memory_increase" => Ok(PermissionType::MemoryIncrease),
            _ => Err(format!("unknown permission type: {s}")),
        }
    }
}

/// A caller's intent, before it is stamped with identity and grants.
#[derive(Debug, Clone)]
pub struct PermissionIntent {
    pub permission_type: PermissionType,

    /// Free-text qualifier whose shape depends on the type
    /// (a capability group, a host, a quota value).
    pub details: String,

    /// Justification for the broker.
    pub reason: String,

    /// How long the grant is needed. `None` means "session".
    /// Caller-supplied values pass through verbatim.
    pub duration: Option<String>,
}

/// Request record written to `<request_dir>/<id>.json`.
/// Immutable once written; the id doubles as the filename stem that
/// correlates the request with its response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionRequest {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub agent_id: String,
    pub agent_name: String,
    pub session_key: String,
    pub permission_type: PermissionType,
    pub details: String,
    pub reason: String,
    pub duration: String,
    pub current_permissions: CurrentPermissions,
}

/// Response record read from `<response_dir>/<id>.json`.
///
/// The broker is an external process, so every field is lenient: a missing
/// `decision` parses as empty and classifies as denial rather than failing
/// the exchange.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionResponse {
    #[serde(default)]
    pub decision: String,

    #[serde(default)]
    pub reason: String,

    /// Human-readable descriptions of config changes made on approval.
    #[serde(default)]
    pub changes_applied: Vec<String>,

    /// Expiry timestamp, meaningful only for temporary grants.
    #[serde(default)]
    pub revert_at: Option<String>,
}

/// The exchange directory pair -- two one-way mailboxes correlated by id.
#[derive(Debug, Clone)]
pub struct ExchangeDirs {
    pub request_dir: PathBuf,
    pub response_dir: PathBuf,
}

impl ExchangeDirs {
    pub fn new(request_dir: PathBuf, response_dir: PathBuf) -> Self {
        Self {
            request_dir,
            response_dir,
        }
    }

    pub fn from_config(config: &CourierConfig) -> Self {
        Self::new(config.request_dir.clone(), config.response_dir.clone())
    }

    pub fn request_path(&self, id: &str) -> PathBuf {
        self.request_dir.join(format!("{id}.json"))
    }

    pub fn response_path(&self, id: &str) -> PathBuf {
        self.response_dir.join(format!("{id}.json"))
    }
}

/// Identity of the requesting principal, supplied by the host's
/// invocation context. Placeholder values are acceptable.
#[derive(Debug, Clone)]
pub struct Principal {
    pub agent_id: String,
    pub session_key: String,
}

/// Drives one request/response exchange end to end:
/// submit, poll, classify. Every failure path maps to an [`Outcome`],
/// so the caller always gets an answer.
pub struct PermissionExchange {
    dirs: ExchangeDirs,
    poll_interval: Duration,
    max_attempts: u32,
}

impl PermissionExchange {
    pub fn new(dirs: ExchangeDirs, poll_interval: Duration, max_attempts: u32) -> Self {
        Self {
            dirs,
            poll_interval,
            max_attempts,
        }
    }

    pub fn from_config(config: &CourierConfig) -> Self {
        Self::new(
            ExchangeDirs::from_config(config),
            Duration::from_millis(config.poll_interval_ms),
            config.max_attempts,
        )
    }

    /// Run one exchange. Concurrent calls are independent: each request
    /// gets a fresh id and its own file pair.
    pub async fn execute(
        &self,
        registry: &AgentsConfig,
        principal: &Principal,
        intent: PermissionIntent,
    ) -> Outcome {
        let request = submit::build_request(registry, principal, intent);
        let id = request.id.clone();

        if let Err(err) = submit::persist_request(&self.dirs, &request) {
            return Outcome::SubmissionFailed {
                error: err.to_string(),
            };
        }

        match wait::wait_for_response(&self.dirs, &id, self.poll_interval, self.max_attempts).await
        {
            Some(response) => outcome::classify(&response),
            None => Outcome::TimedOut {
                id,
                waited_secs: self.total_wait_secs(),
            },
        }
    }

    fn total_wait_secs(&self) -> u64 {
        self.poll_interval.as_millis() as u64 * u64::from(self.max_attempts) / 1000
    }
}
