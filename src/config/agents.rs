use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CourierError, Result};

/// Agent registry snapshot, exported by the host gateway.
///
/// The shape mirrors the gateway's own config tree so a snapshot can be
/// taken verbatim: `agents.list[]` for per-agent entries and
/// `agents.defaults` for the installation-wide sandbox defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentsConfig {
    #[serde(default)]
    pub agents: AgentsSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentsSection {
    #[serde(default)]
    pub list: Vec<AgentEntry>,

    #[serde(default)]
    pub defaults: AgentDefaults,
}

/// A single agent entry from the registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentEntry {
    pub id: String,

    /// Display name. Falls back to the id when absent.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub tools: Option<ToolsSection>,

    #[serde(default)]
    pub sandbox: Option<SandboxSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsSection {
    #[serde(default)]
    pub sandbox: Option<ToolSandboxSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolSandboxSection {
    #[serde(default)]
    pub tools: Option<ToolAllowSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolAllowSection {
    #[serde(default)]
    pub allow: Vec<String>,
}

/// Sandbox settings, shared between per-agent entries and defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SandboxSection {
    #[serde(default, rename = "workspaceAccess")]
    pub workspace_access: Option<String>,

    #[serde(default)]
    pub docker: Option<DockerSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockerSection {
    #[serde(default)]
    pub network: Option<String>,

    #[serde(default)]
    pub memory: Option<String>,
}

/// Installation-wide defaults applied when an agent entry is silent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentDefaults {
    #[serde(default)]
    pub sandbox: Option<SandboxSection>,
}

impl AgentsConfig {
    /// Load the registry from a YAML file. Missing file yields an empty
    /// registry -- an unknown caller still gets a usable snapshot through
    /// the fallback chain.
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

    /// Look up an agent entry by id.
    pub fn get_agent(&self, id: &str) -> Option<&AgentEntry> {
        self.agents.list.iter().find(|a| a.id == id)
    }
}

impl AgentEntry {
    pub fn tools_allow(&self) -> Option<&[String]> {
        self.tools
            .as_ref()
            .and_then(|t| t.sandbox.as_ref())
            .and_then(|s| s.tools.as_ref())
            .map(|t| t.allow.as_slice())
    }

    pub fn network(&self) -> Option<&str> {
        self.sandbox
            .as_ref()
            .and_then(|s| s.docker.as_ref())
            .and_then(|d| d.network.as_deref())
    }

    pub fn workspace_access(&self) -> Option<&str> {
        self.sandbox.as_ref().and_then(|s| s.workspace_access.as_deref())
    }

    pub fn memory(&self) -> Option<&str> {
        self.sandbox
            .as_ref()
            .and_then(|s| s.docker.as_ref())
            .and_then(|d| d.memory.as_deref())
    }
}

impl AgentDefaults {
    pub fn network(&self) -> Option<&str> {
        self.sandbox
            .as_ref()
            .and_then(|s| s.docker.as_ref())
            .and_then(|d| d.network.as_deref())
    }

    pub fn workspace_access(&self) -> Option<&str> {
        self.sandbox.as_ref().and_then(|s| s.workspace_access.as_deref())
    }

    pub fn memory(&self) -> Option<&str> {
        self.sandbox
            .as_ref()
            .and_then(|s| s.docker.as_ref())
            .and_then(|d| d.memory.as_deref())
    }
}
