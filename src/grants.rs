use serde::{Deserialize, Serialize};

use crate::config::AgentsConfig;

/// Snapshot of an agent's present grants, embedded in each request so the
/// broker can judge the delta being asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPermissions {
    /// Allowed tool groups (e.g. "group:fs").
    pub tools_allow: Vec<String>,

    /// Docker network mode.
    pub network: String,

    /// Workspace access mode.
    pub workspace_access: String,

    /// Memory limit (e.g. "1g").
    pub memory: String,
}

/// Resolve the requesting agent's present grants from the registry snapshot.
///
/// Every field walks the same three tiers: agent override, then the
/// installation-wide default, then a fixed literal. The tiers are kept in
/// one place so the resolution order stays auditable.
pub fn resolve_current_permissions(registry: &AgentsConfig, agent_id: &str) -> CurrentPermissions {
    let agent = registry.get_agent(agent_id);
    let defaults = &registry.agents.defaults;

    CurrentPermissions {
        tools_allow: agent
            .and_then(|a| a.tools_allow())
            .map(<[String]>::to_vec)
            .unwrap_or_default(),
        network: fallback(agent.and_then(|a| a.network()), defaults.network(), "none"),
        workspace_access: fallback(
            agent.and_then(|a| a.workspace_access()),
            defaults.workspace_access(),
            "none",
        ),
        memory: fallback(agent.and_then(|a| a.memory()), defaults.memory(), "1g"),
    }
}

/// Agent override -> global default -> literal default.
fn fallback(agent: Option<&str>, global: Option<&str>, literal: &str) -> String {
    agent.or(global).unwrap_or(literal).to_string()
}

/// Resolve the display name for the requesting agent. Unknown agents keep
/// their id as the name.
pub fn resolve_agent_name(registry: &AgentsConfig, agent_id: &str) -> String {
    registry
        .get_agent(agent_id)
        .and_then(|a| a.name.clone())
        .unwrap_or_else(|| agent_id.to_string())
}
