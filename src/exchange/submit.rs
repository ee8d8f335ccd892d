use chrono::Utc;
use uuid::Uuid;

use crate::config::AgentsConfig;
use crate::error::Result;
use crate::exchange::{ExchangeDirs, PermissionIntent, PermissionRequest, Principal};
use crate::grants::{resolve_agent_name, resolve_current_permissions};

/// Build a fully stamped request record from a caller intent.
///
/// Generates a fresh id, snapshots the agent's present grants, and applies
/// the "session" default for an omitted duration. Caller-supplied duration
/// strings pass through verbatim.
pub fn build_request(
    registry: &AgentsConfig,
    principal: &Principal,
    intent: PermissionIntent,
) -> PermissionRequest {
    PermissionRequest {
        id: Uuid::new_v4().to_string(),
        timestamp: Utc::now(),
        agent_id: principal.agent_id.clone(),
        agent_name: resolve_agent_name(registry, &principal.agent_id),
        session_key: principal.session_key.clone(),
        permission_type: intent.permission_type,
        details: intent.details,
        reason: intent.reason,
        duration: intent.duration.unwrap_or_else(|| "session".into()),
        current_permissions: resolve_current_permissions(registry, &principal.agent_id),
    }
}

/// Persist the record as `<id>.json` in the request mailbox, creating the
/// directory if needed. The record is written once and never updated.
/// Any failure here aborts the exchange before waiting begins.
pub fn persist_request(dirs: &ExchangeDirs, request: &PermissionRequest) -> Result<()> {
    std::fs::create_dir_all(&dirs.request_dir)?;
    let json = serde_json::to_string_pretty(request)?;
    std::fs::write(dirs.request_path(&request.id), json)?;
    tracing::debug!(id = %request.id, permission_type = %request.permission_type, "permission request submitted");
    Ok(())
}
