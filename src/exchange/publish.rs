//! Broker-side helpers: listing the pending queue and publishing verdicts.
//! The decision itself comes from the operator; nothing here decides.

use crate::error::{CourierError, Result};
use crate::exchange::{ExchangeDirs, PermissionRequest, PermissionResponse};

/// List requests that have no response yet, oldest first.
///
/// Malformed request files are skipped with a warning rather than failing
/// the whole listing.
pub fn list_pending(dirs: &ExchangeDirs) -> Result<Vec<PermissionRequest>> {
    if !dirs.request_dir.exists() {
        return Ok(Vec::new());
    }

    let mut pending = Vec::new();
    for entry in std::fs::read_dir(&dirs.request_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }

        let contents = std::fs::read_to_string(&path)?;
        let request = match serde_json::from_str::<PermissionRequest>(&contents) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!("skipping malformed request file {}: {}", path.display(), err);
                continue;
            }
        };

        if dirs.response_path(&request.id).exists() {
            continue;
        }
        pending.push(request);
    }

    pending.sort_by_key(|r| r.timestamp);
    Ok(pending)
}

/// Atomically publish a response record for `id`.
///
/// Writes to a temp path in the response directory, then renames into
/// `<id>.json`, so a polling requester never observes a partially written
/// file.
pub fn publish_response(
    dirs: &ExchangeDirs,
    id: &str,
    response: &PermissionResponse,
) -> Result<std::path::PathBuf> {
    std::fs::create_dir_all(&dirs.response_dir)?;

    let final_path = dirs.response_path(id);
    let tmp_path = dirs.response_dir.join(format!(".{id}.json.tmp"));

    let json = serde_json::to_string_pretty(response)?;
    std::fs::write(&tmp_path, json).map_err(|e| CourierError::Publish {
        id: id.to_string(),
        reason: format!("write failed: {e}"),
    })?;
    std::fs::rename(&tmp_path, &final_path).map_err(|e| CourierError::Publish {
        id: id.to_string(),
        reason: format!("rename failed: {e}"),
    })?;

    tracing::debug!(id, decision = %response.decision, "response published");
    Ok(final_path)
}
