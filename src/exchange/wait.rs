use std::time::Duration;

use crate::exchange::{ExchangeDirs, PermissionResponse};

/// Poll the response mailbox for the given id.
///
/// Each attempt sleeps one interval, then checks for the file. A file that
/// exists but does not parse is treated as not yet ready -- the broker may
/// still be writing it -- and polling continues. Returns `None` when the
/// attempt ceiling is reached without a successfully parsed response.
pub async fn wait_for_response(
    dirs: &ExchangeDirs,
    id: &str,
    interval: Duration,
    max_attempts: u32,
) -> Option<PermissionResponse> {
    let path = dirs.response_path(id);

    for attempt in 1..=max_attempts {
        tokio::time::sleep(interval).await;

        if !path.exists() {
            continue;
        }

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::debug!(id, attempt, error = %err, "response file unreadable, continuing to poll");
                continue;
            }
        };

        match serde_json::from_str::<PermissionResponse>(&contents) {
            Ok(response) => {
                tracing::debug!(id, attempt, decision = %response.decision, "response received");
                return Some(response);
            }
            Err(err) => {
                tracing::debug!(id, attempt, error = %err, "response not yet parseable, continuing to poll");
            }
        }
    }

    None
}
