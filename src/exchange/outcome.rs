use crate::exchange::PermissionResponse;

/// Terminal result of one exchange: the four broker verdicts plus the two
/// locally produced conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Approved {
        reason: String,
        changes_applied: Vec<String>,
    },
    TemporarilyGranted {
        reason: String,
        changes_applied: Vec<String>,
        revert_at: Option<String>,
    },
    Escalated {
        reason: String,
    },
    Denied {
        reason: String,
    },
    SubmissionFailed {
        error: String,
    },
    TimedOut {
        id: String,
        waited_secs: u64,
    },
}

/// Map a parsed response to its outcome category.
///
/// Total function of `decision`: anything not explicitly positive --
/// including an explicit "deny", an unrecognized value, or a missing
/// field -- is a denial. The protocol fails closed.
pub fn classify(response: &PermissionResponse) -> Outcome {
    match response.decision.as_str() {
        "approve" => Outcome::Approved {
            reason: response.reason.clone(),
            changes_applied: response.changes_applied.clone(),
        },
        "temporary" => Outcome::TemporarilyGranted {
            reason: response.reason.clone(),
            changes_applied: response.changes_applied.clone(),
            revert_at: response.revert_at.clone(),
        },
        "escalate" => Outcome::Escalated {
            reason: response.reason.clone(),
        },
        _ => Outcome::Denied {
            reason: response.reason.clone(),
        },
    }
}

impl Outcome {
    /// Render the single human-readable message returned to the caller.
    ///
    /// Each of the six messages carries a distinct keyword (APPROVED,
    /// TEMPORARILY GRANTED, ESCALATED, DENIED, "Failed to submit",
    /// "no response received") so downstream tooling can branch on it.
    pub fn render(&self) -> String {
        match self {
            Outcome::Approved {
                reason,
                changes_applied,
            } => format!(
                "Permission APPROVED: {reason}\n\nChanges applied: {}\n\n\
                 The gateway is restarting to apply changes. Please retry your action in a few seconds.",
                changes_applied.join(", "),
            ),
            Outcome::TemporarilyGranted {
                reason,
                changes_applied,
                revert_at,
            } => format!(
                "Permission TEMPORARILY GRANTED: {reason}\n\nChanges applied: {}\nExpires at: {}\n\n\
                 The gateway is restarting. Please retry your action in a few seconds.",
                changes_applied.join(", "),
                revert_at.as_deref().unwrap_or("unknown"),
            ),
            Outcome::Escalated { reason } => format!(
                "Permission ESCALATED for human review: {reason}\n\n\
                 Your request has been queued for the system operator. \
                 You will need to wait for manual approval or try a different approach.",
            ),
            Outcome::Denied { reason } => format!(
                "Permission DENIED: {reason}\n\n\
                 This request was determined to be outside acceptable policy. \
                 Try a different approach or contact the system operator.",
            ),
            Outcome::SubmissionFailed { error } => format!(
                "Failed to submit permission request: {error}. \
                 The permissions broker may not be configured.",
            ),
            Outcome::TimedOut { id, waited_secs } => format!(
                "Permission request submitted (ID: {id}) but no response received \
                 within {waited_secs} seconds. The broker daemon may not be running. \
                 Your request has been saved and will be processed when the broker comes online.",
            ),
        }
    }
}
