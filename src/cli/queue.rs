use clap::Args;

use crate::cli::truncate;
use crate::config::CourierConfig;
use crate::error::Result;
use crate::exchange::publish::{list_pending, publish_response};
use crate::exchange::{ExchangeDirs, PermissionResponse};

#[derive(Debug, Args)]
pub struct RespondArgs {
    /// Request id to answer.
    pub id: String,

    /// Verdict: approve, temporary, escalate, or deny.
    /// Requesters treat anything unrecognized as deny.
    #[arg(long)]
    pub decision: String,

    /// Explanation shown to the requester.
    #[arg(long)]
    pub reason: String,

    /// Human-readable description of a config change applied (repeatable).
    #[arg(long = "changes")]
    pub changes: Vec<String>,

    /// Expiry timestamp for temporary grants.
    #[arg(long)]
    pub revert_at: Option<String>,
}

/// List permission requests awaiting a decision.
pub async fn run_list(config: CourierConfig) -> Result<()> {
    let dirs = ExchangeDirs::from_config(&config);
    let pending = list_pending(&dirs)?;

    if pending.is_empty() {
        println!("No pending requests.");
        return Ok(());
    }

    for request in &pending {
        println!(
            "ID: {}\n  Agent: {} ({})\n  Type: {}\n  Details: {}\n  Reason: {}\n  Duration: {}\n  Submitted: {}\n",
            request.id,
            request.agent_name,
            request.agent_id,
            request.permission_type,
            truncate(&request.details, 80),
            truncate(&request.reason, 80),
            request.duration,
            request.timestamp,
        );
    }

    println!("{} pending request(s)", pending.len());
    Ok(())
}

/// Publish an operator verdict for a pending request. The response file is
/// renamed into place atomically so the polling requester never sees a
/// partial write.
pub async fn run_respond(config: CourierConfig, args: RespondArgs) -> Result<()> {
    let dirs = ExchangeDirs::from_config(&config);

    let response = PermissionResponse {
        decision: args.decision,
        reason: args.reason,
        changes_applied: args.changes,
        revert_at: args.revert_at,
    };

    publish_response(&dirs, &args.id, &response)?;
    eprintln!(
        "perm-courier: published '{}' for {}",
        response.decision, args.id
    );

    if response.decision == "temporary" && response.revert_at.is_none() {
        eprintln!("  (warning: temporary grant without --revert-at)");
    }

    Ok(())
}
