use clap::Args;
use std::path::PathBuf;

use crate::config::{AgentsConfig, CourierConfig};
use crate::error::{CourierError, Result};
use crate::exchange::{PermissionExchange, PermissionIntent, PermissionType, Principal};

#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Category of permission being requested
    /// (tool_access, network_access, workspace_access, memory_increase).
    #[arg(long, value_name = "TYPE")]
    pub permission_type: String,

    /// Specific permission needed, e.g. 'group:web', 'host', '4g', 'rw'.
    #[arg(long)]
    pub details: String,

    /// Why this permission is needed for the current task.
    #[arg(long)]
    pub reason: String,

    /// How long the permission is needed
    /// (permanent, session, 1h, 4h, 24h). Default: session.
    #[arg(long)]
    pub duration: Option<String>,

    /// Requesting agent id. Falls back to $PERM_COURIER_AGENT_ID,
    /// then "unknown".
    #[arg(long)]
    pub agent_id: Option<String>,

    /// Session key from the host invocation context.
    /// Falls back to $PERM_COURIER_SESSION_KEY.
    #[arg(long)]
    pub session_key: Option<String>,

    /// Agent registry snapshot path, overriding the configured one.
    #[arg(long)]
    pub agents: Option<PathBuf>,
}

/// Submit a permission request and wait for the broker's decision.
///
/// Prints the rendered outcome to stdout. Submission failure, timeout,
/// and denial are all answers, not process errors.
pub async fn run_request(config: CourierConfig, args: RequestArgs) -> Result<()> {
    let permission_type: PermissionType = args
        .permission_type
        .parse()
        .map_err(|reason| CourierError::InvalidRequest { reason })?;

    if args.details.trim().is_empty() {
        return Err(CourierError::InvalidRequest {
            reason: "details must not be empty".into(),
        });
    }
    if args.reason.trim().is_empty() {
        return Err(CourierError::InvalidRequest {
            reason: "reason must not be empty".into(),
        });
    }

    let agents_file = args.agents.unwrap_or_else(|| config.agents_file.clone());
    let registry = AgentsConfig::load_from(&agents_file)?;

    let principal = Principal {
        agent_id: args
            .agent_id
            .or_else(|| std::env::var("PERM_COURIER_AGENT_ID").ok())
            .unwrap_or_else(|| "unknown".into()),
        session_key: args
            .session_key
            .or_else(|| std::env::var("PERM_COURIER_SESSION_KEY").ok())
            .unwrap_or_default(),
    };

    let intent = PermissionIntent {
        permission_type,
        details: args.details,
        reason: args.reason,
        duration: args.duration,
    };

    let exchange = PermissionExchange::from_config(&config);
    let outcome = exchange.execute(&registry, &principal, intent).await;
    println!("{}", outcome.render());

    Ok(())
}
