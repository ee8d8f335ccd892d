//! CLI integration tests using assert_cmd to exercise the actual binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

use perm_courier::config::AgentsConfig;
use perm_courier::exchange::publish::{list_pending, publish_response};
use perm_courier::exchange::submit::{build_request, persist_request};
use perm_courier::exchange::{
    ExchangeDirs, PermissionIntent, PermissionResponse, PermissionType, Principal,
};

fn courier() -> Command {
    Command::cargo_bin("perm-courier").unwrap()
}

/// Write a config file with fast poll settings and mailboxes under `tmp`.
fn write_config(tmp: &TempDir) -> PathBuf {
    let path = tmp.path().join("config.yml");
    let yaml = format!(
        "request_dir: {}\nresponse_dir: {}\npoll_interval_ms: 25\nmax_attempts: 4\nagents_file: {}\n",
        tmp.path().join("requests").display(),
        tmp.path().join("responses").display(),
        tmp.path().join("agents.yml").display(),
    );
    std::fs::write(&path, yaml).unwrap();
    path
}

fn mailboxes(tmp: &TempDir) -> ExchangeDirs {
    ExchangeDirs::new(tmp.path().join("requests"), tmp.path().join("responses"))
}

fn seed_request(dirs: &ExchangeDirs, details: &str) -> String {
    let request = build_request(
        &AgentsConfig::default(),
        &Principal {
            agent_id: "seed-agent".into(),
            session_key: "sess-seed".into(),
        },
        PermissionIntent {
            permission_type: PermissionType::ToolAccess,
            details: details.into(),
            reason: "integration seed".into(),
            duration: None,
        },
    );
    persist_request(dirs, &request).unwrap();
    request.id
}

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

#[test]
fn cli_request_unknown_permission_type_fails() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);

    courier()
        .args([
            "--config",
            &config.to_string_lossy(),
            "request",
            "--permission-type",
            "root_access",
            "--details",
            "everything",
            "--reason",
            "because",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown permission type"));
}

#[test]
fn cli_request_empty_details_fails() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);

    courier()
        .args([
            "--config",
            &config.to_string_lossy(),
            "request",
            "--permission-type",
            "network_access",
            "--details",
            "  ",
            "--reason",
            "fetch docs",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("details must not be empty"));
}

// ---------------------------------------------------------------------------
// Request without a broker
// ---------------------------------------------------------------------------

#[test]
fn cli_request_times_out_but_leaves_the_request_behind() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);

    courier()
        .args([
            "--config",
            &config.to_string_lossy(),
            "request",
            "--permission-type",
            "network_access",
            "--details",
            "host:crates.io",
            "--reason",
            "dependency lookup",
            "--agent-id",
            "cli-agent",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("no response received"))
        .stdout(predicate::str::contains("saved"));

    let entries: Vec<_> = std::fs::read_dir(tmp.path().join("requests"))
        .unwrap()
        .collect();
    assert_eq!(entries.len(), 1);
}

// ---------------------------------------------------------------------------
// Request answered by a broker
// ---------------------------------------------------------------------------

#[test]
fn cli_request_prints_approval_when_a_broker_answers() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);
    let dirs = mailboxes(&tmp);

    // Stand-in broker on a plain thread: answer the first pending request.
    let broker_dirs = dirs.clone();
    let broker = std::thread::spawn(move || loop {
        if let Some(request) = list_pending(&broker_dirs).unwrap().into_iter().next() {
            publish_response(
                &broker_dirs,
                &request.id,
                &PermissionResponse {
                    decision: "approve".into(),
                    reason: "allowed for this session".into(),
                    changes_applied: vec!["network=egress".into()],
                    revert_at: None,
                },
            )
            .unwrap();
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    });

    courier()
        .args([
            "--config",
            &config.to_string_lossy(),
            "request",
            "--permission-type",
            "network_access",
            "--details",
            "host:crates.io",
            "--reason",
            "dependency lookup",
        ])
        .env("PERM_COURIER_AGENT_ID", "env-agent")
        .assert()
        .success()
        .stdout(predicate::str::contains("Permission APPROVED"))
        .stdout(predicate::str::contains("network=egress"));

    broker.join().unwrap();
}

// ---------------------------------------------------------------------------
// Queue subcommands
// ---------------------------------------------------------------------------

#[test]
fn cli_queue_list_empty_mailbox() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);

    courier()
        .args(["--config", &config.to_string_lossy(), "queue", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No pending requests."));
}

#[test]
fn cli_queue_respond_clears_the_pending_entry() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);
    let id = seed_request(&mailboxes(&tmp), "group:web");

    courier()
        .args(["--config", &config.to_string_lossy(), "queue", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&id))
        .stdout(predicate::str::contains("group:web"))
        .stdout(predicate::str::contains("1 pending request(s)"));

    courier()
        .args([
            "--config",
            &config.to_string_lossy(),
            "queue",
            "respond",
            &id,
            "--decision",
            "deny",
            "--reason",
            "outside policy",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains(format!("published 'deny' for {id}")));

    // Answered requests drop out of the pending view
    courier()
        .args(["--config", &config.to_string_lossy(), "queue", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No pending requests."));
}

#[test]
fn cli_queue_respond_temporary_without_expiry_warns() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);
    let id = seed_request(&mailboxes(&tmp), "4g");

    courier()
        .args([
            "--config",
            &config.to_string_lossy(),
            "queue",
            "respond",
            &id,
            "--decision",
            "temporary",
            "--reason",
            "one-off build",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "temporary grant without --revert-at",
        ));
}

// ---------------------------------------------------------------------------
// Mailbox overrides
// ---------------------------------------------------------------------------

#[test]
fn cli_dir_flags_override_the_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);
    let other = TempDir::new().unwrap();
    let id = seed_request(&mailboxes(&other), "rw");

    // The config file points at empty mailboxes; the flags win.
    courier()
        .args([
            "--config",
            &config.to_string_lossy(),
            "--request-dir",
            &other.path().join("requests").to_string_lossy(),
            "--response-dir",
            &other.path().join("responses").to_string_lossy(),
            "queue",
            "list",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(&id));
}

// ---------------------------------------------------------------------------
// Help / version
// ---------------------------------------------------------------------------

#[test]
fn cli_help() {
    courier()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Filesystem-mediated permission escalation",
        ));
}

#[test]
fn cli_version() {
    courier()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("perm-courier"));
}

#[test]
fn cli_no_args_shows_help() {
    courier()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
