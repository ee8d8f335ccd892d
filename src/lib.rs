//! Filesystem-mediated permission escalation for autonomous agents.
//!
//! A requester writes a uniquely identified request record into a request
//! mailbox, then polls a response mailbox for the broker's decision under a
//! bounded ceiling. The two processes share nothing but the directory pair:
//! the broker reads requests at its own pace and publishes responses under
//! the same id. Decisions classify into approved, temporarily granted,
//! escalated, or denied (the default for anything unrecognized).

pub mod cli;
pub mod config;
pub mod error;
pub mod exchange;
pub mod grants;
