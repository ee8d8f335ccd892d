use clap::{Parser, Subcommand};
use std::path::PathBuf;

use perm_courier::cli::{self, queue, request};

#[derive(Parser)]
#[command(
    name = "perm-courier",
    version,
    about = "Filesystem-mediated permission escalation for autonomous agents"
)]
struct Cli {
    /// Config file path. Defaults to ~/.config/perm-courier/config.yml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request mailbox directory, overriding the configured one.
    #[arg(long, global = true)]
    request_dir: Option<PathBuf>,

    /// Response mailbox directory, overriding the configured one.
    #[arg(long, global = true)]
    response_dir: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a permission request to the broker and wait for its decision.
    Request(request::RequestArgs),

    /// Operator-side queue helpers.
    Queue {
        #[command(subcommand)]
        command: QueueCommand,
    },
}

#[derive(Subcommand)]
enum QueueCommand {
    /// List requests awaiting a decision.
    List,

    /// Publish a decision for a pending request.
    Respond(queue::RespondArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = cli::load_config(args.config.as_deref())?;
    cli::apply_dir_overrides(&mut config, args.request_dir, args.response_dir);

    match args.command {
        Command::Request(request_args) => request::run_request(config, request_args).await?,
        Command::Queue { command } => match command {
            QueueCommand::List => queue::run_list(config).await?,
            QueueCommand::Respond(respond_args) => queue::run_respond(config, respond_args).await?,
        },
    }

    Ok(())
}
