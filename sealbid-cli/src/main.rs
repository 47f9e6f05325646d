mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::CliConfig;
use sealbid_core::{SealBidError, SqliteLedger, TransactionContext};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sealbid")]
#[command(about = "Sealed-bid commit-reveal submission ledger")]
#[command(version)]
struct Cli {
    /// Data directory for ledger storage
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Calling identity used as record owner (e.g. "client|abc")
    #[arg(short, long, global = true)]
    caller: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Commit, reveal, or withdraw sealed-bid submissions
    #[command(subcommand)]
    Submission(commands::SubmissionCommands),

    /// Client-side sealing helpers (compute and check commitment hashes)
    #[command(subcommand)]
    Hash(commands::HashCommands),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let defaults = CliConfig::default();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "sealbid={}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = cli.data_dir.unwrap_or(defaults.data_dir);
    let caller = cli.caller.unwrap_or(defaults.caller);

    let result = match cli.command {
        Commands::Submission(cmd) => {
            let db_path = data_dir.join("ledger.db");
            tracing::debug!("Using ledger at {}", db_path.display());
            let ledger = SqliteLedger::new(&db_path).await?;
            let ctx = TransactionContext::new(&ledger, caller);
            commands::handle_submission_command(cmd, &ctx).await
        }
        Commands::Hash(cmd) => commands::handle_hash_command(cmd),
    };

    if let Err(e) = result {
        match e {
            SealBidError::NotFound(key) => {
                eprintln!("Error: No commitment found at {}", key);
                eprintln!("Check the collection, hash, and nonce, and that the caller identity matches the committer");
            }
            SealBidError::HashMismatch(msg) => {
                eprintln!("Error: Revealed fields do not hash to the committed digest");
                eprintln!("{}", msg);
            }
            SealBidError::Validation(msg) => {
                eprintln!("Error: Invalid request: {}", msg);
            }
            _ => {
                eprintln!("Error: {}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
