use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::Confirm;
use sealbid_core::{
    commit_submission, reveal_submission, withdraw_submission, CommitSubmissionRequest, Decimal,
    LedgerStore, Result, RevealSubmissionRequest, SealBidError, TransactionContext,
    WithdrawSubmissionRequest,
};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum SubmissionCommands {
    /// Record a sealed bid digest
    Commit {
        /// Collection the submission belongs to
        #[arg(long)]
        collection: String,
        /// SHA-256 hex digest of item/bid/nonce/salt (see `sealbid hash generate`)
        #[arg(long)]
        hash: String,
        /// Commitment nonce; autogenerated when omitted
        #[arg(long)]
        nonce: Option<String>,
    },
    /// Disclose the fields behind a committed digest
    Reveal {
        #[arg(long)]
        collection: String,
        /// Item the bid is for
        #[arg(long)]
        item: String,
        /// Nonce used at commit time
        #[arg(long)]
        nonce: String,
        /// The committed digest
        #[arg(long)]
        hash: String,
        /// Salt used when sealing
        #[arg(long)]
        salt: String,
        /// Bid amount (positive decimal, revealed exactly as sealed)
        #[arg(long)]
        bid: String,
    },
    /// Delete an unrevealed commitment
    Withdraw {
        #[arg(long)]
        collection: String,
        /// The committed digest
        #[arg(long)]
        hash: String,
        /// Nonce used at commit time
        #[arg(long)]
        nonce: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn handle_submission_command<L: LedgerStore>(
    cmd: SubmissionCommands,
    ctx: &TransactionContext<'_, L>,
) -> Result<()> {
    match cmd {
        SubmissionCommands::Commit {
            collection,
            hash,
            nonce,
        } => {
            let unique_key = nonce.unwrap_or_else(|| Uuid::new_v4().to_string());

            let response = commit_submission(
                ctx,
                CommitSubmissionRequest {
                    collection,
                    hash,
                    unique_key,
                },
            )
            .await?;

            println!("Committed sealed bid:");
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Collection", "Owner", "Hash", "Nonce"]);
            table.add_row(vec![
                &response.collection,
                &response.owner,
                &response.hash,
                &response.nonce,
            ]);
            println!("{}", table);
            println!("Keep the nonce and the sealed fields; both are needed to reveal.");
        }

        SubmissionCommands::Reveal {
            collection,
            item,
            nonce,
            hash,
            salt,
            bid,
        } => {
            let bid = parse_bid(&bid)?;

            let response = reveal_submission(
                ctx,
                RevealSubmissionRequest {
                    collection,
                    item,
                    commitment_nonce: nonce,
                    commitment_hash: hash,
                    salt,
                    bid,
                    unique_key: Uuid::new_v4().to_string(),
                },
            )
            .await?;

            println!("Revealed submission:");
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Collection", "Item", "Owner", "Bid", "Nonce"]);
            table.add_row(vec![
                &response.collection,
                &response.item,
                &response.owner,
                &response.bid.to_string(),
                &response.commitment_nonce,
            ]);
            println!("{}", table);
        }

        SubmissionCommands::Withdraw {
            collection,
            hash,
            nonce,
            yes,
        } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Withdraw commitment {} (nonce {})? The sealed bid will be discarded",
                        hash, nonce
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| SealBidError::internal(format!("Prompt failed: {}", e)))?;

                if !confirmed {
                    println!("Withdraw cancelled");
                    return Ok(());
                }
            }

            let response = withdraw_submission(
                ctx,
                WithdrawSubmissionRequest {
                    collection,
                    owner: ctx.caller().to_string(),
                    hash,
                    nonce,
                    unique_key: Uuid::new_v4().to_string(),
                },
            )
            .await?;

            println!(
                "Withdrew commitment {} (nonce {}) from {}",
                response.hash, response.nonce, response.collection
            );
        }
    }

    Ok(())
}

fn parse_bid(raw: &str) -> Result<Decimal> {
    raw.parse()
        .map_err(|_| SealBidError::validation(format!("bid is not a decimal number: {}", raw)))
}
