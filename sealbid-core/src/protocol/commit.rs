use crate::error::Result;
use crate::protocol::dto::{CommitSubmissionRequest, CommitSubmissionResponse};
use crate::protocol::TransactionContext;
use crate::store::LedgerStore;
use crate::types::SubmissionCommitment;

/// Record a sealed bid. The caller supplies only the digest; the fields
/// behind it stay with the caller until reveal. The request's `unique_key`
/// becomes the commitment nonce.
pub async fn commit_submission<L: LedgerStore>(
    ctx: &TransactionContext<'_, L>,
    request: CommitSubmissionRequest,
) -> Result<CommitSubmissionResponse> {
    request.validate()?;

    let CommitSubmissionRequest {
        collection,
        hash,
        unique_key: nonce,
    } = request;
    let owner = ctx.caller().to_string();

    let entry = SubmissionCommitment::new(&collection, &owner, &hash, &nonce);
    ctx.put_record(&entry.chain_key(), &entry).await?;

    tracing::info!("Stored sealed commitment {} for {}", entry.hash, entry.owner);

    Ok(CommitSubmissionResponse {
        collection,
        owner,
        hash,
        nonce,
    })
}
