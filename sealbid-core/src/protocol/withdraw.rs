use crate::error::{Result, SealBidError};
use crate::protocol::dto::{WithdrawSubmissionRequest, WithdrawSubmissionResponse};
use crate::protocol::TransactionContext;
use crate::store::LedgerStore;
use crate::types::SubmissionCommitment;

/// Retract an unrevealed commitment. The record is deleted and no submission
/// is created. The request's `owner` must be the caller; the lookup key is
/// derived from the caller identity either way.
pub async fn withdraw_submission<L: LedgerStore>(
    ctx: &TransactionContext<'_, L>,
    request: WithdrawSubmissionRequest,
) -> Result<WithdrawSubmissionResponse> {
    request.validate()?;

    if request.owner != ctx.caller() {
        return Err(SealBidError::validation(format!(
            "owner {} does not match calling identity {}",
            request.owner,
            ctx.caller()
        )));
    }

    let WithdrawSubmissionRequest {
        collection,
        hash,
        nonce,
        ..
    } = request;
    let owner = ctx.caller().to_string();

    let key = SubmissionCommitment::key_from_parts(&collection, &owner, &hash, &nonce);
    let entry: SubmissionCommitment = ctx.get_record(&key).await?;

    ctx.delete_record(&entry.chain_key()).await?;

    tracing::info!("Withdrew commitment {} for {}", entry.hash, entry.owner);

    Ok(WithdrawSubmissionResponse {
        collection,
        owner,
        hash,
        nonce,
    })
}
