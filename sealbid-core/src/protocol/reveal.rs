use crate::error::{Result, SealBidError};
use crate::protocol::dto::{RevealSubmissionRequest, RevealSubmissionResponse};
use crate::protocol::TransactionContext;
use crate::store::LedgerStore;
use crate::types::{Submission, SubmissionCommitment};

/// Disclose the fields behind a sealed bid. The digest is recomputed from
/// the revealed fields and must match the stored commitment; only then is
/// the commitment consumed and the submission recorded. On any failure the
/// commitment is left untouched, so a correct reveal or a withdrawal can
/// still follow.
pub async fn reveal_submission<L: LedgerStore>(
    ctx: &TransactionContext<'_, L>,
    request: RevealSubmissionRequest,
) -> Result<RevealSubmissionResponse> {
    request.validate()?;

    let RevealSubmissionRequest {
        collection,
        item,
        commitment_nonce,
        commitment_hash,
        salt,
        bid,
        unique_key: _,
    } = request;
    let owner = ctx.caller().to_string();

    // Reveal only consumes the caller's own commitment: the lookup key is
    // derived from the caller identity, never from request data.
    let commitment_key = SubmissionCommitment::key_from_parts(
        &collection,
        &owner,
        &commitment_hash,
        &commitment_nonce,
    );
    let commitment: SubmissionCommitment = ctx.get_record(&commitment_key).await?;

    let submission = Submission {
        collection,
        item,
        owner,
        bid,
        commitment_nonce,
        commitment_hash,
        salt,
    };

    if !submission.verify_hash(&submission.commitment_hash) {
        return Err(SealBidError::hash_mismatch(format!(
            "Failed to validate commitment_hash against provided submission properties: \
             {}, generated hash: {}, commitment_hash: {}",
            submission.concatenate_commitment(),
            submission.generate_hash(),
            submission.commitment_hash,
        )));
    }

    ctx.delete_record(&commitment.chain_key()).await?;
    ctx.put_record(&submission.chain_key(), &submission).await?;

    tracing::info!(
        "Revealed submission for {} in {} (bid {})",
        submission.owner,
        submission.collection,
        submission.bid
    );

    Ok(RevealSubmissionResponse {
        collection: submission.collection,
        item: submission.item,
        owner: submission.owner,
        commitment_nonce: submission.commitment_nonce,
        commitment_hash: submission.commitment_hash,
        salt: submission.salt,
        bid: submission.bid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::{concatenate_commitment, generate_hash};
    use crate::protocol::commit::commit_submission;
    use crate::protocol::dto::CommitSubmissionRequest;
    use crate::store::MemoryLedger;
    use rust_decimal::Decimal;

    async fn commit_fixture(
        ctx: &TransactionContext<'_, MemoryLedger>,
        bid: Decimal,
    ) -> (String, RevealSubmissionRequest) {
        let salt = "test salt";
        let nonce = "nonce1";
        let hash = generate_hash(&concatenate_commitment("test item", &bid, nonce, salt));

        commit_submission(
            ctx,
            CommitSubmissionRequest {
                collection: "c1".to_string(),
                hash: hash.clone(),
                unique_key: nonce.to_string(),
            },
        )
        .await
        .unwrap();

        let request = RevealSubmissionRequest {
            collection: "c1".to_string(),
            item: "test item".to_string(),
            commitment_nonce: nonce.to_string(),
            commitment_hash: hash.clone(),
            salt: salt.to_string(),
            bid,
            unique_key: "u-reveal".to_string(),
        };

        (hash, request)
    }

    #[tokio::test]
    async fn test_commit_then_reveal_creates_submission() {
        let ledger = MemoryLedger::new();
        let ctx = TransactionContext::new(&ledger, "client|abc");
        let (hash, request) = commit_fixture(&ctx, Decimal::from(100)).await;

        let response = reveal_submission(&ctx, request).await.unwrap();

        assert_eq!(response.commitment_hash, hash);
        assert_eq!(response.owner, "client|abc");
        assert_eq!(response.bid, Decimal::from(100));

        // Commitment consumed, submission recorded.
        let commitment_key =
            SubmissionCommitment::key_from_parts("c1", "client|abc", &hash, "nonce1");
        assert!(matches!(
            ctx.get_record::<SubmissionCommitment>(&commitment_key).await,
            Err(SealBidError::NotFound(_))
        ));

        let submission: Submission = ctx
            .get_record(&Submission {
                collection: "c1".to_string(),
                item: "test item".to_string(),
                owner: "client|abc".to_string(),
                bid: Decimal::from(100),
                commitment_nonce: "nonce1".to_string(),
                commitment_hash: hash.clone(),
                salt: "test salt".to_string(),
            }
            .chain_key())
            .await
            .unwrap();
        assert_eq!(submission.commitment_hash, hash);
    }

    #[tokio::test]
    async fn test_reveal_with_wrong_bid_leaves_commitment_intact() {
        let ledger = MemoryLedger::new();
        let ctx = TransactionContext::new(&ledger, "client|abc");
        let (hash, mut request) = commit_fixture(&ctx, Decimal::from(100)).await;

        request.bid = Decimal::from(101);
        let result = reveal_submission(&ctx, request.clone()).await;
        assert!(matches!(result, Err(SealBidError::HashMismatch(_))));

        // Still revealable with the right bid.
        request.bid = Decimal::from(100);
        let response = reveal_submission(&ctx, request).await.unwrap();
        assert_eq!(response.commitment_hash, hash);
    }

    #[tokio::test]
    async fn test_second_reveal_fails_not_found() {
        let ledger = MemoryLedger::new();
        let ctx = TransactionContext::new(&ledger, "client|abc");
        let (_, request) = commit_fixture(&ctx, Decimal::from(100)).await;

        reveal_submission(&ctx, request.clone()).await.unwrap();
        assert!(matches!(
            reveal_submission(&ctx, request).await,
            Err(SealBidError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_reveal_without_commitment_fails_not_found() {
        let ledger = MemoryLedger::new();
        let ctx = TransactionContext::new(&ledger, "client|abc");
        let bid = Decimal::from(5);
        let hash = generate_hash(&concatenate_commitment("item", &bid, "n", "s"));

        let result = reveal_submission(
            &ctx,
            RevealSubmissionRequest {
                collection: "c1".to_string(),
                item: "item".to_string(),
                commitment_nonce: "n".to_string(),
                commitment_hash: hash,
                salt: "s".to_string(),
                bid,
                unique_key: "u1".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(SealBidError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_reveal_cannot_consume_another_callers_commitment() {
        let ledger = MemoryLedger::new();
        let owner_ctx = TransactionContext::new(&ledger, "client|abc");
        let (_, request) = commit_fixture(&owner_ctx, Decimal::from(100)).await;

        let intruder_ctx = TransactionContext::new(&ledger, "client|xyz");
        let result = reveal_submission(&intruder_ctx, request.clone()).await;
        assert!(matches!(result, Err(SealBidError::NotFound(_))));

        // The rightful owner is unaffected.
        assert!(reveal_submission(&owner_ctx, request).await.is_ok());
    }

    #[tokio::test]
    async fn test_mismatch_diagnostic_names_both_hashes() {
        let ledger = MemoryLedger::new();
        let ctx = TransactionContext::new(&ledger, "client|abc");
        let (hash, mut request) = commit_fixture(&ctx, Decimal::from(100)).await;

        request.bid = Decimal::from(999);
        let err = reveal_submission(&ctx, request).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("test item/999/nonce1/test salt"));
        assert!(message.contains(&hash));
    }
}
