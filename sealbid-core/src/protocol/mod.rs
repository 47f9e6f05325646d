pub mod commit;
pub mod dto;
pub mod reveal;
pub mod withdraw;

pub use commit::commit_submission;
pub use dto::{
    CommitSubmissionRequest, CommitSubmissionResponse, RevealSubmissionRequest,
    RevealSubmissionResponse, WithdrawSubmissionRequest, WithdrawSubmissionResponse,
};
pub use reveal::reveal_submission;
pub use withdraw::withdraw_submission;

use crate::error::Result;
use crate::store::{CompositeKey, LedgerStore};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Execution context for one protocol operation: the ledger it runs against
/// and the authenticated identity it runs as. Always passed explicitly.
pub struct TransactionContext<'a, L: LedgerStore> {
    ledger: &'a L,
    caller: String,
}

impl<'a, L: LedgerStore> TransactionContext<'a, L> {
    pub fn new(ledger: &'a L, caller: impl Into<String>) -> Self {
        Self {
            ledger,
            caller: caller.into(),
        }
    }

    /// Host-authenticated identity of the transaction submitter. Used as
    /// `owner` when deriving record keys.
    pub fn caller(&self) -> &str {
        &self.caller
    }

    pub fn ledger(&self) -> &L {
        self.ledger
    }

    pub(crate) async fn put_record<T: Serialize>(
        &self,
        key: &CompositeKey,
        record: &T,
    ) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.ledger.put(key, &json).await
    }

    pub(crate) async fn get_record<T: DeserializeOwned>(&self, key: &CompositeKey) -> Result<T> {
        let json = self.ledger.get(key).await?;
        Ok(serde_json::from_str(&json)?)
    }

    pub(crate) async fn delete_record(&self, key: &CompositeKey) -> Result<()> {
        self.ledger.delete(key).await
    }
}
