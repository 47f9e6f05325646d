//! SealBid - Sealed-bid commit-reveal submission engine
//!
//! Users commit to a sealed bid (the SHA-256 digest of item/bid/nonce/salt),
//! later reveal it by disclosing the fields behind the digest, or withdraw an
//! unrevealed commitment. The engine runs against an injected ledger store
//! and enforces the hash-binding invariant on every reveal.

pub mod commitment;
pub mod error;
pub mod protocol;
pub mod store;
pub mod types;

pub use error::{Result, SealBidError};
pub use protocol::{
    commit_submission, reveal_submission, withdraw_submission, CommitSubmissionRequest,
    CommitSubmissionResponse, RevealSubmissionRequest, RevealSubmissionResponse,
    TransactionContext, WithdrawSubmissionRequest, WithdrawSubmissionResponse,
};
pub use store::{CompositeKey, LedgerStore, MemoryLedger, SqliteLedger};
pub use types::{Submission, SubmissionCommitment};

pub use rust_decimal::Decimal;
