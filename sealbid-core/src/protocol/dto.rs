//! Request and response shapes for the three protocol operations.
//!
//! Every request validates itself before the operation touches the store,
//! collecting all violated constraints into a single `Validation` error.

use crate::commitment::{self, SEPARATOR};
use crate::error::{Result, SealBidError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSubmissionRequest {
    pub collection: String,
    pub hash: String,
    /// Caller-supplied idempotency key; doubles as the commitment nonce.
    pub unique_key: String,
}

impl CommitSubmissionRequest {
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();
        require_non_empty(&mut violations, "collection", &self.collection);
        forbid_nul(&mut violations, "collection", &self.collection);
        require_sha256(&mut violations, "hash", &self.hash);
        require_non_empty(&mut violations, "unique_key", &self.unique_key);
        // unique_key becomes the commitment nonce and later enters the
        // reveal preimage, so the preimage restrictions apply here too.
        forbid_separator(&mut violations, "unique_key", &self.unique_key);
        finish(violations)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSubmissionResponse {
    pub collection: String,
    pub owner: String,
    pub hash: String,
    pub nonce: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealSubmissionRequest {
    pub collection: String,
    pub item: String,
    pub commitment_nonce: String,
    pub commitment_hash: String,
    pub salt: String,
    pub bid: Decimal,
    pub unique_key: String,
}

impl RevealSubmissionRequest {
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();
        require_non_empty(&mut violations, "collection", &self.collection);
        forbid_nul(&mut violations, "collection", &self.collection);
        require_non_empty(&mut violations, "item", &self.item);
        require_non_empty(&mut violations, "commitment_nonce", &self.commitment_nonce);
        require_sha256(&mut violations, "commitment_hash", &self.commitment_hash);
        require_non_empty(&mut violations, "salt", &self.salt);
        // These three enter the commitment preimage; an embedded separator
        // would let two distinct tuples concatenate identically.
        forbid_separator(&mut violations, "item", &self.item);
        forbid_separator(&mut violations, "commitment_nonce", &self.commitment_nonce);
        forbid_separator(&mut violations, "salt", &self.salt);
        if self.bid <= Decimal::ZERO {
            violations.push(format!("bid must be positive, got {}", self.bid));
        }
        require_non_empty(&mut violations, "unique_key", &self.unique_key);
        finish(violations)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealSubmissionResponse {
    pub collection: String,
    pub item: String,
    pub owner: String,
    pub commitment_nonce: String,
    pub commitment_hash: String,
    pub salt: String,
    pub bid: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawSubmissionRequest {
    pub collection: String,
    pub owner: String,
    pub hash: String,
    pub nonce: String,
    pub unique_key: String,
}

impl WithdrawSubmissionRequest {
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();
        require_non_empty(&mut violations, "collection", &self.collection);
        forbid_nul(&mut violations, "collection", &self.collection);
        require_non_empty(&mut violations, "owner", &self.owner);
        forbid_nul(&mut violations, "owner", &self.owner);
        require_sha256(&mut violations, "hash", &self.hash);
        require_non_empty(&mut violations, "nonce", &self.nonce);
        forbid_nul(&mut violations, "nonce", &self.nonce);
        require_non_empty(&mut violations, "unique_key", &self.unique_key);
        finish(violations)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawSubmissionResponse {
    pub collection: String,
    pub owner: String,
    pub hash: String,
    pub nonce: String,
}

fn require_non_empty(violations: &mut Vec<String>, field: &str, value: &str) {
    if value.is_empty() {
        violations.push(format!("{field} must not be empty"));
    }
}

fn require_sha256(violations: &mut Vec<String>, field: &str, value: &str) {
    if !commitment::is_sha256_hex(value) {
        violations.push(format!(
            "{field} must be a 64-character lowercase hex SHA-256 digest"
        ));
    }
}

/// Preimage fields must not contain the concatenation separator, and no key
/// field may contain NUL (reserved by the storage key encoding).
fn forbid_separator(violations: &mut Vec<String>, field: &str, value: &str) {
    if value.contains(SEPARATOR) {
        violations.push(format!("{field} must not contain '{SEPARATOR}'"));
    }
    forbid_nul(violations, field, value);
}

fn forbid_nul(violations: &mut Vec<String>, field: &str, value: &str) {
    if value.contains('\u{0}') {
        violations.push(format!("{field} must not contain NUL"));
    }
}

fn finish(violations: Vec<String>) -> Result<()> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(SealBidError::violations(violations))
    }
}
