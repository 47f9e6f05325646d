//! Commitment hashing for sealed bids.
//!
//! A sealed bid is the SHA-256 digest of `item/bid/nonce/salt`. Committing
//! the digest first and disclosing the fields later proves the bid was not
//! altered in between.

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

/// Field separator in the commitment preimage. Fields that enter the
/// concatenation must not contain it (enforced by request validation).
pub const SEPARATOR: char = '/';

/// Concatenate the sealed fields in fixed order: `item/bid/nonce/salt`.
pub fn concatenate_commitment(item: &str, bid: &Decimal, nonce: &str, salt: &str) -> String {
    format!("{item}{SEPARATOR}{bid}{SEPARATOR}{nonce}{SEPARATOR}{salt}")
}

/// Lowercase-hex SHA-256 digest of the UTF-8 bytes of a commitment string.
pub fn generate_hash(commitment: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(commitment.as_bytes());
    hex::encode(hasher.finalize())
}

/// Recompute the digest from the revealed fields and compare with the
/// candidate. Digests are public, so plain equality is enough.
pub fn verify_hash(candidate: &str, item: &str, bid: &Decimal, nonce: &str, salt: &str) -> bool {
    generate_hash(&concatenate_commitment(item, bid, nonce, salt)) == candidate
}

/// Syntactic check for a SHA-256 digest: 64 lowercase hex characters.
pub fn is_sha256_hex(hash: &str) -> bool {
    hash.len() == 64 && hash.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
