use crate::commitment;
use crate::store::CompositeKey;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A pending sealed bid: the digest is on record, the fields behind it are
/// not. Single-use — deleted when revealed or withdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionCommitment {
    pub collection: String,
    pub owner: String,
    pub hash: String,
    pub nonce: String,
}

impl SubmissionCommitment {
    pub const INDEX_KEY: &'static str = "submission-commitment";

    pub fn new(
        collection: impl Into<String>,
        owner: impl Into<String>,
        hash: impl Into<String>,
        nonce: impl Into<String>,
    ) -> Self {
        Self {
            collection: collection.into(),
            owner: owner.into(),
            hash: hash.into(),
            nonce: nonce.into(),
        }
    }

    /// Storage key: all four fields form the identity.
    pub fn chain_key(&self) -> CompositeKey {
        Self::key_from_parts(&self.collection, &self.owner, &self.hash, &self.nonce)
    }

    pub fn key_from_parts(collection: &str, owner: &str, hash: &str, nonce: &str) -> CompositeKey {
        CompositeKey::new(Self::INDEX_KEY, [collection, owner, hash, nonce])
    }
}

/// A revealed, permanently recorded bid. Created exactly once by a
/// successful reveal; there is no update or delete for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub collection: String,
    pub item: String,
    pub owner: String,
    pub bid: Decimal,
    pub commitment_nonce: String,
    pub commitment_hash: String,
    pub salt: String,
}

impl Submission {
    pub const INDEX_KEY: &'static str = "submission";

    pub fn chain_key(&self) -> CompositeKey {
        CompositeKey::new(
            Self::INDEX_KEY,
            [
                self.collection.as_str(),
                self.item.as_str(),
                self.owner.as_str(),
                self.commitment_nonce.as_str(),
            ],
        )
    }

    /// The commitment preimage this submission claims: `item/bid/nonce/salt`.
    pub fn concatenate_commitment(&self) -> String {
        commitment::concatenate_commitment(
            &self.item,
            &self.bid,
            &self.commitment_nonce,
            &self.salt,
        )
    }

    pub fn generate_hash(&self) -> String {
        commitment::generate_hash(&self.concatenate_commitment())
    }

    /// True when the given digest matches a recomputation from this
    /// submission's own fields. Never trusts `commitment_hash`.
    pub fn verify_hash(&self, hash: &str) -> bool {
        self.generate_hash() == hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_submission() -> Submission {
        Submission {
            collection: "test collection".to_string(),
            item: "test item".to_string(),
            owner: "client|abc".to_string(),
            bid: Decimal::from(100),
            commitment_nonce: "0".to_string(),
            commitment_hash: "f43c3cb6c01662028dce48ec947b35ef9fd68349d06255b5b3c38f586ca0fbb4"
                .to_string(),
            salt: "test salt".to_string(),
        }
    }

    #[test]
    fn test_concatenates_fields_into_commitment_string() {
        assert_eq!(
            valid_submission().concatenate_commitment(),
            "test item/100/0/test salt"
        );
    }

    #[test]
    fn test_generates_hash_from_own_fields() {
        let entry = valid_submission();
        assert_eq!(entry.generate_hash(), entry.commitment_hash);
        assert!(entry.verify_hash(&entry.commitment_hash));
    }

    #[test]
    fn test_verify_hash_rejects_foreign_digest() {
        let entry = valid_submission();
        let other = commitment::generate_hash("something else");
        assert!(!entry.verify_hash(&other));
    }

    #[test]
    fn test_commitment_key_covers_all_fields() {
        let entry = SubmissionCommitment::new("c1", "client|abc", "h", "n");
        assert_eq!(
            entry.chain_key(),
            SubmissionCommitment::key_from_parts("c1", "client|abc", "h", "n")
        );
        assert_ne!(
            entry.chain_key(),
            SubmissionCommitment::key_from_parts("c1", "client|abc", "h", "other")
        );
    }

    #[test]
    fn test_submission_serde_round_trip() {
        let entry = valid_submission();
        let json = serde_json::to_string(&entry).unwrap();
        let back: Submission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
        assert_eq!(back.bid.to_string(), "100");
    }
}
