pub mod memory;
pub mod sqlite;

pub use memory::MemoryLedger;
pub use sqlite::SqliteLedger;

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Separator between key parts in storage form. No valid field contains NUL
/// (validation rejects it), so rendered keys are unambiguous.
const KEY_SEPARATOR: char = '\u{0}';

/// Multi-field address of a record: an index name plus the ordered fields
/// that form the record's identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    index: String,
    parts: Vec<String>,
}

impl CompositeKey {
    pub fn new<I, S>(index: &str, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index: index.to_string(),
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// NUL-separated storage form, unique per (index, parts) tuple.
    pub fn to_storage_key(&self) -> String {
        let mut key = self.index.clone();
        for part in &self.parts {
            key.push(KEY_SEPARATOR);
            key.push_str(part);
        }
        key
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.index, self.parts.join(":"))
    }
}

/// The host ledger the engine runs against, injected explicitly rather than
/// reached through ambient state. Records are stored as JSON strings.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Persist a record, overwriting any existing record at the key.
    async fn put(&self, key: &CompositeKey, value: &str) -> Result<()>;

    /// Fetch a record by exact key. Fails with `NotFound` if absent.
    async fn get(&self, key: &CompositeKey) -> Result<String>;

    /// Remove a record. The engine always fetches before deleting.
    async fn delete(&self, key: &CompositeKey) -> Result<()>;
}
