use crate::error::{Result, SealBidError};
use crate::store::{CompositeKey, LedgerStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// In-memory ledger for tests and embedding. Same contract as the SQLite
/// ledger, without the disk.
#[derive(Default)]
pub struct MemoryLedger {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn put(&self, key: &CompositeKey, value: &str) -> Result<()> {
        let mut records = self.records.lock().await;
        records.insert(key.to_storage_key(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &CompositeKey) -> Result<String> {
        let records = self.records.lock().await;
        records
            .get(&key.to_storage_key())
            .cloned()
            .ok_or_else(|| SealBidError::not_found(key.to_string()))
    }

    async fn delete(&self, key: &CompositeKey) -> Result<()> {
        let mut records = self.records.lock().await;
        records.remove(&key.to_storage_key());
        Ok(())
    }
}
