use crate::error::{Result, SealBidError};
use crate::store::{CompositeKey, LedgerStore};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tokio::sync::Mutex;

/// On-disk ledger backed by a single SQLite connection. The connection mutex
/// serializes all reads and writes, which is what keeps a reveal's
/// get/delete/put sequence from interleaving with another caller's.
pub struct SqliteLedger {
    conn: Mutex<Connection>,
}

impl SqliteLedger {
    pub async fn new(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SealBidError::internal(format!("Failed to create directory: {}", e)))?;
        }

        let conn = Connection::open(db_path)?;
        let ledger = Self {
            conn: Mutex::new(conn),
        };

        ledger.init_schema().await?;
        Ok(ledger)
    }

    async fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().await;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS records (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }
}

#[async_trait]
impl LedgerStore for SqliteLedger {
    async fn put(&self, key: &CompositeKey, value: &str) -> Result<()> {
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT OR REPLACE INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key.to_storage_key(), value, Utc::now().timestamp()],
        )?;

        Ok(())
    }

    async fn get(&self, key: &CompositeKey) -> Result<String> {
        let conn = self.conn.lock().await;

        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM records WHERE key = ?1",
                params![key.to_storage_key()],
                |row| row.get(0),
            )
            .optional()?;

        value.ok_or_else(|| SealBidError::not_found(key.to_string()))
    }

    async fn delete(&self, key: &CompositeKey) -> Result<()> {
        let conn = self.conn.lock().await;

        conn.execute(
            "DELETE FROM records WHERE key = ?1",
            params![key.to_storage_key()],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_put_get_delete_round_trip() {
        let temp_dir = tempdir().unwrap();
        let ledger = SqliteLedger::new(&temp_dir.path().join("ledger.db"))
            .await
            .unwrap();

        let key = CompositeKey::new("submission-commitment", ["c1", "o1", "h1", "n1"]);

        ledger.put(&key, r#"{"field":"value"}"#).await.unwrap();
        assert_eq!(ledger.get(&key).await.unwrap(), r#"{"field":"value"}"#);

        ledger.delete(&key).await.unwrap();
        assert!(matches!(
            ledger.get(&key).await,
            Err(SealBidError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_record() {
        let temp_dir = tempdir().unwrap();
        let ledger = SqliteLedger::new(&temp_dir.path().join("ledger.db"))
            .await
            .unwrap();

        let key = CompositeKey::new("submission", ["c1", "i1", "o1", "n1"]);

        ledger.put(&key, "first").await.unwrap();
        ledger.put(&key, "second").await.unwrap();
        assert_eq!(ledger.get(&key).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_missing_key_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let ledger = SqliteLedger::new(&temp_dir.path().join("ledger.db"))
            .await
            .unwrap();

        let key = CompositeKey::new("submission", ["absent"]);
        assert!(matches!(
            ledger.get(&key).await,
            Err(SealBidError::NotFound(_))
        ));
    }
}
