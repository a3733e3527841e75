//! # Inventory Log Repository
//!
//! Database operations for the inventory audit trail. Writes are fired
//! best-effort by the store layer: a lost log entry is logged and
//! forgotten, never allowed to fail the operation it describes.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use invictus_core::InventoryLogEntry;

const COLUMNS: &str = "id, action, product_name, quantity, user_name, details, created_at";

/// Repository for the `inventory_log` table.
#[derive(Debug, Clone)]
pub struct InventoryLogRepository {
    pool: SqlitePool,
}

impl InventoryLogRepository {
    /// Creates a new InventoryLogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryLogRepository { pool }
    }

    /// Appends one audit entry.
    pub async fn insert(&self, entry: &InventoryLogEntry) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO inventory_log (
                id, action, product_name, quantity, user_name, details, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&entry.id)
        .bind(entry.action)
        .bind(&entry.product_name)
        .bind(entry.quantity)
        .bind(&entry.user_name)
        .bind(&entry.details)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists the audit trail, newest first (the history screen's order).
    pub async fn list_all(&self) -> DbResult<Vec<InventoryLogEntry>> {
        let entries = sqlx::query_as::<_, InventoryLogEntry>(&format!(
            "SELECT {COLUMNS} FROM inventory_log ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Deletes the whole audit trail (weekly reset / full purge).
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM inventory_log")
            .execute(&self.pool)
            .await?;

        debug!(rows = result.rows_affected(), "Wiped inventory_log");
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{Duration, Utc};
    use invictus_core::InventoryAction;
    use uuid::Uuid;

    fn entry(action: InventoryAction, minutes: i64) -> InventoryLogEntry {
        InventoryLogEntry {
            id: Uuid::new_v4().to_string(),
            action,
            product_name: "Wax".to_string(),
            quantity: 2,
            user_name: "admin".to_string(),
            details: "Received 2 units".to_string(),
            created_at: Utc::now() + Duration::minutes(minutes),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory_log();

        repo.insert(&entry(InventoryAction::Add, 0)).await.unwrap();
        repo.insert(&entry(InventoryAction::Sell, 1)).await.unwrap();

        let listed = repo.list_all().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].action, InventoryAction::Sell);
        assert_eq!(listed[1].action, InventoryAction::Add);
    }
}
