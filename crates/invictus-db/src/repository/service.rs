//! # Service Repository
//!
//! Database operations for recorded barber services (the persisted
//! revenue splits). Rows are append-only: inserted once, read for the
//! register and the earnings views, and removed only by the bulk
//! resets.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use invictus_core::ServiceRecord;

const COLUMNS: &str = "id, barber_name, barber_cents, admin_cents, tip_cents, \
                       total_cents, payment_method, notes, created_at";

/// Repository for the `barber_services` table.
#[derive(Debug, Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    /// Creates a new ServiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ServiceRepository { pool }
    }

    /// Inserts a recorded service.
    pub async fn insert(&self, record: &ServiceRecord) -> DbResult<()> {
        debug!(id = %record.id, barber = %record.barber_name, "Inserting service record");

        sqlx::query(
            r#"
            INSERT INTO barber_services (
                id, barber_name, barber_cents, admin_cents, tip_cents,
                total_cents, payment_method, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&record.id)
        .bind(&record.barber_name)
        .bind(record.barber_cents)
        .bind(record.admin_cents)
        .bind(record.tip_cents)
        .bind(record.total_cents)
        .bind(record.payment_method)
        .bind(&record.notes)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists every recorded service, oldest first (the order they were
    /// submitted in, which the session cache preserves).
    pub async fn list_all(&self) -> DbResult<Vec<ServiceRecord>> {
        let records = sqlx::query_as::<_, ServiceRecord>(&format!(
            "SELECT {COLUMNS} FROM barber_services ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Deletes every recorded service (register wipe / weekly reset).
    /// Returns how many rows were removed.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM barber_services")
            .execute(&self.pool)
            .await?;

        debug!(rows = result.rows_affected(), "Wiped barber_services");
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
    use chrono::Utc;
    use invictus_core::PaymentMethod;
    use uuid::Uuid;

    fn record(barber: &str) -> ServiceRecord {
        ServiceRecord {
            id: Uuid::new_v4().to_string(),
            barber_name: barber.to_string(),
            barber_cents: 2000,
            admin_cents: 1500,
            tip_cents: 500,
            total_cents: 3500,
            payment_method: PaymentMethod::Transfer,
            notes: Some("regular customer".to_string()),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.services();

        repo.insert(&record("Barbero 1")).await.unwrap();
        repo.insert(&record("Barbero 2")).await.unwrap();

        let listed = repo.list_all().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].payment_method, PaymentMethod::Transfer);
        assert_eq!(listed[0].total_cents, 3500);
        assert_eq!(listed[0].notes.as_deref(), Some("regular customer"));
    }

    #[tokio::test]
    async fn test_delete_all() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.services();

        repo.insert(&record("Barbero 1")).await.unwrap();
        let removed = repo.delete_all().await.unwrap();
        assert_eq!(removed, 1);
        assert!(repo.list_all().await.unwrap().is_empty());
    }
}
