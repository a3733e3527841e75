//! # Lot Repository
//!
//! Database operations for stock lots (the `products` table). A row is
//! one received batch; several rows may share a name with different cost
//! bases. `ORDER BY created_at` on reads reproduces the FIFO depletion
//! order the ledger works in.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use invictus_core::ProductLot;

const COLUMNS: &str = "id, name, stock, buy_price_cents, sell_price_cents, created_at";

/// Repository for the `products` table.
#[derive(Debug, Clone)]
pub struct LotRepository {
    pool: SqlitePool,
}

impl LotRepository {
    /// Creates a new LotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LotRepository { pool }
    }

    /// Inserts a received lot.
    pub async fn insert(&self, lot: &ProductLot) -> DbResult<()> {
        debug!(id = %lot.id, name = %lot.name, stock = lot.stock, "Inserting lot");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, stock, buy_price_cents, sell_price_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&lot.id)
        .bind(&lot.name)
        .bind(lot.stock)
        .bind(lot.buy_price_cents)
        .bind(lot.sell_price_cents)
        .bind(lot.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists every lot oldest-first — the FIFO order the ledger is
    /// rebuilt in at session start.
    pub async fn list_all(&self) -> DbResult<Vec<ProductLot>> {
        let lots = sqlx::query_as::<_, ProductLot>(&format!(
            "SELECT {COLUMNS} FROM products ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(lots)
    }

    /// Deletes one lot entirely.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting lot");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Lot", id));
        }

        Ok(())
    }

    /// Rewrites the sell price on every lot of a product — the bulk
    /// update behind the explicit edit-sell-price operation. Returns
    /// how many rows changed (zero is fine: the name may have no lots
    /// left while still being in the catalog).
    pub async fn update_sell_price(&self, name: &str, sell_price_cents: i64) -> DbResult<u64> {
        debug!(name = %name, price = sell_price_cents, "Bulk sell price update");

        let result = sqlx::query("UPDATE products SET sell_price_cents = ?2 WHERE name = ?1")
            .bind(name)
            .bind(sell_price_cents)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Deletes every lot (weekly reset / full purge).
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await?;

        debug!(rows = result.rows_affected(), "Wiped products");
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
