//! # Sale Repository
//!
//! Database operations for product sales.
//!
//! ## The Multi-Lot Write
//! A sell request that spans lots produces several `Sale` rows and
//! several stock decrements. They commit in ONE transaction:
//!
//! ```text
//! BEGIN
//!   UPDATE products SET stock = stock - n1 WHERE id = lot1 AND stock >= n1
//!   UPDATE products SET stock = stock - n2 WHERE id = lot2 AND stock >= n2
//!   INSERT INTO sales ... (one row per lot)
//! COMMIT            ── or ROLLBACK if any decrement matched no row
//! ```
//!
//! The `AND stock >= ?` guard is the compare-and-swap: if another
//! terminal drained a lot between the in-memory availability check and
//! this write, the decrement matches nothing, the whole transaction
//! rolls back, and no oversell or partial sale can be committed.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use invictus_core::Sale;

const COLUMNS: &str = "id, lot_id, product_name, quantity, buy_price_cents, \
                       sell_price_cents, total_cents, payment_method, user_name, created_at";

/// Repository for the `sales` table.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Persists one sell request: all stock decrements and all sale rows
    /// in a single transaction. Either everything commits or nothing
    /// does.
    ///
    /// `decrements` pairs each lot id with the units drawn from it, as
    /// reported by the ledger.
    pub async fn record_fifo_sale(
        &self,
        sales: &[Sale],
        decrements: &[(String, i64)],
    ) -> DbResult<()> {
        debug!(lots = decrements.len(), "Recording multi-lot sale");

        let mut tx = self.pool.begin().await?;

        for (lot_id, quantity) in decrements {
            let result = sqlx::query(
                "UPDATE products SET stock = stock - ?1 WHERE id = ?2 AND stock >= ?1",
            )
            .bind(quantity)
            .bind(lot_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                // Lot gone or drained under us; nothing committed.
                tx.rollback().await?;
                return Err(DbError::TransactionFailed(format!(
                    "stock changed under sale for lot {lot_id}"
                )));
            }
        }

        for sale in sales {
            sqlx::query(
                r#"
                INSERT INTO sales (
                    id, lot_id, product_name, quantity, buy_price_cents,
                    sell_price_cents, total_cents, payment_method, user_name, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )
            .bind(&sale.id)
            .bind(&sale.lot_id)
            .bind(&sale.product_name)
            .bind(sale.quantity)
            .bind(sale.buy_price_cents)
            .bind(sale.sell_price_cents)
            .bind(sale.total_cents)
            .bind(sale.payment_method)
            .bind(&sale.user_name)
            .bind(sale.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Lists every sale oldest-first.
    pub async fn list_all(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {COLUMNS} FROM sales ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Deletes every sale (weekly reset / full purge).
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM sales").execute(&self.pool).await?;

        debug!(rows = result.rows_affected(), "Wiped sales");
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
