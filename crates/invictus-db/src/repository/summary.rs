//! # Weekly Summary Repository
//!
//! Database operations for the weekly archive, including the reset
//! itself.
//!
//! ## The Archive-and-Wipe Transaction
//! Closing a week snapshots the aggregates and empties the transactional
//! tables in ONE transaction:
//!
//! ```text
//! BEGIN
//!   INSERT INTO weekly_summaries ...
//!   DELETE FROM barber_services
//!   DELETE FROM sales
//!   DELETE FROM products
//!   DELETE FROM inventory_log
//! COMMIT
//! ```
//!
//! Either the summary exists and the week is wiped, or neither happened.
//! A crash mid-reset can never leave the archive missing a week whose
//! records are already gone.
//!
//! The per-barber earnings map is stored as a JSON object column (it is
//! only ever read back whole), so rows are mapped by hand instead of
//! `FromRow`.

use std::collections::BTreeMap;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::error::DbResult;
use invictus_core::WeeklySummary;

const COLUMNS: &str = "id, week_start, week_end, barber_earnings, \
                       product_sales_cents, admin_cents, total_cents, created_at";

/// Repository for the `weekly_summaries` table.
#[derive(Debug, Clone)]
pub struct WeeklySummaryRepository {
    pool: SqlitePool,
}

impl WeeklySummaryRepository {
    /// Creates a new WeeklySummaryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        WeeklySummaryRepository { pool }
    }

    /// Inserts one archived week.
    pub async fn insert(&self, summary: &WeeklySummary) -> DbResult<()> {
        debug!(id = %summary.id, week_start = %summary.week_start, "Inserting weekly summary");

        let earnings = serde_json::to_string(&summary.barber_earnings)?;

        sqlx::query(
            r#"
            INSERT INTO weekly_summaries (
                id, week_start, week_end, barber_earnings,
                product_sales_cents, admin_cents, total_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&summary.id)
        .bind(summary.week_start)
        .bind(summary.week_end)
        .bind(earnings)
        .bind(summary.product_sales_cents)
        .bind(summary.admin_cents)
        .bind(summary.total_cents)
        .bind(summary.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Archives a week and wipes the transactional tables in a single
    /// transaction.
    pub async fn archive_and_reset(&self, summary: &WeeklySummary) -> DbResult<()> {
        info!(
            week_start = %summary.week_start,
            week_end = %summary.week_end,
            total = summary.total_cents,
            "Closing week"
        );

        let earnings = serde_json::to_string(&summary.barber_earnings)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO weekly_summaries (
                id, week_start, week_end, barber_earnings,
                product_sales_cents, admin_cents, total_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&summary.id)
        .bind(summary.week_start)
        .bind(summary.week_end)
        .bind(earnings)
        .bind(summary.product_sales_cents)
        .bind(summary.admin_cents)
        .bind(summary.total_cents)
        .bind(summary.created_at)
        .execute(&mut *tx)
        .await?;

        for table in ["barber_services", "sales", "products", "inventory_log"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        info!("Week archived and transactional tables wiped");
        Ok(())
    }

    /// Lists archived weeks, newest first (the weekly history screen's
    /// order).
    pub async fn list_all(&self) -> DbResult<Vec<WeeklySummary>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM weekly_summaries ORDER BY week_start DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_summary).collect()
    }
}

/// Maps one row, decoding the JSON earnings column.
fn map_summary(row: &SqliteRow) -> DbResult<WeeklySummary> {
    let barber_earnings: BTreeMap<String, i64> =
        serde_json::from_str(row.try_get("barber_earnings")?)?;

    Ok(WeeklySummary {
        id: row.try_get("id")?,
        week_start: row.try_get("week_start")?,
        week_end: row.try_get("week_end")?,
        barber_earnings,
        product_sales_cents: row.try_get("product_sales_cents")?,
        admin_cents: row.try_get("admin_cents")?,
        total_cents: row.try_get("total_cents")?,
        created_at: row.try_get("created_at")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
