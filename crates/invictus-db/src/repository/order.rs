//! # Order Repository
//!
//! Database operations for customer tabs. Line items are stored as a
//! JSON array in the `items` column (they are only ever read back as a
//! whole tab, never queried individually), so rows are mapped by hand
//! instead of `FromRow`.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use invictus_core::{Order, OrderItem};

const COLUMNS: &str = "id, client_name, items, beard_service, beard_service_cents, \
                       tip_cents, total_cents, is_paid, created_at, updated_at";

/// Repository for the `orders` table.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a newly opened tab.
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        debug!(id = %order.id, client = %order.client_name, "Inserting order");

        let items = serde_json::to_string(&order.items)?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, client_name, items, beard_service, beard_service_cents,
                tip_cents, total_cents, is_paid, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&order.id)
        .bind(&order.client_name)
        .bind(items)
        .bind(order.beard_service)
        .bind(order.beard_service_cents)
        .bind(order.tip_cents)
        .bind(order.total_cents)
        .bind(order.is_paid)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Rewrites an open tab (items, service, tip, total, client name).
    pub async fn update(&self, order: &Order) -> DbResult<()> {
        debug!(id = %order.id, "Updating order");

        let items = serde_json::to_string(&order.items)?;

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                client_name = ?2,
                items = ?3,
                beard_service = ?4,
                beard_service_cents = ?5,
                tip_cents = ?6,
                total_cents = ?7,
                updated_at = ?8
            WHERE id = ?1 AND is_paid = 0
            "#,
        )
        .bind(&order.id)
        .bind(&order.client_name)
        .bind(items)
        .bind(order.beard_service)
        .bind(order.beard_service_cents)
        .bind(order.tip_cents)
        .bind(order.total_cents)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Open order", &order.id));
        }

        Ok(())
    }

    /// Settles a tab. Paid tabs leave the open list but stay for
    /// history.
    pub async fn mark_paid(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Marking order paid");

        let result = sqlx::query("UPDATE orders SET is_paid = 1 WHERE id = ?1 AND is_paid = 0")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Open order", id));
        }

        Ok(())
    }

    /// Lists open (unpaid) tabs, newest first.
    pub async fn list_unpaid(&self) -> DbResult<Vec<Order>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM orders WHERE is_paid = 0 ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_order).collect()
    }
}

/// Maps one row, decoding the JSON items column.
fn map_order(row: &SqliteRow) -> DbResult<Order> {
    let items: Vec<OrderItem> = serde_json::from_str(row.try_get("items")?)?;

    Ok(Order {
        id: row.try_get("id")?,
        client_name: row.try_get("client_name")?,
        items,
        beard_service: row.try_get("beard_service")?,
        beard_service_cents: row.try_get("beard_service_cents")?,
        tip_cents: row.try_get("tip_cents")?,
        total_cents: row.try_get("total_cents")?,
        is_paid: row.try_get("is_paid")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use uuid::Uuid;

    fn order(client: &str) -> Order {
        let now = Utc::now();
        Order {
            id: Uuid::new_v4().to_string(),
            client_name: client.to_string(),
            items: vec![OrderItem {
                name: "Wax".to_string(),
                sell_price_cents: 2000,
                quantity: 2,
            }],
            beard_service: true,
            beard_service_cents: 15000,
            tip_cents: 1000,
            total_cents: 20000,
            is_paid: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.orders();

        repo.insert(&order("Carlos")).await.unwrap();
        let open = repo.list_unpaid().await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].client_name, "Carlos");
        assert_eq!(open[0].items.len(), 1);
        assert_eq!(open[0].items[0].quantity, 2);
        assert!(open[0].beard_service);
    }

    #[tokio::test]
    async fn test_update_open_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.orders();

        let mut o = order("Carlos");
        repo.insert(&o).await.unwrap();

        o.items.push(OrderItem {
            name: "Shampoo".to_string(),
            sell_price_cents: 3500,
            quantity: 1,
        });
        o.total_cents = 23500;
        repo.update(&o).await.unwrap();

        let open = repo.list_unpaid().await.unwrap();
        assert_eq!(open[0].items.len(), 2);
        assert_eq!(open[0].total_cents, 23500);
    }

    #[tokio::test]
    async fn test_mark_paid_leaves_open_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.orders();

        let o = order("Carlos");
        repo.insert(&o).await.unwrap();
        repo.mark_paid(&o.id).await.unwrap();

        assert!(repo.list_unpaid().await.unwrap().is_empty());
        // Settled once; a second settle is a NotFound.
        assert!(matches!(
            repo.mark_paid(&o.id).await,
            Err(DbError::NotFound { .. })
        ));
        // And a paid tab can no longer be rewritten.
        assert!(matches!(repo.update(&o).await, Err(DbError::NotFound { .. })));
    }
}
