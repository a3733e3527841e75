//! # The Shop Store
//!
//! The operation boundary the interface layer calls into. One owned
//! store object per session — no ambient module state — holding the
//! session cache, the database handle, and the role checks.
//!
//! ## Mutate-Then-Persist Sequencing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  sell_product("Wax", 4)                                             │
//! │                                                                     │
//! │  1. lock cache        ── one operation at a time (critical section) │
//! │  2. role check        ── Forbidden before anything is touched       │
//! │  3. scratch = ledger.clone()                                        │
//! │  4. scratch.sell(...) ── core rules run on the COPY                 │
//! │  5. persist           ── single transaction, CAS stock guard        │
//! │  6. ledger = scratch  ── commit to cache ONLY after persist         │
//! │  7. audit log         ── best-effort, never fails the sale          │
//! │                                                                     │
//! │  A persistence failure aborts at 5: the cache still holds the       │
//! │  pre-sale state, so memory and storage never disagree.              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The persistence layer is the system of record; the cache is refreshed
//! from it at session start ([`Shop::open`]) and kept in step by the
//! commit discipline above.

use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use invictus_core::report;
use invictus_core::validation::validate_name;
use invictus_core::{
    compute_split, Capability, GroupedProduct, InventoryLedger, InventoryLogEntry, Money, Order,
    PaymentMethod, ProductLot, Role, Sale, ServiceRecord, ServiceTicket, WeeklySummary,
};
use invictus_db::Database;
use serde::{Deserialize, Serialize};

use crate::config::ShopConfig;
use crate::error::ApiError;
use crate::export;

// =============================================================================
// View Models
// =============================================================================

/// One row of the earnings grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarberEarnings {
    pub name: String,
    pub total_cents: i64,
}

/// The earnings screen: per-barber totals plus the shop-level figures.
///
/// Reconciliation invariant: Σ barber totals + admin + product revenue
/// equals `grand_total_cents` (tips are already inside barber totals).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsOverview {
    pub barbers: Vec<BarberEarnings>,
    pub admin_cents: i64,
    pub tips_cents: i64,
    pub product_revenue_cents: i64,
    pub product_profit_cents: i64,
    pub grand_total_cents: i64,
}

/// A tab submission from the order form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub client_name: String,
    pub items: Vec<invictus_core::OrderItem>,
    pub beard_service: bool,
    pub beard_service_cents: i64,
    pub tip_cents: i64,
}

// =============================================================================
// Session Cache
// =============================================================================

/// In-memory working copy of the transactional records.
#[derive(Debug, Default)]
struct SessionCache {
    /// Recorded services, oldest first.
    services: Vec<ServiceRecord>,
    /// Product sales, oldest first.
    sales: Vec<Sale>,
    /// Stock lots + catalog.
    ledger: InventoryLedger,
}

// =============================================================================
// The Store
// =============================================================================

/// The shop's operation boundary.
///
/// Cheap to share behind an `Arc`; every operation serializes on the
/// internal cache lock, which makes each mutate-then-persist sequence a
/// critical section.
#[derive(Debug)]
pub struct Shop {
    db: Database,
    config: ShopConfig,
    cache: Mutex<SessionCache>,
}

impl Shop {
    /// Opens a shop session: connects the cache to the system of record.
    pub async fn open(db: Database, config: ShopConfig) -> Result<Shop, ApiError> {
        let services = db.services().list_all().await?;
        let lots = db.lots().list_all().await?;
        let sales = db.sales().list_all().await?;

        info!(
            services = services.len(),
            lots = lots.len(),
            sales = sales.len(),
            "Shop session opened"
        );

        Ok(Shop {
            db,
            config,
            cache: Mutex::new(SessionCache {
                services,
                sales,
                ledger: InventoryLedger::from_lots(lots),
            }),
        })
    }

    /// The shop configuration this session runs with.
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// The single access-control check, done once at the boundary.
    fn require(&self, role: Role, capability: Capability, operation: &str) -> Result<(), ApiError> {
        if role.allows(capability) {
            Ok(())
        } else {
            debug!(?role, ?capability, operation, "Capability denied");
            Err(ApiError::forbidden(operation))
        }
    }

    /// Fires an audit log write without letting it fail the operation it
    /// records.
    async fn log_best_effort(&self, entry: &InventoryLogEntry) {
        if let Err(err) = self.db.inventory_log().insert(entry).await {
            warn!(error = %err, action = ?entry.action, "Audit log write failed");
        }
    }

    // -------------------------------------------------------------------------
    // Services
    // -------------------------------------------------------------------------

    /// Records a service: split, persist, merge into the session cache.
    pub async fn record_service(
        &self,
        role: Role,
        ticket: ServiceTicket,
    ) -> Result<ServiceRecord, ApiError> {
        self.require(role, Capability::RecordService, "record services")?;

        let mut cache = self.cache.lock().await;

        let split = compute_split(&ticket)?;
        let record = ServiceRecord {
            id: Uuid::new_v4().to_string(),
            barber_name: ticket.barber_name.trim().to_string(),
            barber_cents: split.barber.cents(),
            admin_cents: split.admin.cents(),
            tip_cents: split.tip.cents(),
            total_cents: split.total.cents(),
            payment_method: ticket.payment_method,
            notes: ticket.notes.clone(),
            created_at: Utc::now(),
        };

        self.db.services().insert(&record).await?;
        cache.services.push(record.clone());

        info!(
            barber = %record.barber_name,
            total = record.total_cents,
            "Service recorded"
        );
        Ok(record)
    }

    // -------------------------------------------------------------------------
    // Inventory
    // -------------------------------------------------------------------------

    /// Receives a lot into stock.
    pub async fn add_lot(
        &self,
        role: Role,
        name: &str,
        quantity: i64,
        total_buy_cost_cents: i64,
        sell_price_cents: Option<i64>,
        user_name: &str,
    ) -> Result<ProductLot, ApiError> {
        self.require(role, Capability::ManageInventory, "manage inventory")?;

        let mut cache = self.cache.lock().await;

        let mut scratch = cache.ledger.clone();
        let receipt = scratch.add_lot(
            name,
            quantity,
            Money::from_cents(total_buy_cost_cents),
            sell_price_cents.map(Money::from_cents),
            user_name,
            Utc::now(),
        )?;

        self.db.lots().insert(&receipt.lot).await?;
        cache.ledger = scratch;

        self.log_best_effort(&receipt.log).await;

        info!(name = %receipt.lot.name, stock = receipt.lot.stock, "Lot received");
        Ok(receipt.lot)
    }

    /// Deletes one lot entirely, whatever its remaining stock.
    pub async fn remove_lot(
        &self,
        role: Role,
        index: usize,
        user_name: &str,
    ) -> Result<(), ApiError> {
        self.require(role, Capability::RemoveLot, "remove lots")?;

        let mut cache = self.cache.lock().await;

        let mut scratch = cache.ledger.clone();
        let removal = scratch.remove_lot(index, user_name, Utc::now())?;

        self.db.lots().delete(&removal.lot.id).await?;
        cache.ledger = scratch;

        self.log_best_effort(&removal.log).await;

        info!(name = %removal.lot.name, "Lot removed");
        Ok(())
    }

    /// Changes a product's advertised sell price, rewriting the catalog
    /// and every existing lot of that name.
    pub async fn edit_sell_price(
        &self,
        role: Role,
        name: &str,
        new_price_cents: i64,
        user_name: &str,
    ) -> Result<(), ApiError> {
        self.require(role, Capability::EditPrices, "edit prices")?;

        let mut cache = self.cache.lock().await;

        let mut scratch = cache.ledger.clone();
        let change =
            scratch.edit_sell_price(name, Money::from_cents(new_price_cents), user_name, Utc::now())?;

        self.db
            .lots()
            .update_sell_price(name.trim(), new_price_cents)
            .await?;
        cache.ledger = scratch;

        self.log_best_effort(&change.log).await;

        info!(name = %name.trim(), price = new_price_cents, lots = change.lots_touched, "Sell price edited");
        Ok(())
    }

    /// Sells units of a product, oldest lot first. All-or-nothing: the
    /// in-memory availability check and the per-lot stock guard in the
    /// persistence transaction both refuse before anything is committed.
    pub async fn sell_product(
        &self,
        role: Role,
        name: &str,
        quantity: i64,
        payment_method: PaymentMethod,
        user_name: &str,
    ) -> Result<Vec<Sale>, ApiError> {
        self.require(role, Capability::SellProducts, "sell products")?;

        let mut cache = self.cache.lock().await;

        let mut scratch = cache.ledger.clone();
        let outcome = scratch.sell(name, quantity, payment_method, user_name, Utc::now())?;

        self.db
            .sales()
            .record_fifo_sale(&outcome.sales, &outcome.decrements())
            .await?;
        cache.ledger = scratch;
        cache.sales.extend(outcome.sales.iter().cloned());

        for log in &outcome.logs {
            self.log_best_effort(log).await;
        }

        info!(
            name = %name,
            units = outcome.units(),
            lots = outcome.sales.len(),
            revenue = outcome.revenue().cents(),
            "Products sold"
        );
        Ok(outcome.sales)
    }

    // -------------------------------------------------------------------------
    // Orders (customer tabs)
    // -------------------------------------------------------------------------

    /// Opens or updates a tab. At most one open tab exists per client
    /// name (case-insensitive): submitting again rewrites the open tab
    /// instead of duplicating it.
    pub async fn submit_order(&self, role: Role, draft: OrderDraft) -> Result<Order, ApiError> {
        self.require(role, Capability::ManageOrders, "manage orders")?;

        let client_name = validate_name(&draft.client_name, "client name")?;

        let items_total: Money = draft.items.iter().map(|i| i.line_total()).sum();
        let total = items_total
            + Money::from_cents(draft.beard_service_cents)
            + Money::from_cents(draft.tip_cents);

        let now = Utc::now();
        let wanted = client_name.to_lowercase();
        let open = self.db.orders().list_unpaid().await?;

        if let Some(existing) = open
            .into_iter()
            .find(|o| o.client_name.to_lowercase() == wanted)
        {
            let updated = Order {
                client_name,
                items: draft.items,
                beard_service: draft.beard_service,
                beard_service_cents: draft.beard_service_cents,
                tip_cents: draft.tip_cents,
                total_cents: total.cents(),
                updated_at: now,
                ..existing
            };
            self.db.orders().update(&updated).await?;
            info!(client = %updated.client_name, "Open tab updated");
            Ok(updated)
        } else {
            let order = Order {
                id: Uuid::new_v4().to_string(),
                client_name,
                items: draft.items,
                beard_service: draft.beard_service,
                beard_service_cents: draft.beard_service_cents,
                tip_cents: draft.tip_cents,
                total_cents: total.cents(),
                is_paid: false,
                created_at: now,
                updated_at: now,
            };
            self.db.orders().insert(&order).await?;
            info!(client = %order.client_name, total = order.total_cents, "Tab opened");
            Ok(order)
        }
    }

    /// Settles a tab. Tabs never touch stock; settlement through the
    /// sell flow stays a separate, manual step.
    pub async fn mark_order_paid(&self, role: Role, order_id: &str) -> Result<(), ApiError> {
        self.require(role, Capability::ManageOrders, "manage orders")?;

        self.db.orders().mark_paid(order_id).await?;
        info!(id = %order_id, "Tab settled");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Read-only projections
    // -------------------------------------------------------------------------

    /// The inventory table: lots collapsed by product name.
    pub async fn inventory_view(&self, role: Role) -> Result<Vec<GroupedProduct>, ApiError> {
        self.require(role, Capability::ManageInventory, "view inventory")?;
        Ok(self.cache.lock().await.ledger.grouped())
    }

    /// The per-lot listing (what `remove_lot` indexes into).
    pub async fn lot_view(&self, role: Role) -> Result<Vec<ProductLot>, ApiError> {
        self.require(role, Capability::ManageInventory, "view inventory")?;
        Ok(self.cache.lock().await.ledger.lots().to_vec())
    }

    /// The earnings screen.
    pub async fn earnings_overview(&self, role: Role) -> Result<EarningsOverview, ApiError> {
        self.require(role, Capability::ViewEarnings, "view earnings")?;

        let cache = self.cache.lock().await;
        let mut by_barber = report::earnings_by_barber(&cache.services);

        // Rostered barbers first (zero rows included), then anyone else
        // who appears in the records.
        let mut barbers: Vec<BarberEarnings> = self
            .config
            .barbers
            .iter()
            .map(|name| BarberEarnings {
                name: name.clone(),
                total_cents: by_barber.remove(name).unwrap_or_default().cents(),
            })
            .collect();
        barbers.extend(by_barber.into_iter().map(|(name, total)| BarberEarnings {
            name,
            total_cents: total.cents(),
        }));

        Ok(EarningsOverview {
            barbers,
            admin_cents: report::admin_total(&cache.services).cents(),
            tips_cents: report::tips_total(&cache.services).cents(),
            product_revenue_cents: report::product_revenue(&cache.sales).cents(),
            product_profit_cents: report::product_profit(&cache.sales).cents(),
            grand_total_cents: report::grand_total(&cache.services, &cache.sales).cents(),
        })
    }

    /// The raw service register, optionally filtered to one barber.
    pub async fn service_history(
        &self,
        role: Role,
        barber: Option<&str>,
    ) -> Result<Vec<ServiceRecord>, ApiError> {
        self.require(role, Capability::ViewRegister, "view the register")?;

        let cache = self.cache.lock().await;
        Ok(match barber {
            Some(name) => cache
                .services
                .iter()
                .filter(|r| r.barber_name == name)
                .cloned()
                .collect(),
            None => cache.services.clone(),
        })
    }

    /// All product sales this week, oldest first.
    pub async fn sales_history(&self, role: Role) -> Result<Vec<Sale>, ApiError> {
        self.require(role, Capability::ViewHistory, "view history")?;
        Ok(self.cache.lock().await.sales.clone())
    }

    /// The inventory audit trail, newest first.
    pub async fn inventory_history(&self, role: Role) -> Result<Vec<InventoryLogEntry>, ApiError> {
        self.require(role, Capability::ViewHistory, "view history")?;
        Ok(self.db.inventory_log().list_all().await?)
    }

    /// Open (unpaid) tabs, newest first.
    pub async fn open_orders(&self, role: Role) -> Result<Vec<Order>, ApiError> {
        self.require(role, Capability::ManageOrders, "manage orders")?;
        Ok(self.db.orders().list_unpaid().await?)
    }

    /// Archived weeks, newest first.
    pub async fn weekly_history(&self, role: Role) -> Result<Vec<WeeklySummary>, ApiError> {
        self.require(role, Capability::ViewHistory, "view history")?;
        Ok(self.db.weekly_summaries().list_all().await?)
    }

    // -------------------------------------------------------------------------
    // CSV exports
    // -------------------------------------------------------------------------

    /// The earnings summary CSV, with its reconciling TOTAL row.
    pub async fn export_earnings_csv(&self, role: Role) -> Result<String, ApiError> {
        self.require(role, Capability::ExportData, "export data")?;
        let cache = self.cache.lock().await;
        Ok(export::earnings_summary_csv(
            &self.config.barbers,
            &cache.services,
            &cache.sales,
            Utc::now(),
        ))
    }

    /// The sales history CSV.
    pub async fn export_sales_csv(&self, role: Role) -> Result<String, ApiError> {
        self.require(role, Capability::ExportData, "export data")?;
        Ok(export::sales_history_csv(&self.cache.lock().await.sales))
    }

    /// The inventory audit trail CSV.
    pub async fn export_inventory_csv(&self, role: Role) -> Result<String, ApiError> {
        self.require(role, Capability::ExportData, "export data")?;
        let entries = self.db.inventory_log().list_all().await?;
        Ok(export::inventory_history_csv(&entries))
    }

    /// The weekly archive CSV.
    pub async fn export_weekly_csv(&self, role: Role) -> Result<String, ApiError> {
        self.require(role, Capability::ExportData, "export data")?;
        let summaries = self.db.weekly_summaries().list_all().await?;
        Ok(export::weekly_history_csv(&summaries))
    }

    // -------------------------------------------------------------------------
    // Bulk resets
    // -------------------------------------------------------------------------

    /// Wipes the service register only. Returns how many records went.
    pub async fn delete_all_services(&self, role: Role) -> Result<u64, ApiError> {
        self.require(role, Capability::BulkReset, "delete all records")?;

        let mut cache = self.cache.lock().await;
        let removed = self.db.services().delete_all().await?;
        cache.services.clear();

        info!(removed, "Service register wiped");
        Ok(removed)
    }

    /// Full wipe: services, sales, lots, and the audit trail.
    pub async fn purge_all_data(&self, role: Role) -> Result<(), ApiError> {
        self.require(role, Capability::BulkReset, "purge all data")?;

        let mut cache = self.cache.lock().await;
        self.db.services().delete_all().await?;
        self.db.sales().delete_all().await?;
        self.db.lots().delete_all().await?;
        self.db.inventory_log().delete_all().await?;

        *cache = SessionCache::default();

        info!("All data purged");
        Ok(())
    }

    /// Closes the week: snapshots the aggregates into the archive and
    /// wipes the transactional tables in one transaction, then resets
    /// the session cache. Returns the archived summary.
    pub async fn close_week(&self, role: Role) -> Result<WeeklySummary, ApiError> {
        self.require(role, Capability::BulkReset, "close the week")?;

        let mut cache = self.cache.lock().await;

        let now = Utc::now();
        let week_end = now.date_naive();
        let week_start = week_end - Duration::days(6);
        let summary =
            report::build_weekly_summary(&cache.services, &cache.sales, week_start, week_end, now);

        self.db.weekly_summaries().archive_and_reset(&summary).await?;
        *cache = SessionCache::default();

        info!(
            week_start = %summary.week_start,
            week_end = %summary.week_end,
            total = summary.total_cents,
            "Week closed"
        );
        Ok(summary)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use invictus_core::OrderItem;
    use invictus_db::DbConfig;

    async fn open_shop() -> Shop {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Shop::open(db, ShopConfig::default()).await.unwrap()
    }

    fn ticket(barber: &str, value: i64, tip: i64) -> ServiceTicket {
        ServiceTicket {
            barber_name: barber.to_string(),
            service_value_cents: value,
            tip_cents: tip,
            payment_method: PaymentMethod::Cash,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_record_service_persists_and_caches() {
        let shop = open_shop().await;

        let record = shop
            .record_service(Role::Aux, ticket("Barbero 1", 3_000_000, 500_000))
            .await
            .unwrap();
        assert_eq!(record.admin_cents, 1_500_000);
        assert_eq!(record.barber_cents, 2_000_000);
        assert_eq!(record.total_cents, 3_500_000);

        // In the register and in the store of record.
        let register = shop.service_history(Role::Admin, None).await.unwrap();
        assert_eq!(register.len(), 1);
        assert_eq!(shop.db.services().list_all().await.unwrap().len(), 1);

        // Rejected ticket: nothing recorded anywhere.
        assert!(shop
            .record_service(Role::Aux, ticket("Barbero 1", 0, 0))
            .await
            .is_err());
        assert_eq!(shop.db.services().list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_capability_gating() {
        let shop = open_shop().await;

        // A barber only views earnings.
        let err = shop
            .record_service(Role::Barber, ticket("Barbero 1", 1000, 0))
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Forbidden);
        assert!(shop.earnings_overview(Role::Barber).await.is_ok());

        // Aux runs the day-to-day but nothing destructive.
        assert!(shop
            .add_lot(Role::Aux, "Wax", 2, 2000, Some(2000), "aux")
            .await
            .is_ok());
        assert!(shop.remove_lot(Role::Aux, 0, "aux").await.is_err());
        assert!(shop.edit_sell_price(Role::Aux, "Wax", 2500, "aux").await.is_err());
        assert!(shop.export_earnings_csv(Role::Aux).await.is_err());
        assert!(shop.purge_all_data(Role::Aux).await.is_err());
        assert!(shop.close_week(Role::Aux).await.is_err());

        // The denied operations changed nothing.
        assert_eq!(shop.lot_view(Role::Admin).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sell_spans_lots_and_updates_both_sides() {
        let shop = open_shop().await;
        shop.add_lot(Role::Admin, "Wax", 2, 20, Some(20), "admin")
            .await
            .unwrap();
        shop.add_lot(Role::Admin, "Wax", 3, 36, None, "admin")
            .await
            .unwrap();

        let sales = shop
            .sell_product(Role::Aux, "wax", 4, PaymentMethod::Cash, "aux")
            .await
            .unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].buy_price_cents, 10);
        assert_eq!(sales[1].buy_price_cents, 12);

        // Cache agrees with the store of record.
        let lots = shop.lot_view(Role::Admin).await.unwrap();
        assert_eq!(lots[0].stock, 0);
        assert_eq!(lots[1].stock, 1);
        let persisted = shop.db.lots().list_all().await.unwrap();
        assert_eq!(persisted[0].stock, 0);
        assert_eq!(persisted[1].stock, 1);
        assert_eq!(shop.db.sales().list_all().await.unwrap().len(), 2);

        // Audit trail carries one Sell entry per lot touched.
        let trail = shop.inventory_history(Role::Admin).await.unwrap();
        let sells = trail
            .iter()
            .filter(|e| e.action == invictus_core::InventoryAction::Sell)
            .count();
        assert_eq!(sells, 2);
    }

    #[tokio::test]
    async fn test_sell_insufficient_stock_mutates_nothing() {
        let shop = open_shop().await;
        shop.add_lot(Role::Admin, "Wax", 5, 50, Some(20), "admin")
            .await
            .unwrap();

        let err = shop
            .sell_product(Role::Aux, "Wax", 10, PaymentMethod::Cash, "aux")
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InsufficientStock);

        assert_eq!(shop.lot_view(Role::Admin).await.unwrap()[0].stock, 5);
        assert!(shop.db.sales().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_leaves_cache_untouched() {
        let shop = open_shop().await;
        shop.add_lot(Role::Admin, "Wax", 5, 50, Some(20), "admin")
            .await
            .unwrap();

        // Kill the store of record out from under the session.
        shop.db.close().await;

        let err = shop
            .sell_product(Role::Aux, "Wax", 2, PaymentMethod::Cash, "aux")
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::DatabaseError);

        // The scratch copy was discarded: memory still shows full stock.
        assert_eq!(shop.lot_view(Role::Admin).await.unwrap()[0].stock, 5);
    }

    #[tokio::test]
    async fn test_session_reopen_rebuilds_cache() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let shop = Shop::open(db.clone(), ShopConfig::default()).await.unwrap();
        shop.add_lot(Role::Admin, "Wax", 2, 20, Some(20), "admin")
            .await
            .unwrap();
        shop.record_service(Role::Aux, ticket("Barbero 2", 1000, 0))
            .await
            .unwrap();

        // A fresh session over the same store sees the same state.
        let reopened = Shop::open(db, ShopConfig::default()).await.unwrap();
        assert_eq!(reopened.lot_view(Role::Admin).await.unwrap().len(), 1);
        let overview = reopened.earnings_overview(Role::Barber).await.unwrap();
        assert_eq!(overview.barbers[1].total_cents, 500);
    }

    #[tokio::test]
    async fn test_earnings_overview_reconciles() {
        let shop = open_shop().await;
        shop.record_service(Role::Aux, ticket("Barbero 1", 3_000_000, 500_000))
            .await
            .unwrap();
        shop.record_service(Role::Aux, ticket("Barbero 3", 2_000_000, 0))
            .await
            .unwrap();
        shop.add_lot(Role::Admin, "Wax", 5, 5_000, Some(2_000), "admin")
            .await
            .unwrap();
        shop.sell_product(Role::Aux, "Wax", 3, PaymentMethod::Transfer, "aux")
            .await
            .unwrap();

        let overview = shop.earnings_overview(Role::Admin).await.unwrap();
        // Every rostered barber has a row, earners and idlers alike.
        assert_eq!(overview.barbers.len(), 4);
        assert_eq!(overview.barbers[0].total_cents, 2_000_000);
        assert_eq!(overview.barbers[1].total_cents, 0);

        let barber_sum: i64 = overview.barbers.iter().map(|b| b.total_cents).sum();
        assert_eq!(
            overview.grand_total_cents,
            barber_sum + overview.admin_cents + overview.product_revenue_cents
        );
    }

    #[tokio::test]
    async fn test_order_resubmission_updates_open_tab() {
        let shop = open_shop().await;

        let draft = OrderDraft {
            client_name: "Carlos".to_string(),
            items: vec![OrderItem {
                name: "Wax".to_string(),
                sell_price_cents: 2000,
                quantity: 1,
            }],
            beard_service: false,
            beard_service_cents: 0,
            tip_cents: 0,
        };
        let first = shop.submit_order(Role::Aux, draft.clone()).await.unwrap();
        assert_eq!(first.total_cents, 2000);

        // Same client, different casing: the open tab is rewritten.
        let second = shop
            .submit_order(
                Role::Aux,
                OrderDraft {
                    client_name: "carlos".to_string(),
                    items: vec![OrderItem {
                        name: "Wax".to_string(),
                        sell_price_cents: 2000,
                        quantity: 2,
                    }],
                    beard_service: true,
                    beard_service_cents: 15_000,
                    tip_cents: 1_000,
                },
            )
            .await
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.total_cents, 2 * 2000 + 15_000 + 1_000);

        let open = shop.open_orders(Role::Aux).await.unwrap();
        assert_eq!(open.len(), 1);

        shop.mark_order_paid(Role::Aux, &first.id).await.unwrap();
        assert!(shop.open_orders(Role::Aux).await.unwrap().is_empty());

        // A paid tab is history: the same client gets a fresh tab.
        let third = shop.submit_order(Role::Aux, draft).await.unwrap();
        assert_ne!(third.id, first.id);
    }

    #[tokio::test]
    async fn test_close_week_archives_and_resets() {
        let shop = open_shop().await;
        shop.record_service(Role::Aux, ticket("Barbero 1", 3_000_000, 500_000))
            .await
            .unwrap();
        shop.add_lot(Role::Admin, "Wax", 5, 5_000, Some(2_000), "admin")
            .await
            .unwrap();
        shop.sell_product(Role::Aux, "Wax", 2, PaymentMethod::Cash, "aux")
            .await
            .unwrap();

        let summary = shop.close_week(Role::Admin).await.unwrap();
        assert_eq!(summary.barber_earnings["Barbero 1"], 2_000_000);
        assert_eq!(summary.admin_cents, 1_500_000);
        assert_eq!(summary.product_sales_cents, 4_000);
        assert_eq!(
            summary.total_cents,
            2_000_000 + 1_500_000 + 4_000
        );
        assert_eq!(summary.week_end - summary.week_start, Duration::days(6));

        // Everything transactional is gone, in memory and in storage.
        assert!(shop.service_history(Role::Admin, None).await.unwrap().is_empty());
        assert!(shop.sales_history(Role::Admin).await.unwrap().is_empty());
        assert!(shop.lot_view(Role::Admin).await.unwrap().is_empty());
        assert!(shop.db.lots().list_all().await.unwrap().is_empty());

        // The archive holds the week.
        let weeks = shop.weekly_history(Role::Admin).await.unwrap();
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].total_cents, summary.total_cents);
    }

    #[tokio::test]
    async fn test_delete_all_services_spares_inventory() {
        let shop = open_shop().await;
        shop.record_service(Role::Aux, ticket("Barbero 1", 1000, 0))
            .await
            .unwrap();
        shop.add_lot(Role::Admin, "Wax", 2, 20, Some(20), "admin")
            .await
            .unwrap();

        let removed = shop.delete_all_services(Role::Admin).await.unwrap();
        assert_eq!(removed, 1);
        assert!(shop.service_history(Role::Admin, None).await.unwrap().is_empty());
        // Stock survives a register wipe.
        assert_eq!(shop.lot_view(Role::Admin).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_purge_all_data() {
        let shop = open_shop().await;
        shop.record_service(Role::Aux, ticket("Barbero 1", 1000, 0))
            .await
            .unwrap();
        shop.add_lot(Role::Admin, "Wax", 2, 20, Some(20), "admin")
            .await
            .unwrap();
        shop.sell_product(Role::Aux, "Wax", 1, PaymentMethod::Cash, "aux")
            .await
            .unwrap();

        shop.purge_all_data(Role::Admin).await.unwrap();

        assert!(shop.service_history(Role::Admin, None).await.unwrap().is_empty());
        assert!(shop.sales_history(Role::Admin).await.unwrap().is_empty());
        assert!(shop.lot_view(Role::Admin).await.unwrap().is_empty());
        assert!(shop.inventory_history(Role::Admin).await.unwrap().is_empty());
    }
}
