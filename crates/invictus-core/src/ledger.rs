//! # Inventory Ledger
//!
//! Owns the stock lots and the product catalog, and applies every
//! inventory mutation: receiving lots, removing lots, re-pricing, and
//! FIFO sales.
//!
//! ## FIFO Depletion
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  sell("Wax", 4)                                                     │
//! │                                                                     │
//! │  lots (insertion order):                                            │
//! │   ┌──────────────────────┐   ┌──────────────────────┐               │
//! │   │ Wax  qty 2  buy 10   │   │ Wax  qty 3  buy 12   │               │
//! │   └──────────┬───────────┘   └──────────┬───────────┘               │
//! │              │ take 2 (all)             │ take 2                    │
//! │              ▼                          ▼                           │
//! │   Sale { qty 2, buy 10 }     Sale { qty 2, buy 12 }                 │
//! │                                                                     │
//! │  after: [ qty 0 , qty 1 ]  — the empty lot stays until removed      │
//! │                                                                     │
//! │  One Sale per lot touched keeps profit attribution exact when a     │
//! │  request spans batches bought at different costs.                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! - Availability is checked across ALL lots of the product before any
//!   unit is taken: either the whole request is served or nothing moves.
//! - Lot lookup for selling is case-insensitive; lot names themselves
//!   are stored exactly as entered.
//! - Every mutation returns the derived records (lot, sales, audit log
//!   entries) for the caller to persist. The ledger performs no I/O.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{InventoryAction, InventoryLogEntry, PaymentMethod, ProductLot, Sale};
use crate::validation::{validate_name, validate_non_negative, validate_quantity};

// =============================================================================
// Derived Records
// =============================================================================

/// Result of receiving a lot: the created lot plus its audit entry.
#[derive(Debug, Clone)]
pub struct LotReceipt {
    pub lot: ProductLot,
    pub log: InventoryLogEntry,
}

/// Result of deleting a lot: the removed lot plus its audit entry.
#[derive(Debug, Clone)]
pub struct LotRemoval {
    pub lot: ProductLot,
    pub log: InventoryLogEntry,
}

/// Result of a sell-price edit.
#[derive(Debug, Clone)]
pub struct PriceChange {
    /// How many existing lots were rewritten.
    pub lots_touched: usize,
    pub log: InventoryLogEntry,
}

/// Result of a sale: one `Sale` and one audit entry per lot consumed.
#[derive(Debug, Clone)]
pub struct SellOutcome {
    pub sales: Vec<Sale>,
    pub logs: Vec<InventoryLogEntry>,
}

impl SellOutcome {
    /// Total units sold across all consumed lots.
    pub fn units(&self) -> i64 {
        self.sales.iter().map(|s| s.quantity).sum()
    }

    /// Revenue across all consumed lots.
    pub fn revenue(&self) -> Money {
        self.sales.iter().map(|s| s.total()).sum()
    }

    /// Stock decrements to apply at the persistence layer, per lot.
    pub fn decrements(&self) -> Vec<(String, i64)> {
        self.sales
            .iter()
            .map(|s| (s.lot_id.clone(), s.quantity))
            .collect()
    }
}

// =============================================================================
// Catalog / Display Projections
// =============================================================================

/// One product name with its current advertised sell price.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogEntry {
    pub name: String,
    pub sell_price_cents: i64,
}

/// Traffic-light band for the inventory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    /// 2 units or fewer.
    Critical,
    /// 3 to 6 units.
    Low,
    /// More than 6 units.
    Healthy,
}

impl StockLevel {
    pub fn for_quantity(qty: i64) -> Self {
        if qty <= 2 {
            StockLevel::Critical
        } else if qty <= 6 {
            StockLevel::Low
        } else {
            StockLevel::Healthy
        }
    }
}

/// All lots of one product collapsed for display.
///
/// A read-only projection: quantities summed, the most recent lot's cost
/// shown as the representative buy price, the catalog's sell price, and
/// the latest receipt time. Selling always works on the per-lot state,
/// never on this view.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroupedProduct {
    pub name: String,
    pub total_stock: i64,
    /// Cost basis of the most recently received lot.
    pub last_buy_price_cents: i64,
    pub sell_price_cents: i64,
    #[ts(as = "String")]
    pub last_received_at: DateTime<Utc>,
}

impl GroupedProduct {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::for_quantity(self.total_stock)
    }
}

// =============================================================================
// The Ledger
// =============================================================================

/// Owns all stock lots and the name → sell-price catalog for the
/// session. The persistence layer is the system of record; this is the
/// in-memory working copy, rebuilt at session start from the lot rows.
#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    /// Insertion order is significant: it is the FIFO depletion order.
    lots: Vec<ProductLot>,
    /// Current advertised sell price per product name (exact name key).
    catalog: BTreeMap<String, i64>,
}

impl InventoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from persisted lots (ordered oldest first).
    ///
    /// The catalog is derived from the lots: every lot of a name carries
    /// the catalog price, so the last one seen wins harmlessly.
    pub fn from_lots(lots: Vec<ProductLot>) -> Self {
        let mut catalog = BTreeMap::new();
        for lot in &lots {
            catalog.insert(lot.name.clone(), lot.sell_price_cents);
        }
        InventoryLedger { lots, catalog }
    }

    /// All lots in FIFO order.
    pub fn lots(&self) -> &[ProductLot] {
        &self.lots
    }

    /// The catalog, sorted by product name.
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        self.catalog
            .iter()
            .map(|(name, &sell_price_cents)| CatalogEntry {
                name: name.clone(),
                sell_price_cents,
            })
            .collect()
    }

    /// Current sell price for an exact product name.
    pub fn sell_price_for(&self, name: &str) -> Option<Money> {
        self.catalog.get(name).map(|&c| Money::from_cents(c))
    }

    /// Units available across all lots of a product (case-insensitive).
    pub fn available(&self, name: &str) -> i64 {
        let wanted = name.trim().to_lowercase();
        self.lots
            .iter()
            .filter(|l| l.name.to_lowercase() == wanted)
            .map(|l| l.stock)
            .sum()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Receives a new lot into stock.
    ///
    /// `total_buy_cost` is what the whole batch cost; the per-unit cost
    /// basis is derived by flooring division. For a product already in
    /// the catalog the provided `sell_price` is ignored and the catalog
    /// price is used — sell price is a per-product property, changed
    /// only through [`edit_sell_price`](Self::edit_sell_price). For a
    /// new product `sell_price` is required and seeds the catalog.
    pub fn add_lot(
        &mut self,
        name: &str,
        quantity: i64,
        total_buy_cost: Money,
        sell_price: Option<Money>,
        user_name: &str,
        at: DateTime<Utc>,
    ) -> CoreResult<LotReceipt> {
        let name = validate_name(name, "product name")?;
        validate_quantity(quantity)?;
        validate_non_negative(total_buy_cost, "purchase cost")?;

        let sell = match self.catalog.get(&name) {
            Some(&current) => Money::from_cents(current),
            None => {
                let price = sell_price.ok_or(ValidationError::Required {
                    field: "sell price".to_string(),
                })?;
                validate_non_negative(price, "sell price")?;
                self.catalog.insert(name.clone(), price.cents());
                price
            }
        };

        let buy_unit = total_buy_cost.per_unit(quantity);
        let lot = ProductLot {
            id: Uuid::new_v4().to_string(),
            name: name.clone(),
            stock: quantity,
            buy_price_cents: buy_unit.cents(),
            sell_price_cents: sell.cents(),
            created_at: at,
        };
        self.lots.push(lot.clone());

        let log = log_entry(
            InventoryAction::Add,
            &name,
            quantity,
            user_name,
            format!(
                "Received {} units - buy {} / sell {} per unit",
                quantity,
                buy_unit.format_cop(),
                sell.format_cop()
            ),
            at,
        );

        Ok(LotReceipt { lot, log })
    }

    /// Deletes the lot at `index` entirely, whatever its remaining
    /// stock. This is a whole-lot removal, not a decrement.
    pub fn remove_lot(
        &mut self,
        index: usize,
        user_name: &str,
        at: DateTime<Utc>,
    ) -> CoreResult<LotRemoval> {
        if index >= self.lots.len() {
            return Err(CoreError::LotNotFound { index });
        }
        let lot = self.lots.remove(index);

        let log = log_entry(
            InventoryAction::Remove,
            &lot.name,
            lot.stock,
            user_name,
            format!("Lot removed with {} units remaining", lot.stock),
            at,
        );

        Ok(LotRemoval { lot, log })
    }

    /// Changes the advertised sell price of a product.
    ///
    /// Rewrites the catalog entry AND every existing lot of that name —
    /// the single intentional in-place mutation of past rows, so the
    /// whole inventory quotes one price per product.
    pub fn edit_sell_price(
        &mut self,
        name: &str,
        new_price: Money,
        user_name: &str,
        at: DateTime<Utc>,
    ) -> CoreResult<PriceChange> {
        validate_non_negative(new_price, "sell price")?;

        let name = name.trim();
        let Some(entry) = self.catalog.get_mut(name) else {
            return Err(CoreError::ProductNotFound(name.to_string()));
        };
        *entry = new_price.cents();

        let mut lots_touched = 0;
        for lot in self.lots.iter_mut().filter(|l| l.name == name) {
            lot.sell_price_cents = new_price.cents();
            lots_touched += 1;
        }

        let log = log_entry(
            InventoryAction::Edit,
            name,
            0,
            user_name,
            format!("New sell price: {}", new_price.format_cop()),
            at,
        );

        Ok(PriceChange { lots_touched, log })
    }

    /// Sells `quantity` units of a product, oldest lot first.
    ///
    /// ## All-or-nothing
    /// Availability is summed across every matching lot before anything
    /// is taken. If the request exceeds it, `InsufficientStock` is
    /// returned and no lot is touched — there is no partial sale.
    ///
    /// ## Per-lot records
    /// Each lot consumed yields one [`Sale`] carrying that lot's own
    /// buy/sell prices and one audit entry, so profit attribution stays
    /// exact across batches.
    pub fn sell(
        &mut self,
        name: &str,
        quantity: i64,
        payment_method: PaymentMethod,
        user_name: &str,
        at: DateTime<Utc>,
    ) -> CoreResult<SellOutcome> {
        let name = validate_name(name, "product name")?;
        validate_quantity(quantity)?;

        let available = self.available(&name);
        if available < quantity {
            return Err(CoreError::InsufficientStock {
                name,
                available,
                requested: quantity,
            });
        }

        let wanted = name.to_lowercase();
        let mut still_needed = quantity;
        let mut sales = Vec::new();
        let mut logs = Vec::new();

        for lot in self.lots.iter_mut() {
            if still_needed == 0 {
                break;
            }
            if lot.stock == 0 || lot.name.to_lowercase() != wanted {
                continue;
            }

            let take = lot.stock.min(still_needed);
            lot.stock -= take;
            still_needed -= take;

            let total = lot.sell_price().multiply_quantity(take);
            sales.push(Sale {
                id: Uuid::new_v4().to_string(),
                lot_id: lot.id.clone(),
                product_name: lot.name.clone(),
                quantity: take,
                buy_price_cents: lot.buy_price_cents,
                sell_price_cents: lot.sell_price_cents,
                total_cents: total.cents(),
                payment_method,
                user_name: user_name.to_string(),
                created_at: at,
            });
            logs.push(log_entry(
                InventoryAction::Sell,
                &lot.name,
                take,
                user_name,
                format!("Sold {} units - total {}", take, total.format_cop()),
                at,
            ));
        }

        debug_assert_eq!(still_needed, 0);
        Ok(SellOutcome { sales, logs })
    }

    // -------------------------------------------------------------------------
    // Projections
    // -------------------------------------------------------------------------

    /// Collapses lots by name for the inventory table, sorted by name.
    pub fn grouped(&self) -> Vec<GroupedProduct> {
        let mut by_name: BTreeMap<&str, GroupedProduct> = BTreeMap::new();

        for lot in &self.lots {
            match by_name.get_mut(lot.name.as_str()) {
                Some(group) => {
                    group.total_stock += lot.stock;
                    if lot.created_at > group.last_received_at {
                        group.last_received_at = lot.created_at;
                        group.last_buy_price_cents = lot.buy_price_cents;
                    }
                }
                None => {
                    by_name.insert(
                        lot.name.as_str(),
                        GroupedProduct {
                            name: lot.name.clone(),
                            total_stock: lot.stock,
                            last_buy_price_cents: lot.buy_price_cents,
                            sell_price_cents: self
                                .catalog
                                .get(&lot.name)
                                .copied()
                                .unwrap_or(lot.sell_price_cents),
                            last_received_at: lot.created_at,
                        },
                    );
                }
            }
        }

        by_name.into_values().collect()
    }
}

/// Builds an audit entry with a fresh id.
fn log_entry(
    action: InventoryAction,
    product_name: &str,
    quantity: i64,
    user_name: &str,
    details: String,
    at: DateTime<Utc>,
) -> InventoryLogEntry {
    InventoryLogEntry {
        id: Uuid::new_v4().to_string(),
        action,
        product_name: product_name.to_string(),
        quantity,
        user_name: user_name.to_string(),
        details,
        created_at: at,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn base_time() -> DateTime<Utc> {
        Utc::now()
    }

    /// Ledger seeded with two Wax lots (qty 2 @ buy 10, qty 3 @ buy 12,
    /// both sell 20) received in that order.
    fn wax_ledger(t: DateTime<Utc>) -> InventoryLedger {
        let mut ledger = InventoryLedger::new();
        ledger
            .add_lot("Wax", 2, Money::from_cents(20), Some(Money::from_cents(20)), "admin", t)
            .unwrap();
        ledger
            .add_lot("Wax", 3, Money::from_cents(36), None, "admin", t + Duration::minutes(1))
            .unwrap();
        ledger
    }

    #[test]
    fn test_add_lot_derives_per_unit_cost() {
        let mut ledger = InventoryLedger::new();
        let receipt = ledger
            .add_lot(
                "Shampoo",
                4,
                Money::from_cents(10_000),
                Some(Money::from_cents(4_000)),
                "admin",
                base_time(),
            )
            .unwrap();
        assert_eq!(receipt.lot.buy_price_cents, 2_500);
        assert_eq!(receipt.lot.stock, 4);
        assert_eq!(receipt.log.action, InventoryAction::Add);
        assert_eq!(ledger.lots().len(), 1);
    }

    #[test]
    fn test_add_lot_known_product_keeps_catalog_price() {
        let t = base_time();
        let mut ledger = wax_ledger(t);
        // Provided price 99 must be ignored for a known product.
        let receipt = ledger
            .add_lot(
                "Wax",
                5,
                Money::from_cents(50),
                Some(Money::from_cents(99)),
                "admin",
                t + Duration::minutes(2),
            )
            .unwrap();
        assert_eq!(receipt.lot.sell_price_cents, 20);
        assert_eq!(ledger.sell_price_for("Wax").unwrap().cents(), 20);
    }

    #[test]
    fn test_add_lot_new_product_requires_sell_price() {
        let mut ledger = InventoryLedger::new();
        let err = ledger
            .add_lot("Gel", 3, Money::from_cents(300), None, "admin", base_time())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { .. })
        ));
        assert!(ledger.lots().is_empty());
    }

    #[test]
    fn test_fifo_depletion_across_lots() {
        let t = base_time();
        let mut ledger = wax_ledger(t);

        let outcome = ledger
            .sell("Wax", 4, PaymentMethod::Cash, "admin", t + Duration::minutes(5))
            .unwrap();

        // Oldest lot fully drained, two units drawn from the second.
        assert_eq!(outcome.sales.len(), 2);
        assert_eq!(outcome.sales[0].quantity, 2);
        assert_eq!(outcome.sales[0].buy_price_cents, 10);
        assert_eq!(outcome.sales[1].quantity, 2);
        assert_eq!(outcome.sales[1].buy_price_cents, 12);
        assert_eq!(outcome.logs.len(), 2);
        assert_eq!(outcome.units(), 4);
        assert_eq!(outcome.revenue().cents(), 80);

        assert_eq!(ledger.lots()[0].stock, 0);
        assert_eq!(ledger.lots()[1].stock, 1);
        // The drained lot stays addressable.
        assert!(ledger.lots()[0].is_exhausted());
    }

    #[test]
    fn test_sell_all_or_nothing() {
        let t = base_time();
        let mut ledger = wax_ledger(t);

        let err = ledger
            .sell("Wax", 10, PaymentMethod::Cash, "admin", t)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 5,
                requested: 10,
                ..
            }
        ));
        // Nothing moved.
        assert_eq!(ledger.lots()[0].stock, 2);
        assert_eq!(ledger.lots()[1].stock, 3);
    }

    #[test]
    fn test_sell_lookup_is_case_insensitive() {
        let t = base_time();
        let mut ledger = wax_ledger(t);

        let outcome = ledger
            .sell("wax", 1, PaymentMethod::Transfer, "aux", t)
            .unwrap();
        assert_eq!(outcome.sales.len(), 1);
        // Storage keeps the original casing.
        assert_eq!(outcome.sales[0].product_name, "Wax");
        assert_eq!(ledger.available("WAX"), 4);
    }

    #[test]
    fn test_sell_skips_exhausted_lots() {
        let t = base_time();
        let mut ledger = wax_ledger(t);
        ledger.sell("Wax", 2, PaymentMethod::Cash, "admin", t).unwrap();

        // First lot now empty; the next sale must come from the second.
        let outcome = ledger.sell("Wax", 1, PaymentMethod::Cash, "admin", t).unwrap();
        assert_eq!(outcome.sales.len(), 1);
        assert_eq!(outcome.sales[0].buy_price_cents, 12);
    }

    #[test]
    fn test_edit_sell_price_rewrites_all_lots() {
        let t = base_time();
        let mut ledger = wax_ledger(t);

        let change = ledger
            .edit_sell_price("Wax", Money::from_cents(25), "admin", t)
            .unwrap();
        assert_eq!(change.lots_touched, 2);
        assert_eq!(ledger.sell_price_for("Wax").unwrap().cents(), 25);
        for lot in ledger.lots() {
            assert_eq!(lot.sell_price_cents, 25);
            // Cost basis and stock untouched.
            assert!(lot.buy_price_cents == 10 || lot.buy_price_cents == 12);
        }
        assert_eq!(ledger.lots()[0].stock, 2);
    }

    #[test]
    fn test_edit_sell_price_rejects_negative_and_unknown() {
        let t = base_time();
        let mut ledger = wax_ledger(t);

        assert!(matches!(
            ledger.edit_sell_price("Wax", Money::from_cents(-1), "admin", t),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            ledger.edit_sell_price("Gel", Money::from_cents(10), "admin", t),
            Err(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_remove_lot() {
        let t = base_time();
        let mut ledger = wax_ledger(t);

        let removal = ledger.remove_lot(0, "admin", t).unwrap();
        assert_eq!(removal.lot.buy_price_cents, 10);
        assert_eq!(removal.log.action, InventoryAction::Remove);
        assert_eq!(ledger.lots().len(), 1);
        assert_eq!(ledger.available("Wax"), 3);

        assert!(matches!(
            ledger.remove_lot(5, "admin", t),
            Err(CoreError::LotNotFound { index: 5 })
        ));
    }

    #[test]
    fn test_grouped_view() {
        let t = base_time();
        let mut ledger = wax_ledger(t);
        ledger
            .add_lot(
                "Shampoo",
                10,
                Money::from_cents(100),
                Some(Money::from_cents(30)),
                "admin",
                t + Duration::minutes(3),
            )
            .unwrap();

        let grouped = ledger.grouped();
        assert_eq!(grouped.len(), 2);
        // Sorted by name.
        assert_eq!(grouped[0].name, "Shampoo");
        assert_eq!(grouped[1].name, "Wax");

        let wax = &grouped[1];
        assert_eq!(wax.total_stock, 5);
        // Most recent lot's cost basis is the representative one.
        assert_eq!(wax.last_buy_price_cents, 12);
        assert_eq!(wax.sell_price_cents, 20);
        assert_eq!(wax.stock_level(), StockLevel::Low);
        assert_eq!(grouped[0].stock_level(), StockLevel::Healthy);
    }

    #[test]
    fn test_stock_level_bands() {
        assert_eq!(StockLevel::for_quantity(0), StockLevel::Critical);
        assert_eq!(StockLevel::for_quantity(2), StockLevel::Critical);
        assert_eq!(StockLevel::for_quantity(3), StockLevel::Low);
        assert_eq!(StockLevel::for_quantity(6), StockLevel::Low);
        assert_eq!(StockLevel::for_quantity(7), StockLevel::Healthy);
    }

    #[test]
    fn test_from_lots_rebuilds_catalog() {
        let t = base_time();
        let seed = wax_ledger(t);
        let rebuilt = InventoryLedger::from_lots(seed.lots().to_vec());
        assert_eq!(rebuilt.sell_price_for("Wax").unwrap().cents(), 20);
        assert_eq!(rebuilt.available("wax"), 5);
        assert_eq!(rebuilt.catalog().len(), 1);
    }
}
