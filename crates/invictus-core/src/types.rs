//! # Domain Types
//!
//! Core domain types for the Invictus POS engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────┐    │
//! │  │ ServiceRecord  │  │   ProductLot   │  │       Sale         │    │
//! │  │ ────────────── │  │ ────────────── │  │ ────────────────── │    │
//! │  │ barber_cents   │  │ name           │  │ lot_id (origin)    │    │
//! │  │ admin_cents    │  │ stock          │  │ quantity           │    │
//! │  │ tip_cents      │  │ buy_price      │  │ buy/sell snapshot  │    │
//! │  │ total_cents    │  │ sell_price     │  │ total_cents        │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────┘    │
//! │                                                                     │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────┐    │
//! │  │ PaymentMethod  │  │ InventoryLog   │  │   Order /          │    │
//! │  │  Cash          │  │   Entry        │  │   WeeklySummary    │    │
//! │  │  Transfer      │  │  (audit trail) │  │   (tabs, archive)  │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────┘    │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Monetary fields are raw `*_cents: i64` (matching the storage schema)
//! with [`Money`] accessor methods on top. Records are immutable facts
//! once created; the one exception is `ProductLot.sell_price_cents`,
//! rewritten by the explicit edit-sell-price operation, and
//! `ProductLot.stock`, decremented by sales.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Payment Method
// =============================================================================

/// How a service or sale was paid.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Bank transfer.
    Transfer,
}

impl PaymentMethod {
    /// Human-readable label used in exports and audit details.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Transfer => "Transfer",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Service Record
// =============================================================================

/// A recorded barber service with its revenue split applied.
///
/// Created by the split calculator on each service submission, then
/// persisted; never mutated afterwards. Deleted only by the bulk reset
/// operations (weekly archival or full wipe).
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ServiceRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Which barber performed the service.
    pub barber_name: String,

    /// The barber's share: half the service value plus the whole tip.
    pub barber_cents: i64,

    /// The shop's share: half the service value.
    pub admin_cents: i64,

    /// Tip amount (flows entirely to the barber).
    pub tip_cents: i64,

    /// Service value plus tip.
    pub total_cents: i64,

    /// How the customer paid.
    pub payment_method: PaymentMethod,

    /// Free-form observations from the form.
    pub notes: Option<String>,

    /// When the service was recorded.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl ServiceRecord {
    /// Returns the barber's share as Money.
    #[inline]
    pub fn barber(&self) -> Money {
        Money::from_cents(self.barber_cents)
    }

    /// Returns the shop's share as Money.
    #[inline]
    pub fn admin(&self) -> Money {
        Money::from_cents(self.admin_cents)
    }

    /// Returns the tip as Money.
    #[inline]
    pub fn tip(&self) -> Money {
        Money::from_cents(self.tip_cents)
    }

    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Product Lot
// =============================================================================

/// A batch of product received at one time at one cost basis.
///
/// Several lots may share a `name`; they are never merged, so the cost
/// basis of each batch survives for profit attribution. Insertion order
/// (ascending `created_at`) is the FIFO depletion order. A lot whose
/// stock reaches zero stays addressable until explicitly removed.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductLot {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Product name, stored exactly as entered.
    pub name: String,

    /// Units remaining in this lot. Decremented by sales, never below 0.
    pub stock: i64,

    /// Per-unit purchase cost for this batch.
    pub buy_price_cents: i64,

    /// Per-unit sell price (kept in step with the catalog).
    pub sell_price_cents: i64,

    /// When the lot was received.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl ProductLot {
    /// Returns the per-unit cost basis as Money.
    #[inline]
    pub fn buy_price(&self) -> Money {
        Money::from_cents(self.buy_price_cents)
    }

    /// Returns the per-unit sell price as Money.
    #[inline]
    pub fn sell_price(&self) -> Money {
        Money::from_cents(self.sell_price_cents)
    }

    /// A lot is exhausted once all units have been sold. It stays in
    /// the list for history until an admin removes it.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.stock == 0
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One product sale drawn from one lot.
///
/// A sell request spanning two lots produces two `Sale` records, each
/// carrying the prices of the lot it consumed (snapshot pattern: history
/// stays correct even after the lot is removed or re-priced).
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The lot the units were drawn from.
    pub lot_id: String,

    /// Product name at time of sale (frozen).
    pub product_name: String,

    /// Units drawn from this lot.
    pub quantity: i64,

    /// Cost basis of the source lot at time of sale (frozen).
    pub buy_price_cents: i64,

    /// Sell price at time of sale (frozen).
    pub sell_price_cents: i64,

    /// quantity × sell price.
    pub total_cents: i64,

    /// How the customer paid.
    pub payment_method: PaymentMethod,

    /// Who rang up the sale.
    pub user_name: String,

    /// When the sale happened.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the frozen cost basis as Money.
    #[inline]
    pub fn buy_price(&self) -> Money {
        Money::from_cents(self.buy_price_cents)
    }

    /// Returns the frozen sell price as Money.
    #[inline]
    pub fn sell_price(&self) -> Money {
        Money::from_cents(self.sell_price_cents)
    }

    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Profit for this sale: (sell − buy) × quantity. Can be negative
    /// when a batch sells below its cost.
    #[inline]
    pub fn profit(&self) -> Money {
        (self.sell_price() - self.buy_price()).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Inventory Audit Trail
// =============================================================================

/// What kind of inventory mutation a log entry records.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InventoryAction {
    /// A lot was received into stock.
    Add,
    /// A whole lot was deleted.
    Remove,
    /// The sell price of a product was edited.
    Edit,
    /// Units were sold.
    Sell,
}

impl InventoryAction {
    /// Label used in history views and CSV exports.
    pub fn label(&self) -> &'static str {
        match self {
            InventoryAction::Add => "Add",
            InventoryAction::Remove => "Remove",
            InventoryAction::Edit => "Edit",
            InventoryAction::Sell => "Sell",
        }
    }
}

/// Audit trail entry, written as a side effect of every inventory
/// mutation. Append-only and best-effort: losing one never blocks the
/// operation it records.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryLogEntry {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// What happened.
    pub action: InventoryAction,

    /// Which product it happened to.
    pub product_name: String,

    /// Units involved (0 for price edits).
    pub quantity: i64,

    /// Who did it.
    pub user_name: String,

    /// Free-form context (prices, totals).
    pub details: String,

    /// When it happened.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Orders (customer tabs)
// =============================================================================

/// A line item on a customer tab.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    /// Product name from the catalog.
    pub name: String,

    /// Catalog sell price when the item was added.
    pub sell_price_cents: i64,

    /// Units ordered.
    pub quantity: i64,
}

impl OrderItem {
    /// Line total: unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.sell_price_cents).multiply_quantity(self.quantity)
    }
}

/// A customer tab: products and/or a barber service to be settled later.
///
/// At most one open tab exists per client name; submitting again for the
/// same client updates the open tab. Tabs never touch stock.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Who the tab belongs to.
    pub client_name: String,

    /// Products on the tab.
    pub items: Vec<OrderItem>,

    /// Whether a barber service is included.
    pub beard_service: bool,

    /// Value of the included service (0 when none).
    pub beard_service_cents: i64,

    /// Tip on the included service.
    pub tip_cents: i64,

    /// items + service + tip.
    pub total_cents: i64,

    /// Settled tabs are kept for history but leave the open list.
    pub is_paid: bool,

    /// When the tab was opened.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Last modification.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Recomputes the tab total from its parts.
    pub fn computed_total(&self) -> Money {
        let items: Money = self.items.iter().map(|i| i.line_total()).sum();
        items + Money::from_cents(self.beard_service_cents) + Money::from_cents(self.tip_cents)
    }
}

// =============================================================================
// Weekly Summary
// =============================================================================

/// Archived aggregate of one week of business, written by the weekly
/// reset before the transactional tables are wiped.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeeklySummary {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// First day the summary covers.
    #[ts(as = "String")]
    pub week_start: NaiveDate,

    /// Last day the summary covers (the reset day).
    #[ts(as = "String")]
    pub week_end: NaiveDate,

    /// Earnings per barber for the week (centavos).
    pub barber_earnings: BTreeMap<String, i64>,

    /// Product sales revenue for the week.
    pub product_sales_cents: i64,

    /// Shop share of service revenue for the week.
    pub admin_cents: i64,

    /// Grand total: barbers + products + admin.
    pub total_cents: i64,

    /// When the snapshot was taken.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl WeeklySummary {
    /// Sum of all barber earnings for the week.
    pub fn barber_total(&self) -> Money {
        Money::from_cents(self.barber_earnings.values().sum())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
