//! # invictus-core: Pure Business Logic for Invictus POS
//!
//! The heart of the barbershop earnings engine: every peso that moves
//! through the system is computed here, as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Invictus POS Architecture                       │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │              Single-page interface (TypeScript)               │  │
//! │  │   Service form ── Inventory ── Sell ── Orders ── History      │  │
//! │  └───────────────────────────────┬───────────────────────────────┘  │
//! │                                  │                                  │
//! │  ┌───────────────────────────────▼───────────────────────────────┐  │
//! │  │                    invictus-app (Shop store)                  │  │
//! │  │        role checks · mutate-then-persist · CSV export         │  │
//! │  └───────────────────────────────┬───────────────────────────────┘  │
//! │                                  │                                  │
//! │  ┌───────────────────────────────▼───────────────────────────────┐  │
//! │  │              ★ invictus-core (THIS CRATE) ★                   │  │
//! │  │                                                               │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌────────┐  │  │
//! │  │  │  money  │ │  split  │ │  ledger  │ │ report  │ │ access │  │  │
//! │  │  │  Money  │ │  50/50  │ │  FIFO    │ │  sums   │ │ roles  │  │  │
//! │  │  └─────────┘ └─────────┘ └──────────┘ └─────────┘ └────────┘  │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │  │
//! │  └───────────────────────────────┬───────────────────────────────┘  │
//! │                                  │                                  │
//! │  ┌───────────────────────────────▼───────────────────────────────┐  │
//! │  │                 invictus-db (SQLite via sqlx)                 │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer-centavo Money type (no floating point!)
//! - [`types`] - Domain records (services, lots, sales, orders, ...)
//! - [`split`] - The revenue split calculator
//! - [`ledger`] - The FIFO inventory ledger
//! - [`report`] - Aggregation for earnings views and exports
//! - [`access`] - Roles and capabilities
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input, same output, always
//! 2. **No I/O**: database, network, and filesystem access are forbidden
//! 3. **Integer money**: all monetary values are centavos (i64)
//! 4. **Explicit errors**: typed enums, never strings or panics; a
//!    rejected operation leaves all state untouched

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod error;
pub mod ledger;
pub mod money;
pub mod report;
pub mod split;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use access::{Capability, Role};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{GroupedProduct, InventoryLedger, SellOutcome, StockLevel};
pub use money::Money;
pub use split::{compute_split, EarningsSplit, ServiceTicket};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum units a single request may move.
///
/// ## Business Reason
/// Guards against a mistyped 1000 where 10 was meant; nothing in a
/// barbershop moves a thousand units at once.
pub const MAX_SALE_QUANTITY: i64 = 999;

/// Maximum length of name fields (people, products, clients).
pub const MAX_NAME_LEN: usize = 120;
