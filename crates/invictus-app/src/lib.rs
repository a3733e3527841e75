//! # invictus-app: Operation Boundary for Invictus POS
//!
//! The layer the single-page interface calls into.
//!
//! ## Module Organization
//! ```text
//! invictus_app/
//! ├── lib.rs       ◄─── You are here (wiring & tracing init)
//! ├── store.rs     ◄─── The Shop store: session cache + operations
//! ├── export.rs    ◄─── CSV projections
//! ├── config.rs    ◄─── Shop name and barber roster
//! └── error.rs     ◄─── API error type for operations
//! ```
//!
//! ## A Session
//! ```rust,ignore
//! use invictus_app::{init_tracing, Shop, ShopConfig};
//! use invictus_db::{Database, DbConfig};
//!
//! init_tracing();
//!
//! let db = Database::new(DbConfig::new("invictus.db")).await?;
//! let shop = Shop::open(db, ShopConfig::default()).await?;
//!
//! // Every operation takes the caller's role; the store checks the
//! // capability once at entry.
//! let record = shop.record_service(role, ticket).await?;
//! let sales = shop.sell_product(role, "Wax", 2, method, "aux").await?;
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod error;
pub mod export;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::ShopConfig;
pub use error::{ApiError, ErrorCode};
pub use store::{BarberEarnings, EarningsOverview, OrderDraft, Shop};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=invictus=trace` - Show trace for invictus crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,invictus=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}
