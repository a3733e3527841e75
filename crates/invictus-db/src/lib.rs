//! # invictus-db: Database Layer for Invictus POS
//!
//! This crate provides database access for the Invictus POS engine.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Invictus POS Data Flow                          │
//! │                                                                     │
//! │  Shop store operation (record_service, sell_product, ...)           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                  invictus-db (THIS CRATE)                     │  │
//! │  │                                                               │  │
//! │  │  ┌─────────────┐   ┌─────────────────┐   ┌────────────────┐  │  │
//! │  │  │  Database   │   │  Repositories   │   │   Migrations   │  │  │
//! │  │  │  (pool.rs)  │   │ (service, lot,  │   │   (embedded)   │  │  │
//! │  │  │             │   │  sale, log,     │   │                │  │  │
//! │  │  │ SqlitePool  │◄──│  order, summary)│   │ 001_initial... │  │  │
//! │  │  └─────────────┘   └─────────────────┘   └────────────────┘  │  │
//! │  │                                                               │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │                     SQLite database file (WAL)                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per table
//!
//! ## Usage
//!
//! ```rust,ignore
//! use invictus_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/invictus.db")).await?;
//!
//! // Repositories
//! let lots = db.lots().list_all().await?;
//! db.services().insert(&record).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::log::InventoryLogRepository;
pub use repository::lot::LotRepository;
pub use repository::order::OrderRepository;
pub use repository::sale::SaleRepository;
pub use repository::service::ServiceRepository;
pub use repository::summary::WeeklySummaryRepository;
