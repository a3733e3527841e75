//! # API Error Type
//!
//! Unified error type for the operation boundary.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Error Flow in Invictus POS                         │
//! │                                                                     │
//! │  Interface                   Rust Backend                           │
//! │  ─────────                   ────────────                           │
//! │                                                                     │
//! │  shop.sell_product(...)                                             │
//! │         │                                                           │
//! │         ▼                                                           │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │  Store Operation                                              │  │
//! │  │  Result<T, ApiError>                                          │  │
//! │  │         │                                                     │  │
//! │  │  Role check failed? ── Forbidden ──────────────────┐          │  │
//! │  │         ▼                                          │          │  │
//! │  │  Core rule broken? ─── CoreError ───► ApiError ───►│          │  │
//! │  │         ▼                                          │          │  │
//! │  │  Database failed? ──── DbError ─────► ApiError ───►│          │  │
//! │  │         ▼                                          ▼          │  │
//! │  │  Success ────────────────────────────────────────────────────►│  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │                                                                     │
//! │  { "code": "INSUFFICIENT_STOCK",                                    │
//! │    "message": "Insufficient stock for Wax: available 3, ..." }      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is scoped to the single requested operation and surfaced
//! to the initiating caller; nothing here is fatal to the process.

use serde::Serialize;

use invictus_core::{CoreError, ValidationError};
use invictus_db::DbError;

/// API error returned from store operations.
///
/// ## Serialization
/// This is what the interface receives when an operation fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Lot not found: 3f2a..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced lot/record absent
    NotFound,

    /// Input validation failed (caught before any mutation)
    ValidationError,

    /// Requested sale quantity exceeds available stock
    InsufficientStock,

    /// The caller's role lacks the capability for this operation
    Forbidden,

    /// Remote store call failed
    DatabaseError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a forbidden error naming the denied operation.
    pub fn forbidden(operation: &str) -> Self {
        ApiError::new(
            ErrorCode::Forbidden,
            format!("Your role may not {}", operation),
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(name) => ApiError::not_found("Product", &name),
            CoreError::LotNotFound { .. } => {
                ApiError::new(ErrorCode::NotFound, err.to_string())
            }
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::Validation(v) => v.into(),
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Corrupt(e) => {
                tracing::error!("Corrupt stored data: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Stored data could not be read")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
