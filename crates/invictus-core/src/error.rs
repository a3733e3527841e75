//! # Error Types
//!
//! Domain-specific error types for invictus-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  invictus-core errors (this file)                                   │
//! │  ├── CoreError        - Ledger/domain rule violations               │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  invictus-db errors (separate crate)                                │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  invictus-app errors                                                │
//! │  └── ApiError         - What the interface layer sees (serialized)  │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → ApiError → interface           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, index, counts)
//! 3. Errors are enum variants, never String
//! 4. Every failure is scoped to the single requested operation;
//!    nothing here is fatal to the process

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the ledger and split calculator.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No catalog entry or stock lot exists under this product name.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A lot index is out of range for the current lot list.
    #[error("No stock lot at index {index}")]
    LotNotFound { index: usize },

    /// A sale requested more units than all lots of the product hold
    /// together. The ledger mutates nothing when this is raised.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any state is touched, so a rejected request leaves the
/// ledger and the persisted records exactly as they were.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative (zero is allowed).
    #[error("{field} must not be negative")]
    Negative { field: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Wax".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Wax: available 3, requested 5"
        );

        let err = CoreError::LotNotFound { index: 7 };
        assert_eq!(err.to_string(), "No stock lot at index 7");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "barber name".to_string(),
        };
        assert_eq!(err.to_string(), "barber name is required");

        let err = ValidationError::MustBePositive {
            field: "service value".to_string(),
        };
        assert_eq!(err.to_string(), "service value must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
