//! # Validation Module
//!
//! Input validation for the engine's operation boundary.
//!
//! Every mutating operation validates first and touches state only after
//! all checks pass, so a rejected request is guaranteed to have no
//! effect. The interface layer may pre-validate for instant feedback;
//! these checks are the authoritative ones.

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::{MAX_NAME_LEN, MAX_SALE_QUANTITY};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a person or product name field.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_LEN`] characters
///
/// Returns the trimmed name so storage never carries stray whitespace.
///
/// ## Example
/// ```rust
/// use invictus_core::validation::validate_name;
///
/// assert_eq!(validate_name("  Wax  ", "product name").unwrap(), "Wax");
/// assert!(validate_name("", "product name").is_err());
/// ```
pub fn validate_name(name: &str, field: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_SALE_QUANTITY`] (guards against a mistyped
///   1000 where 10 was meant)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_SALE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_SALE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a strictly positive amount (service values).
pub fn validate_positive(amount: Money, field: &str) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a non-negative amount (tips, prices, purchase costs —
/// zero is allowed, e.g. promotional stock received for free).
pub fn validate_non_negative(amount: Money, field: &str) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("Wax", "product name").unwrap(), "Wax");
        assert_eq!(validate_name("  Barbero 1 ", "barber").unwrap(), "Barbero 1");

        assert!(validate_name("", "product name").is_err());
        assert!(validate_name("   ", "product name").is_err());
        assert!(validate_name(&"a".repeat(200), "product name").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_amounts() {
        assert!(validate_positive(Money::from_cents(1), "value").is_ok());
        assert!(validate_positive(Money::zero(), "value").is_err());
        assert!(validate_positive(Money::from_cents(-1), "value").is_err());

        assert!(validate_non_negative(Money::zero(), "tip").is_ok());
        assert!(validate_non_negative(Money::from_cents(500), "tip").is_ok());
        assert!(validate_non_negative(Money::from_cents(-1), "tip").is_err());
    }
}
