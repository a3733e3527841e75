//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  Splitting $25,001 fifty/fifty in floats gives two numbers that     │
//! │  may not re-add to $25,001 - and every earnings report here is a    │
//! │  sum that MUST reconcile to the centavo.                            │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Centavos                                     │
//! │    2500100 / 2 = 1250050, remainder 0 - and when there IS a         │
//! │    remainder, split_half hands it to one side explicitly.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invictus_core::money::Money;
//!
//! // Create from centavos (preferred)
//! let value = Money::from_cents(2_500_000); // $25.000,00 COP
//!
//! let (shop, barber) = value.split_half();
//! assert_eq!(shop + barber, value);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in integer centavos (COP).
///
/// ## Design Decisions
/// - **i64 (signed)**: profit figures can go negative when a lot sells
///   below cost
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
///
/// Every monetary value in the system flows through this type; only the
/// interface layer converts to a display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole pesos and centavos.
    ///
    /// For negative amounts only the peso part carries the sign:
    /// `from_pesos_cents(-5, 50)` is -$5,50.
    #[inline]
    pub const fn from_pesos_cents(pesos: i64, cents: i64) -> Self {
        if pesos < 0 {
            Money(pesos * 100 - cents)
        } else {
            Money(pesos * 100 + cents)
        }
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-peso portion.
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Splits the value in half with no centavo lost.
    ///
    /// Returns `(half, half + remainder)`: the first component is the
    /// floored half, the second takes the odd centavo when the amount
    /// doesn't divide evenly. The two components always re-add to the
    /// original value, so any sum over the parts reconciles exactly.
    ///
    /// ## Example
    /// ```rust
    /// use invictus_core::money::Money;
    ///
    /// let even = Money::from_cents(1000);
    /// assert_eq!(even.split_half(), (Money::from_cents(500), Money::from_cents(500)));
    ///
    /// let odd = Money::from_cents(1001);
    /// let (a, b) = odd.split_half();
    /// assert_eq!(a.cents(), 500);
    /// assert_eq!(b.cents(), 501);
    /// assert_eq!(a + b, odd);
    /// ```
    #[inline]
    pub const fn split_half(&self) -> (Money, Money) {
        let half = self.0 / 2;
        (Money(half), Money(self.0 - half))
    }

    /// Multiplies money by a quantity (line totals: unit price × units).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Divides evenly across `qty` units, flooring to the centavo.
    ///
    /// Used to derive a per-unit cost basis from a lot's total purchase
    /// cost. The sub-centavo remainder is intentionally dropped; the lot
    /// total, not the per-unit figure, is the accounting source of truth.
    #[inline]
    pub const fn per_unit(&self, qty: i64) -> Self {
        Money(self.0 / qty)
    }

    /// Formats the value the way the shop reads it: dot-grouped pesos,
    /// comma decimals (`1.234,56`). Used in audit log details and CSV.
    pub fn format_cop(&self) -> String {
        let pesos = self.pesos().abs();
        let mut grouped = String::new();
        let digits = pesos.to_string();
        let first = digits.len() % 3;
        for (i, ch) in digits.chars().enumerate() {
            if i != 0 && (i + 3 - first) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{},{:02}", sign, grouped, self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This is for debugging and log lines. Use [`Money::format_cop`] (or
/// frontend formatting) for anything user-facing.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.pesos().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation for aggregation (earnings reports are sums of Money).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.pesos(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_pesos_cents() {
        let money = Money::from_pesos_cents(10, 99);
        assert_eq!(money.cents(), 1099);

        let negative = Money::from_pesos_cents(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_format_cop() {
        assert_eq!(Money::from_cents(0).format_cop(), "0,00");
        assert_eq!(Money::from_cents(123_456).format_cop(), "1.234,56");
        assert_eq!(Money::from_cents(2_500_000).format_cop(), "25.000,00");
        assert_eq!(Money::from_cents(123_456_789).format_cop(), "1.234.567,89");
        assert_eq!(Money::from_cents(-550).format_cop(), "-5,50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_split_half_even() {
        let (a, b) = Money::from_cents(1000).split_half();
        assert_eq!(a.cents(), 500);
        assert_eq!(b.cents(), 500);
    }

    /// Critical test: an odd amount splits without losing the centavo.
    /// The second component carries the remainder.
    #[test]
    fn test_split_half_odd_reconciles() {
        let odd = Money::from_cents(2_500_101);
        let (a, b) = odd.split_half();
        assert_eq!(a.cents(), 1_250_050);
        assert_eq!(b.cents(), 1_250_051);
        assert_eq!(a + b, odd);
    }

    #[test]
    fn test_per_unit_floors() {
        // $100.00 across 3 units: 3333 centavos each, remainder dropped
        let per_unit = Money::from_cents(10_000).per_unit(3);
        assert_eq!(per_unit.cents(), 3333);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
