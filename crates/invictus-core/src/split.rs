//! # Revenue Split Calculator
//!
//! Turns a submitted service into the monetary allocation between barber
//! and shop.
//!
//! ## The Split Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Service value: $30.000          Tip: $5.000                        │
//! │        │                           │                                │
//! │        ▼                           │                                │
//! │   50 / 50 split                    │ 100% pass-through              │
//! │    ┌───────┐                       │                                │
//! │    ▼       ▼                       ▼                                │
//! │  Shop    Barber ◄──────────────── tip                               │
//! │  $15.000 $15.000 + $5.000 = $20.000                                 │
//! │                                                                     │
//! │  total = value + tip = $35.000                                      │
//! │  shop + barber = total   (always, to the centavo)                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tip is added after the split and the total includes it. When the
//! service value is an odd number of centavos the barber takes the odd
//! centavo, so `admin + barber == total` holds exactly.
//!
//! Pure computation: no timestamps, no ids, no persistence. The caller
//! stamps and stores the result.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::PaymentMethod;
use crate::validation::{validate_name, validate_non_negative, validate_positive};

// =============================================================================
// Service Ticket (input)
// =============================================================================

/// A service submission from the form. Ephemeral: only the derived
/// [`EarningsSplit`] is kept.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ServiceTicket {
    /// Which barber performed the service.
    pub barber_name: String,

    /// Value charged for the service itself (centavos, must be > 0).
    pub service_value_cents: i64,

    /// Tip, if any (centavos, >= 0).
    pub tip_cents: i64,

    /// How the customer paid.
    pub payment_method: PaymentMethod,

    /// Free-form observations.
    pub notes: Option<String>,
}

impl ServiceTicket {
    /// Returns the service value as Money.
    #[inline]
    pub fn service_value(&self) -> Money {
        Money::from_cents(self.service_value_cents)
    }

    /// Returns the tip as Money.
    #[inline]
    pub fn tip(&self) -> Money {
        Money::from_cents(self.tip_cents)
    }
}

// =============================================================================
// Earnings Split (output)
// =============================================================================

/// The monetary allocation derived from one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EarningsSplit {
    /// Barber share: half the service value plus the whole tip.
    pub barber: Money,

    /// Shop share: half the service value.
    pub admin: Money,

    /// Tip (already included in `barber`).
    pub tip: Money,

    /// Service value plus tip.
    pub total: Money,
}

// =============================================================================
// The Calculator
// =============================================================================

/// Computes the revenue split for a service ticket.
///
/// ## Preconditions
/// - `service_value > 0`
/// - `tip >= 0`
/// - `barber_name` non-empty
///
/// On violation returns a [`ValidationError`] and produces nothing — the
/// caller must not persist or display anything for a rejected ticket.
///
/// ## Example
/// ```rust
/// use invictus_core::split::{compute_split, ServiceTicket};
/// use invictus_core::types::PaymentMethod;
///
/// let ticket = ServiceTicket {
///     barber_name: "Barbero 1".to_string(),
///     service_value_cents: 3_000_000,
///     tip_cents: 500_000,
///     payment_method: PaymentMethod::Cash,
///     notes: None,
/// };
/// let split = compute_split(&ticket).unwrap();
/// assert_eq!(split.admin.cents(), 1_500_000);
/// assert_eq!(split.barber.cents(), 2_000_000);
/// assert_eq!(split.total.cents(), 3_500_000);
/// ```
pub fn compute_split(ticket: &ServiceTicket) -> ValidationResult<EarningsSplit> {
    validate_name(&ticket.barber_name, "barber name")?;
    validate_positive(ticket.service_value(), "service value")?;
    validate_non_negative(ticket.tip(), "tip")?;

    let value = ticket.service_value();
    let tip = ticket.tip();

    // The odd centavo of an odd value lands on the barber side.
    let (admin, barber_base) = value.split_half();

    Ok(EarningsSplit {
        barber: barber_base + tip,
        admin,
        tip,
        total: value + tip,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
