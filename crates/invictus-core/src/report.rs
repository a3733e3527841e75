//! # Reporting Aggregation
//!
//! Pure sums over recorded services and sales. These feed the earnings
//! grid, the register listing, the CSV exports, and the weekly archive.
//!
//! All aggregates are commutative sums, so re-reading the records in any
//! order reproduces identical totals. The reconciliation contract:
//!
//! ```text
//!   Σ barber shares  +  Σ admin shares  +  Σ product sale totals
//!      = grand total reported in any export
//! ```
//!
//! (barber shares already include tips, so tips appear exactly once).

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::money::Money;
use crate::types::{Sale, ServiceRecord, WeeklySummary};

// =============================================================================
// Service Aggregates
// =============================================================================

/// Total earnings per barber (their split share plus tips), keyed by
/// barber name.
pub fn earnings_by_barber(records: &[ServiceRecord]) -> BTreeMap<String, Money> {
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();
    for r in records {
        *totals.entry(r.barber_name.clone()).or_default() += r.barber();
    }
    totals
}

/// One barber's total earnings.
pub fn barber_total(records: &[ServiceRecord], barber_name: &str) -> Money {
    records
        .iter()
        .filter(|r| r.barber_name == barber_name)
        .map(|r| r.barber())
        .sum()
}

/// The shop's total service-derived earnings.
pub fn admin_total(records: &[ServiceRecord]) -> Money {
    records.iter().map(|r| r.admin()).sum()
}

/// Total tips disbursed (informational; already inside barber shares).
pub fn tips_total(records: &[ServiceRecord]) -> Money {
    records.iter().map(|r| r.tip()).sum()
}

// =============================================================================
// Sale Aggregates
// =============================================================================

/// Revenue across product sales.
pub fn product_revenue(sales: &[Sale]) -> Money {
    sales.iter().map(|s| s.total()).sum()
}

/// Profit across product sales: Σ (sell − buy) × quantity, using each
/// sale's own frozen cost basis.
pub fn product_profit(sales: &[Sale]) -> Money {
    sales.iter().map(|s| s.profit()).sum()
}

/// Units sold across all products.
pub fn units_sold(sales: &[Sale]) -> i64 {
    sales.iter().map(|s| s.quantity).sum()
}

// =============================================================================
// Combined
// =============================================================================

/// The grand total any export must reconcile to: all barber shares, the
/// shop's service share, and product sales revenue.
pub fn grand_total(records: &[ServiceRecord], sales: &[Sale]) -> Money {
    let barbers: Money = records.iter().map(|r| r.barber()).sum();
    barbers + admin_total(records) + product_revenue(sales)
}

/// Snapshots one week of business into a summary record, taken by the
/// weekly reset just before the transactional tables are wiped.
pub fn build_weekly_summary(
    records: &[ServiceRecord],
    sales: &[Sale],
    week_start: NaiveDate,
    week_end: NaiveDate,
    at: DateTime<Utc>,
) -> WeeklySummary {
    let barber_earnings = earnings_by_barber(records)
        .into_iter()
        .map(|(name, money)| (name, money.cents()))
        .collect();

    WeeklySummary {
        id: Uuid::new_v4().to_string(),
        week_start,
        week_end,
        barber_earnings,
        product_sales_cents: product_revenue(sales).cents(),
        admin_cents: admin_total(records).cents(),
        total_cents: grand_total(records, sales).cents(),
        created_at: at,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
