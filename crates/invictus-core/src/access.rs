//! # Roles & Capabilities
//!
//! A closed set of roles, each with a fixed capability set, checked once
//! at the operation boundary. Capabilities replace string comparisons
//! scattered through the interface: a screen asks "may this role do X?"
//! exactly where X is attempted.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Roles
// =============================================================================

/// Who is driving the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The shop owner: full access including bulk resets.
    Admin,
    /// Auxiliary staff: day-to-day operation, no destructive actions.
    Aux,
    /// An individual barber: sees earnings only.
    Barber,
}

// =============================================================================
// Capabilities
// =============================================================================

/// Everything a role can be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Submit a service through the split calculator.
    RecordService,
    /// See the earnings grid.
    ViewEarnings,
    /// See the raw service register listing.
    ViewRegister,
    /// Receive lots and see the inventory table.
    ManageInventory,
    /// Delete whole lots.
    RemoveLot,
    /// Change a product's advertised sell price.
    EditPrices,
    /// Sell products from stock.
    SellProducts,
    /// Open, update, and settle customer tabs.
    ManageOrders,
    /// See the inventory/sales history and weekly archive.
    ViewHistory,
    /// Download CSV exports.
    ExportData,
    /// Archive the week and wipe the register, or purge everything.
    BulkReset,
}

impl Role {
    /// The capability set of this role.
    pub fn capabilities(&self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Role::Admin => &[
                RecordService,
                ViewEarnings,
                ViewRegister,
                ManageInventory,
                RemoveLot,
                EditPrices,
                SellProducts,
                ManageOrders,
                ViewHistory,
                ExportData,
                BulkReset,
            ],
            Role::Aux => &[
                RecordService,
                ViewEarnings,
                ManageInventory,
                SellProducts,
                ManageOrders,
            ],
            Role::Barber => &[ViewEarnings],
        }
    }

    /// Checks one capability.
    pub fn allows(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_everything() {
        for cap in [
            Capability::RecordService,
            Capability::RemoveLot,
            Capability::BulkReset,
            Capability::ExportData,
        ] {
            assert!(Role::Admin.allows(cap));
        }
    }

    #[test]
    fn test_aux_day_to_day_only() {
        assert!(Role::Aux.allows(Capability::RecordService));
        assert!(Role::Aux.allows(Capability::SellProducts));
        assert!(Role::Aux.allows(Capability::ManageInventory));

        assert!(!Role::Aux.allows(Capability::RemoveLot));
        assert!(!Role::Aux.allows(Capability::EditPrices));
        assert!(!Role::Aux.allows(Capability::ViewRegister));
        assert!(!Role::Aux.allows(Capability::ViewHistory));
        assert!(!Role::Aux.allows(Capability::BulkReset));
    }

    #[test]
    fn test_barber_sees_earnings_only() {
        assert!(Role::Barber.allows(Capability::ViewEarnings));
        assert!(!Role::Barber.allows(Capability::RecordService));
        assert!(!Role::Barber.allows(Capability::SellProducts));
    }
}
