//! # Shop Configuration
//!
//! Configuration for one shop: its display name and the barber roster.
//!
//! The roster drives the earnings grid and the earnings CSV export —
//! every rostered barber gets a row even with zero earnings, so a slow
//! week is visible instead of silently missing. Read-only after startup,
//! so no lock is needed.

use serde::{Deserialize, Serialize};

/// Shop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopConfig {
    /// Shop name, used in export headings.
    pub shop_name: String,

    /// The barbers working at this shop, in display order.
    pub barbers: Vec<String>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            shop_name: "Invictus".to_string(),
            barbers: vec![
                "Barbero 1".to_string(),
                "Barbero 2".to_string(),
                "Barbero 3".to_string(),
                "Barbero 4".to_string(),
            ],
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let config = ShopConfig::default();
        assert_eq!(config.shop_name, "Invictus");
        assert_eq!(config.barbers.len(), 4);
        assert_eq!(config.barbers[0], "Barbero 1");
    }
}
