//! Property Pricing Config Model

use serde::{Deserialize, Serialize};

/// Which days of the week are priced as weekend (index 0 = Monday)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    pub id: i64,
    pub property_id: i64,
    pub weekend_days: Vec<bool>,
}

/// Replace pricing config payload (`PUT`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfigUpdate {
    pub weekend_days: Vec<bool>,
}

impl Default for PricingConfigUpdate {
    /// Saturday and Sunday
    fn default() -> Self {
        Self {
            weekend_days: vec![false, false, false, false, false, true, true],
        }
    }
}
