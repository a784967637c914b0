//! Names of the externally owned fleet tables
//!
//! The tables are created and migrated by another system, so every
//! identifier the repositories touch is configurable.

use serde::{Deserialize, Serialize};

/// Table and column names of the vehicle and tariff tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSchema {
    pub vehicles_table: String,
    pub vehicle_id_column: String,
    pub vehicle_name_column: String,

    pub tariffs_table: String,
    /// Vehicle reference in the tariff table
    pub tariff_vehicle_column: String,
    pub tariff_days_column: String,
    pub tariff_cost_column: String,
}

impl StoreSchema {
    /// VikRentCar layout under the given table prefix (e.g. `wp_`).
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            vehicles_table: format!("{}vikrentcar_cars", prefix),
            vehicle_id_column: "id".to_string(),
            vehicle_name_column: "name".to_string(),
            tariffs_table: format!("{}vikrentcar_dispcost", prefix),
            tariff_vehicle_column: "idcar".to_string(),
            tariff_days_column: "days".to_string(),
            tariff_cost_column: "cost".to_string(),
        }
    }
}

impl Default for StoreSchema {
    fn default() -> Self {
        Self::with_prefix("wp_")
    }
}
