//! Car DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Vehicle;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CarResponse {
    /// Vehicle id
    pub idcar: i64,
    pub name: String,
}

impl From<Vehicle> for CarResponse {
    fn from(v: Vehicle) -> Self {
        Self {
            idcar: v.id,
            name: v.name,
        }
    }
}
