//! Tariff repository interface

use async_trait::async_trait;

use super::model::DailyRate;
use crate::domain::DomainResult;

#[async_trait]
pub trait TariffRepository: Send + Sync {
    /// Rows of one vehicle ordered ascending by day count.
    async fn find_by_vehicle(&self, vehicle_id: i64) -> DomainResult<Vec<DailyRate>>;

    /// Set `cost` on the row matching `(vehicle_id, day_count)`.
    ///
    /// Returns the affected-row count; `0` when no row matches. Never inserts.
    async fn update_cost(&self, vehicle_id: i64, day_count: i64, cost: f64) -> DomainResult<u64>;
}
