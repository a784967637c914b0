//! Vehicle repository interface

use async_trait::async_trait;

use super::model::Vehicle;
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// All vehicles ordered ascending by name (store collation).
    async fn list_by_name(&self) -> DomainResult<Vec<Vehicle>>;
}
