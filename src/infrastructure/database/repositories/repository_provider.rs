//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{RepositoryProvider, TariffRepository, VehicleRepository};
use crate::infrastructure::database::StoreSchema;

use super::tariff_repository::SeaOrmTariffRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone(), StoreSchema::default());
/// let cars = repos.vehicles().list_by_name().await?;
/// let rates = repos.tariffs().find_by_vehicle(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    vehicles: SeaOrmVehicleRepository,
    tariffs: SeaOrmTariffRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection, schema: StoreSchema) -> Self {
        Self {
            vehicles: SeaOrmVehicleRepository::new(db.clone(), schema.clone()),
            tariffs: SeaOrmTariffRepository::new(db, schema),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn tariffs(&self) -> &dyn TariffRepository {
        &self.tariffs
    }
}
