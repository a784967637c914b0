//! Repository provider
//!
//! Single access point to every per-aggregate repository.

use super::tariff::TariffRepository;
use super::vehicle::VehicleRepository;

pub trait RepositoryProvider: Send + Sync {
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn tariffs(&self) -> &dyn TariffRepository;
}
