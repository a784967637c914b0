//! In-memory repository provider for development and testing
//!
//! Mirrors the store semantics the service relies on: updates only touch
//! existing `(vehicle_id, day_count)` rows, reads come back ordered.
//! Failures can be injected to exercise the error paths.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    DailyRate, DomainError, DomainResult, RepositoryProvider, TariffRepository, Vehicle,
    VehicleRepository,
};

/// Failure switches shared by both repositories
#[derive(Default)]
struct Faults {
    /// Every call fails with this message
    store: RwLock<Option<String>>,
    /// Updates on these day counts fail
    update_days: Mutex<HashSet<i64>>,
    /// Number of repository calls that reached the store
    calls: AtomicUsize,
}

impl Faults {
    fn check(&self) -> DomainResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.store.read().ok().and_then(|g| g.clone()) {
            Some(message) => Err(DomainError::Store(message)),
            None => Ok(()),
        }
    }

    fn check_update(&self, day_count: i64) -> DomainResult<()> {
        self.check()?;
        let failing = self
            .update_days
            .lock()
            .map(|days| days.contains(&day_count))
            .unwrap_or(false);
        if failing {
            return Err(DomainError::Store(format!(
                "update rejected for day count {}",
                day_count
            )));
        }
        Ok(())
    }
}

pub struct InMemoryVehicleRepository {
    vehicles: DashMap<i64, String>,
    faults: Arc<Faults>,
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn list_by_name(&self) -> DomainResult<Vec<Vehicle>> {
        self.faults.check()?;
        let mut vehicles: Vec<Vehicle> = self
            .vehicles
            .iter()
            .map(|e| Vehicle {
                id: *e.key(),
                name: e.value().clone(),
            })
            .collect();
        vehicles.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(vehicles)
    }
}

pub struct InMemoryTariffRepository {
    rows: DashMap<(i64, i64), f64>,
    faults: Arc<Faults>,
}

#[async_trait]
impl TariffRepository for InMemoryTariffRepository {
    async fn find_by_vehicle(&self, vehicle_id: i64) -> DomainResult<Vec<DailyRate>> {
        self.faults.check()?;
        let mut rates: Vec<DailyRate> = self
            .rows
            .iter()
            .filter(|e| e.key().0 == vehicle_id)
            .map(|e| DailyRate {
                day: e.key().1,
                cost: *e.value(),
            })
            .collect();
        rates.sort_by_key(|r| r.day);
        Ok(rates)
    }

    async fn update_cost(&self, vehicle_id: i64, day_count: i64, cost: f64) -> DomainResult<u64> {
        self.faults.check_update(day_count)?;
        match self.rows.get_mut(&(vehicle_id, day_count)) {
            Some(mut row) => {
                *row = cost;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// In-memory fleet store
pub struct InMemoryRepositoryProvider {
    vehicles: InMemoryVehicleRepository,
    tariffs: InMemoryTariffRepository,
    faults: Arc<Faults>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let faults = Arc::new(Faults::default());
        Self {
            vehicles: InMemoryVehicleRepository {
                vehicles: DashMap::new(),
                faults: faults.clone(),
            },
            tariffs: InMemoryTariffRepository {
                rows: DashMap::new(),
                faults: faults.clone(),
            },
            faults,
        }
    }

    pub fn with_vehicle(self, id: i64, name: &str) -> Self {
        self.vehicles.vehicles.insert(id, name.to_string());
        self
    }

    pub fn with_rate(self, vehicle_id: i64, day_count: i64, cost: f64) -> Self {
        self.tariffs.rows.insert((vehicle_id, day_count), cost);
        self
    }

    /// Current cost of a row, if it exists.
    pub fn cost(&self, vehicle_id: i64, day_count: i64) -> Option<f64> {
        self.tariffs.rows.get(&(vehicle_id, day_count)).map(|c| *c)
    }

    pub fn row_count(&self) -> usize {
        self.tariffs.rows.len()
    }

    /// Reads and writes issued against this store so far.
    pub fn store_calls(&self) -> usize {
        self.faults.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with `message` (`None` clears it).
    pub fn fail_with(&self, message: Option<&str>) {
        if let Ok(mut store) = self.faults.store.write() {
            *store = message.map(String::from);
        }
    }

    /// Make updates of rows with this day count fail.
    pub fn fail_updates_for_day(&self, day_count: i64) {
        if let Ok(mut days) = self.faults.update_days.lock() {
            days.insert(day_count);
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn tariffs(&self) -> &dyn TariffRepository {
        &self.tariffs
    }
}
