//! Tariff service: list cars, read and batch-update daily rates

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::ports::CapabilityCheck;
use crate::domain::{
    Capability, DailyRate, DomainResult, PriceEntry, Principal, RepositoryProvider,
    TariffUpdate, TariffUpdateOutcome, Vehicle,
};

/// Stateless service over the fleet store.
///
/// Every operation first asks the capability port for
/// [`Capability::ManageOptions`].
pub struct TariffService {
    repos: Arc<dyn RepositoryProvider>,
    capabilities: Arc<dyn CapabilityCheck>,
}

impl TariffService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, capabilities: Arc<dyn CapabilityCheck>) -> Self {
        Self {
            repos,
            capabilities,
        }
    }

    /// Apply a batch of price changes, one store update per entry.
    ///
    /// The capability is checked before the payload. Entries are independent:
    /// no transaction spans the batch. An entry whose update fails counts as
    /// zero rows and the rest still run.
    pub async fn update_tariffs(
        &self,
        caller: &Principal,
        vehicle_id: i64,
        entries: Vec<PriceEntry>,
    ) -> DomainResult<TariffUpdateOutcome> {
        self.capabilities
            .require(caller, Capability::ManageOptions)?;

        let update = TariffUpdate::new(vehicle_id, entries)?;
        self.apply(caller, &update).await
    }

    async fn apply(
        &self,
        caller: &Principal,
        update: &TariffUpdate,
    ) -> DomainResult<TariffUpdateOutcome> {
        let vehicle_id = update.vehicle_id();
        let mut rows_updated = 0u64;

        for entry in update.entries() {
            match self
                .repos
                .tariffs()
                .update_cost(vehicle_id, entry.day_count, entry.price)
                .await
            {
                Ok(rows) => rows_updated += rows,
                Err(e) => warn!(
                    vehicle_id,
                    day_count = entry.day_count,
                    error = %e,
                    "Tariff update failed, entry skipped"
                ),
            }
        }

        metrics::counter!("tariff_rows_updated_total").increment(rows_updated);
        info!(
            vehicle_id,
            entries = update.entries().len(),
            rows_updated,
            user = caller.username.as_str(),
            "Tariffs updated"
        );

        Ok(TariffUpdateOutcome { rows_updated })
    }

    /// Daily rates of one vehicle, ascending by day count.
    pub async fn get_tariffs(
        &self,
        caller: &Principal,
        vehicle_id: i64,
    ) -> DomainResult<Vec<DailyRate>> {
        self.capabilities
            .require(caller, Capability::ManageOptions)?;

        let rates = self.repos.tariffs().find_by_vehicle(vehicle_id).await?;
        debug!(vehicle_id, count = rates.len(), "Tariffs loaded");
        Ok(rates)
    }

    /// Every vehicle, ascending by name.
    pub async fn list_cars(&self, caller: &Principal) -> DomainResult<Vec<Vehicle>> {
        self.capabilities
            .require(caller, Capability::ManageOptions)?;

        self.repos.vehicles().list_by_name().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::RoleCapabilityPolicy;
    use crate::domain::DomainError;
    use crate::infrastructure::memory::InMemoryRepositoryProvider;

    fn admin() -> Principal {
        Principal::new("1", "admin", "admin")
    }

    fn fleet() -> Arc<InMemoryRepositoryProvider> {
        Arc::new(
            InMemoryRepositoryProvider::new()
                .with_vehicle(7, "Fiat Egea")
                .with_vehicle(2, "Renault Clio")
                .with_vehicle(9, "Dacia Duster")
                .with_rate(7, 7, 80.0)
                .with_rate(7, 1, 15.0)
                .with_rate(7, 3, 40.0),
        )
    }

    fn service(repos: Arc<InMemoryRepositoryProvider>) -> TariffService {
        TariffService::new(repos, Arc::new(RoleCapabilityPolicy))
    }

    fn prices(entries: &[(i64, f64)]) -> Vec<PriceEntry> {
        entries.iter().map(|&(d, p)| PriceEntry::new(d, p)).collect()
    }

    #[tokio::test]
    async fn updates_existing_rows() {
        let repos = fleet();
        let svc = service(repos.clone());

        let outcome = svc
            .update_tariffs(&admin(), 7, prices(&[(3, 45.0), (7, 90.0)]))
            .await
            .unwrap();

        assert_eq!(outcome.rows_updated, 2);
        assert_eq!(repos.cost(7, 3), Some(45.0));
        assert_eq!(repos.cost(7, 7), Some(90.0));
    }

    #[tokio::test]
    async fn missing_rows_count_zero_and_are_not_created() {
        let repos = fleet();
        let svc = service(repos.clone());

        let outcome = svc
            .update_tariffs(&admin(), 7, prices(&[(3, 45.0), (30, 500.0)]))
            .await
            .unwrap();

        assert_eq!(outcome.rows_updated, 1);
        assert_eq!(repos.cost(7, 30), None);
        assert_eq!(repos.row_count(), 3);
    }

    #[tokio::test]
    async fn valid_payload_matching_nothing_still_succeeds() {
        let repos = fleet();
        let outcome = service(repos)
            .update_tariffs(&admin(), 42, prices(&[(1, 10.0)]))
            .await
            .unwrap();
        assert_eq!(outcome.rows_updated, 0);
    }

    #[tokio::test]
    async fn failed_entry_is_skipped_and_siblings_still_apply() {
        let repos = fleet();
        repos.fail_updates_for_day(3);
        let svc = service(repos.clone());

        let outcome = svc
            .update_tariffs(&admin(), 7, prices(&[(1, 20.0), (3, 45.0), (7, 90.0)]))
            .await
            .unwrap();

        assert_eq!(outcome.rows_updated, 2);
        assert_eq!(repos.cost(7, 1), Some(20.0));
        assert_eq!(repos.cost(7, 3), Some(40.0));
        assert_eq!(repos.cost(7, 7), Some(90.0));
    }

    #[tokio::test]
    async fn duplicate_day_counts_last_write_wins() {
        let repos = fleet();
        let svc = service(repos.clone());

        let outcome = svc
            .update_tariffs(&admin(), 7, prices(&[(3, 41.0), (3, 42.0)]))
            .await
            .unwrap();

        assert_eq!(outcome.rows_updated, 2);
        assert_eq!(repos.cost(7, 3), Some(42.0));
    }

    #[tokio::test]
    async fn repeated_update_is_idempotent() {
        let repos = fleet();
        let svc = service(repos.clone());
        let batch = prices(&[(3, 45.0), (7, 90.0)]);

        let first = svc.update_tariffs(&admin(), 7, batch.clone()).await.unwrap();
        let second = svc.update_tariffs(&admin(), 7, batch).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repos.cost(7, 3), Some(45.0));
        assert_eq!(repos.cost(7, 7), Some(90.0));
    }

    #[tokio::test]
    async fn invalid_payload_writes_nothing() {
        let repos = fleet();
        let svc = service(repos.clone());

        let cases = [
            (0, prices(&[(3, 1.0)])),
            (-4, prices(&[(3, 1.0)])),
            (7, Vec::new()),
        ];
        for (vehicle_id, entries) in cases {
            let err = svc
                .update_tariffs(&admin(), vehicle_id, entries)
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::InvalidPayload(_)));
        }
        assert_eq!(repos.store_calls(), 0);
        assert_eq!(repos.cost(7, 3), Some(40.0));
    }

    #[tokio::test]
    async fn forbidden_is_reported_before_invalid_payload() {
        let viewer = Principal::new("5", "viewer", "subscriber");
        let err = service(fleet())
            .update_tariffs(&viewer, 0, Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn get_tariffs_is_ordered_by_day() {
        let rates = service(fleet()).get_tariffs(&admin(), 7).await.unwrap();
        let days: Vec<i64> = rates.iter().map(|r| r.day).collect();
        assert_eq!(days, vec![1, 3, 7]);
        assert_eq!(rates[0].cost, 15.0);
    }

    #[tokio::test]
    async fn get_tariffs_for_vehicle_without_rows_is_empty() {
        let rates = service(fleet()).get_tariffs(&admin(), 2).await.unwrap();
        assert!(rates.is_empty());
    }

    #[tokio::test]
    async fn list_cars_is_ordered_by_name() {
        let cars = service(fleet()).list_cars(&admin()).await.unwrap();
        let names: Vec<&str> = cars.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Dacia Duster", "Fiat Egea", "Renault Clio"]);
        assert_eq!(cars[0].id, 9);
    }

    #[tokio::test]
    async fn read_failures_carry_the_store_message() {
        let repos = fleet();
        repos.fail_with(Some("Table 'wp_vikrentcar_cars' doesn't exist"));
        let svc = service(repos);

        let err = svc.list_cars(&admin()).await.unwrap_err();
        assert!(
            matches!(err, DomainError::Store(ref m) if m == "Table 'wp_vikrentcar_cars' doesn't exist")
        );

        let err = svc.get_tariffs(&admin(), 7).await.unwrap_err();
        assert!(matches!(err, DomainError::Store(_)));
    }

    #[tokio::test]
    async fn non_admin_is_forbidden_without_touching_the_store() {
        let repos = fleet();
        let svc = service(repos.clone());
        let viewer = Principal::new("5", "viewer", "subscriber");

        let err = svc
            .update_tariffs(&viewer, 7, prices(&[(3, 1.0)]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert!(matches!(
            svc.list_cars(&viewer).await,
            Err(DomainError::Forbidden(_))
        ));
        assert_eq!(repos.store_calls(), 0);
        assert_eq!(repos.cost(7, 3), Some(40.0));
    }
}
