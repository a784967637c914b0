//! Tariff domain entities

use crate::domain::{DomainError, DomainResult};

/// Message returned for every structurally invalid update request.
pub const INVALID_UPDATE_MESSAGE: &str =
    "car_id must be > 0 and prices must be a non-empty object";

/// Price of renting one vehicle for `day` days
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRate {
    pub day: i64,
    pub cost: f64,
}

/// One `day count -> price` pair of an update request, already coerced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceEntry {
    pub day_count: i64,
    pub price: f64,
}

impl PriceEntry {
    pub fn new(day_count: i64, price: f64) -> Self {
        Self { day_count, price }
    }
}

/// A validated batch of price changes for one vehicle.
///
/// Entries keep the order the client sent them in. Duplicate day counts
/// are kept as-is, so the last one wins when applied in order.
#[derive(Debug, Clone, PartialEq)]
pub struct TariffUpdate {
    vehicle_id: i64,
    entries: Vec<PriceEntry>,
}

impl TariffUpdate {
    /// Fails with `InvalidPayload` when `vehicle_id <= 0` or there are no entries.
    pub fn new(vehicle_id: i64, entries: Vec<PriceEntry>) -> DomainResult<Self> {
        if vehicle_id < 1 || entries.is_empty() {
            return Err(DomainError::invalid_payload(INVALID_UPDATE_MESSAGE));
        }
        Ok(Self {
            vehicle_id,
            entries,
        })
    }

    pub fn vehicle_id(&self) -> i64 {
        self.vehicle_id
    }

    pub fn entries(&self) -> &[PriceEntry] {
        &self.entries
    }
}

/// Result of applying a [`TariffUpdate`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TariffUpdateOutcome {
    /// Sum of affected-row counts over all entries
    pub rows_updated: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_vehicle_id() {
        for id in [0, -1, i64::MIN] {
            let err = TariffUpdate::new(id, vec![PriceEntry::new(1, 10.0)]).unwrap_err();
            assert!(matches!(err, DomainError::InvalidPayload(_)));
        }
    }

    #[test]
    fn rejects_empty_entries() {
        let err = TariffUpdate::new(7, vec![]).unwrap_err();
        assert_eq!(err.to_string(), INVALID_UPDATE_MESSAGE);
    }

    #[test]
    fn keeps_entry_order_and_duplicates() {
        let update = TariffUpdate::new(
            7,
            vec![
                PriceEntry::new(7, 90.0),
                PriceEntry::new(3, 45.0),
                PriceEntry::new(7, 95.0),
            ],
        )
        .unwrap();

        let days: Vec<i64> = update.entries().iter().map(|e| e.day_count).collect();
        assert_eq!(days, vec![7, 3, 7]);
        assert_eq!(update.vehicle_id(), 7);
    }
}
