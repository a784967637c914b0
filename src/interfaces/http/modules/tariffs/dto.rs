//! Tariff DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::{DailyRate, PriceEntry, TariffUpdateOutcome};
use crate::interfaces::http::common::coerce;

/// Body of `POST /tariffs`.
///
/// Both fields are loose JSON and coerced at the boundary, see
/// [`coerce`](crate::interfaces::http::common::coerce).
#[derive(Debug, Default, ToSchema)]
pub struct UpdateTariffsRequest {
    /// Vehicle id; a number or numeric string
    #[schema(value_type = i64, example = 7)]
    pub car_id: Value,
    /// Day count to price, e.g. `{"3": 45.0, "7": 90.0}`
    #[schema(value_type = Object, example = json!({"3": 45.0, "7": 90.0}))]
    pub prices: Value,
}

impl UpdateTariffsRequest {
    /// Fields are only read from a JSON object; any other body is empty.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(mut fields) => Self {
                car_id: fields.remove("car_id").unwrap_or_default(),
                prices: fields.remove("prices").unwrap_or_default(),
            },
            _ => Self::default(),
        }
    }

    pub fn vehicle_id(&self) -> i64 {
        coerce::coerce_int(&self.car_id)
    }

    pub fn entries(&self) -> Vec<PriceEntry> {
        coerce::price_entries(&self.prices)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateTariffsResponse {
    pub success: bool,
    /// Rows whose cost was written
    pub rows_updated: u64,
}

impl From<TariffUpdateOutcome> for UpdateTariffsResponse {
    fn from(outcome: TariffUpdateOutcome) -> Self {
        Self {
            success: true,
            rows_updated: outcome.rows_updated,
        }
    }
}

fn validate_car_id(value: &str) -> Result<(), ValidationError> {
    match coerce::numeric_int(value) {
        Some(id) if id > 0 => Ok(()),
        _ => Err(ValidationError::new("car_id")
            .with_message("car_id must be a positive number".into())),
    }
}

/// Query of `GET /tariffs`
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetTariffsQuery {
    /// Vehicle id, numeric and > 0
    #[validate(required, custom(function = "validate_car_id"))]
    #[param(value_type = i64, example = 7)]
    pub car_id: Option<String>,
}

impl GetTariffsQuery {
    /// Only meaningful after validation passed.
    pub fn vehicle_id(&self) -> i64 {
        self.car_id.as_deref().and_then(coerce::numeric_int).unwrap_or(0)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DailyRateResponse {
    /// Rental length in days
    pub day: i64,
    pub cost: f64,
}

impl From<DailyRate> for DailyRateResponse {
    fn from(rate: DailyRate) -> Self {
        Self {
            day: rate.day,
            cost: rate.cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_coerces_loose_values() {
        let req = UpdateTariffsRequest::from_body(
            json!({"car_id": "7", "prices": {"3": "45.5", "x": 9}}),
        );
        assert_eq!(req.vehicle_id(), 7);
        assert_eq!(
            req.entries(),
            vec![PriceEntry::new(3, 45.5), PriceEntry::new(0, 9.0)]
        );
    }

    #[test]
    fn absent_fields_coerce_to_nothing() {
        let req = UpdateTariffsRequest::from_body(json!({}));
        assert_eq!(req.vehicle_id(), 0);
        assert!(req.entries().is_empty());
    }

    #[test]
    fn non_object_body_has_no_fields() {
        for body in [json!([7, {"3": 45.0}]), json!("7"), json!(7), Value::Null] {
            let req = UpdateTariffsRequest::from_body(body.clone());
            assert_eq!(req.vehicle_id(), 0, "{body}");
            assert!(req.entries().is_empty(), "{body}");
        }
    }

    #[test]
    fn car_id_rule() {
        for ok in ["1", "7", " 12", "3.9", "1e2"] {
            let q = GetTariffsQuery { car_id: Some(ok.into()) };
            assert!(q.validate().is_ok(), "{ok:?} should pass");
        }
        for bad in ["0", "-3", "0.5", "abc", "7abc", ""] {
            let q = GetTariffsQuery { car_id: Some(bad.into()) };
            assert!(q.validate().is_err(), "{bad:?} should fail");
        }
        assert!(GetTariffsQuery { car_id: None }.validate().is_err());
    }

    #[test]
    fn fractional_car_id_truncates() {
        let q = GetTariffsQuery { car_id: Some("3.9".into()) };
        assert_eq!(q.vehicle_id(), 3);
    }
}
