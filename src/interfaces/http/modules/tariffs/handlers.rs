//! Tariff REST API handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::debug;

use super::dto::{DailyRateResponse, GetTariffsQuery, UpdateTariffsRequest, UpdateTariffsResponse};
use crate::application::TariffService;
use crate::interfaces::http::common::ValidatedQuery;
use crate::interfaces::http::error::{ApiError, ErrorBody};
use crate::interfaces::http::middleware::Caller;

/// State shared by the tariff and car handlers
#[derive(Clone)]
pub struct TariffAppState {
    pub service: Arc<TariffService>,
}

#[utoipa::path(
    post,
    path = "/tariffs",
    tag = "Tariffs",
    security(("bearer_auth" = []), ("basic_auth" = [])),
    request_body = UpdateTariffsRequest,
    responses(
        (status = 200, description = "Batch applied", body = UpdateTariffsResponse),
        (status = 400, description = "invalid_payload", body = ErrorBody),
        (status = 401, description = "rest_not_logged_in", body = ErrorBody),
        (status = 403, description = "rest_forbidden", body = ErrorBody)
    )
)]
pub async fn update_tariffs(
    State(state): State<TariffAppState>,
    Caller(caller): Caller,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateTariffsResponse>, ApiError> {
    // An unreadable body counts as an empty one; the capability check still runs first.
    let (vehicle_id, entries) = match body {
        Ok(Json(body)) => {
            let request = UpdateTariffsRequest::from_body(body);
            (request.vehicle_id(), request.entries())
        }
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Unreadable tariff payload");
            (0, Vec::new())
        }
    };

    let outcome = state
        .service
        .update_tariffs(&caller, vehicle_id, entries)
        .await?;

    Ok(Json(outcome.into()))
}

#[utoipa::path(
    get,
    path = "/tariffs",
    tag = "Tariffs",
    security(("bearer_auth" = []), ("basic_auth" = [])),
    params(GetTariffsQuery),
    responses(
        (status = 200, description = "Daily rates ascending by day", body = Vec<DailyRateResponse>),
        (status = 400, description = "rest_missing_callback_param or rest_invalid_param", body = ErrorBody),
        (status = 401, description = "rest_not_logged_in", body = ErrorBody),
        (status = 403, description = "rest_forbidden", body = ErrorBody),
        (status = 500, description = "db_error", body = ErrorBody)
    )
)]
pub async fn get_tariffs(
    State(state): State<TariffAppState>,
    Caller(caller): Caller,
    ValidatedQuery(query): ValidatedQuery<GetTariffsQuery>,
) -> Result<Json<Vec<DailyRateResponse>>, ApiError> {
    let rates = state
        .service
        .get_tariffs(&caller, query.vehicle_id())
        .await?;

    Ok(Json(rates.into_iter().map(Into::into).collect()))
}
