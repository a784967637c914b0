//! Car REST API handlers

use axum::{extract::State, Json};

use super::dto::CarResponse;
use crate::interfaces::http::error::{ApiError, ErrorBody};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::modules::tariffs::TariffAppState;

#[utoipa::path(
    get,
    path = "/cars",
    tag = "Cars",
    security(("bearer_auth" = []), ("basic_auth" = [])),
    responses(
        (status = 200, description = "Vehicles ascending by name", body = Vec<CarResponse>),
        (status = 401, description = "rest_not_logged_in", body = ErrorBody),
        (status = 403, description = "rest_forbidden", body = ErrorBody),
        (status = 500, description = "db_error", body = ErrorBody)
    )
)]
pub async fn list_cars(
    State(state): State<TariffAppState>,
    Caller(caller): Caller,
) -> Result<Json<Vec<CarResponse>>, ApiError> {
    let cars = state.service.list_cars(&caller).await?;
    Ok(Json(cars.into_iter().map(Into::into).collect()))
}
