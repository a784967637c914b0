//! Authentication API handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use validator::Validate;

use super::dto::{TokenRequest, TokenResponse};
use crate::interfaces::http::error::{ApiError, ErrorBody};
use crate::interfaces::http::middleware::{extract_credentials, AuthState, Credentials};

#[utoipa::path(
    post,
    path = "/auth/token",
    tag = "Authentication",
    security((), ("basic_auth" = [])),
    request_body(content = TokenRequest, description = "Used when no Basic header is sent"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "invalid_payload", body = ErrorBody),
        (status = 401, description = "rest_not_logged_in", body = ErrorBody)
    )
)]
pub async fn issue_token(
    State(state): State<AuthState>,
    headers: HeaderMap,
    body: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let (username, password) = match (extract_credentials(&headers), body) {
        (Some(Credentials::Basic { username, password }), _) => (username, password),
        (_, Ok(Json(request))) => {
            request
                .validate()
                .map_err(|e| ApiError::invalid_payload(e.to_string()))?;
            (request.username, request.password)
        }
        (_, Err(JsonRejection::MissingJsonContentType(_))) => {
            return Err(ApiError::not_logged_in())
        }
        (_, Err(rejection)) => return Err(ApiError::invalid_payload(rejection.body_text())),
    };

    let result = state.identity.sign_in(username, password).await?;
    Ok(Json(result.into()))
}
