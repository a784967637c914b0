//! HTTP error responses
//!
//! Every failure is rendered as
//! `{"code": "...", "message": "...", "data": {"status": <u16>}}`,
//! with a `params` map added to `data` for query parameter failures.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

pub const INVALID_PAYLOAD: &str = "invalid_payload";
pub const DB_ERROR: &str = "db_error";
pub const MISSING_PARAM: &str = "rest_missing_callback_param";
pub const INVALID_PARAM: &str = "rest_invalid_param";
pub const NOT_LOGGED_IN: &str = "rest_not_logged_in";
pub const FORBIDDEN: &str = "rest_forbidden";

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable description
    pub message: String,
    pub data: ErrorData,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorData {
    /// HTTP status code
    pub status: u16,
    /// Offending query parameters and why they were rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, String>>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    params: Option<BTreeMap<String, String>>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            params: None,
        }
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, INVALID_PAYLOAD, message)
    }

    pub fn not_logged_in() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            NOT_LOGGED_IN,
            "You are not currently logged in.",
        )
    }

    /// Required query parameters that were absent
    pub fn missing_params(names: Vec<String>) -> Self {
        let message = format!("Missing parameter(s): {}", names.join(", "));
        let params = names
            .into_iter()
            .map(|n| (n, "Required parameter.".to_string()))
            .collect();
        Self::new(StatusCode::BAD_REQUEST, MISSING_PARAM, message).with_params(params)
    }

    /// Query parameters that failed validation
    pub fn invalid_params(params: BTreeMap<String, String>) -> Self {
        let names: Vec<&str> = params.keys().map(String::as_str).collect();
        let message = format!("Invalid parameter(s): {}", names.join(", "));
        Self::new(StatusCode::BAD_REQUEST, INVALID_PARAM, message).with_params(params)
    }

    fn with_params(mut self, params: BTreeMap<String, String>) -> Self {
        self.params = Some(params);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidPayload(message) => Self::invalid_payload(message),
            DomainError::Store(message) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, DB_ERROR, message)
            }
            DomainError::Unauthorized(message) => {
                Self::new(StatusCode::UNAUTHORIZED, NOT_LOGGED_IN, message)
            }
            DomainError::Forbidden(_) => Self::new(
                StatusCode::FORBIDDEN,
                FORBIDDEN,
                "Sorry, you are not allowed to do that.",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.code, message = %self.message, "Request failed");
        }

        let body = ErrorBody {
            code: self.code.to_string(),
            message: self.message,
            data: ErrorData {
                status: self.status.as_u16(),
                params: self.params,
            },
        };
        (self.status, Json(body)).into_response()
    }
}
