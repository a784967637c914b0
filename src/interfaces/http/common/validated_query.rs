//! Validated query-string extractor for Axum
//!
//! `ValidatedQuery<T>` works like `axum::extract::Query<T>`, but additionally
//! runs `validator::Validate::validate()` on the deserialized value, so the
//! handler is never invoked with bad parameters.
//!
//! Declare query fields as `Option<_>` and mark them `required`: a field
//! failing `required` is reported as missing, any other failure as invalid.
//! A repeated key keeps its last value.

use std::collections::BTreeMap;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::interfaces::http::error::ApiError;

pub struct ValidatedQuery<T>(pub T);

fn rejection_from(errors: &ValidationErrors) -> ApiError {
    let mut missing = Vec::new();
    let mut invalid = BTreeMap::new();

    for (field, errs) in errors.field_errors() {
        if errs.iter().any(|e| e.code == "required") {
            missing.push(field.to_string());
            continue;
        }
        let message = errs
            .iter()
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid parameter.".to_string());
        invalid.insert(field.to_string(), message);
    }

    if !missing.is_empty() {
        missing.sort();
        ApiError::missing_params(missing)
    } else {
        ApiError::invalid_params(invalid)
    }
}

fn parse_query<T: DeserializeOwned>(query: &str) -> Result<T, String> {
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_str(query).map_err(|e| e.to_string())?;

    let mut last: Vec<(String, String)> = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        match last.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => last.push((key, value)),
        }
    }

    let canonical = serde_urlencoded::to_string(&last).map_err(|e| e.to_string())?;
    serde_urlencoded::from_str(&canonical).map_err(|e| e.to_string())
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parse_query::<T>(parts.uri.query().unwrap_or_default()).map_err(|e| {
            let mut params = BTreeMap::new();
            params.insert(
                "query".to_string(),
                format!("Failed to deserialize query string: {e}"),
            );
            ApiError::invalid_params(params)
        })?;

        value.validate().map_err(|e| rejection_from(&e))?;

        Ok(ValidatedQuery(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────
