//! Authentication middleware for Axum
//!
//! Accepts `Authorization: Bearer <jwt>` or `Authorization: Basic <base64>`
//! and stores the resulting [`Principal`] in the request extensions.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::debug;

use crate::application::IdentityService;
use crate::domain::{DomainResult, Principal};
use crate::interfaces::http::error::ApiError;

/// Authentication state shared by the middleware and the token endpoint
#[derive(Clone)]
pub struct AuthState {
    pub identity: Arc<IdentityService>,
}

/// Credentials carried by an `Authorization` header
#[derive(Debug, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Basic { username: String, password: String },
}

fn parse_basic(encoded: &str) -> Option<Credentials> {
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(Credentials::Basic {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// `None` when the header is absent or uses an unknown scheme.
pub fn extract_credentials(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, rest) = value.split_once(' ')?;

    if scheme.eq_ignore_ascii_case("bearer") {
        let token = rest.trim();
        (!token.is_empty()).then(|| Credentials::Bearer(token.to_string()))
    } else if scheme.eq_ignore_ascii_case("basic") {
        parse_basic(rest)
    } else {
        None
    }
}

async fn authenticate(
    identity: &Arc<IdentityService>,
    credentials: Credentials,
) -> DomainResult<Principal> {
    match credentials {
        Credentials::Bearer(token) => identity.verify_bearer(&token),
        Credentials::Basic { username, password } => {
            identity.authenticate_basic(username, password).await
        }
    }
}

/// Rejects unauthenticated requests with 401 `rest_not_logged_in`.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(credentials) = extract_credentials(request.headers()) else {
        return ApiError::not_logged_in().into_response();
    };

    match authenticate(&auth_state.identity, credentials).await {
        Ok(principal) => {
            debug!(user = principal.username.as_str(), "Authenticated");
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// The caller authenticated by [`auth_middleware`]
pub struct Caller(pub Principal);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(Caller)
            .ok_or_else(ApiError::not_logged_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn parses_bearer() {
        assert_eq!(
            extract_credentials(&headers("Bearer abc.def")),
            Some(Credentials::Bearer("abc.def".into()))
        );
        assert_eq!(extract_credentials(&headers("Bearer ")), None);
    }

    #[test]
    fn parses_basic_with_colon_in_password() {
        let encoded = STANDARD.encode("yasem:pa:ss word");
        assert_eq!(
            extract_credentials(&headers(&format!("Basic {encoded}"))),
            Some(Credentials::Basic {
                username: "yasem".into(),
                password: "pa:ss word".into()
            })
        );
    }

    #[test]
    fn rejects_unknown_or_malformed() {
        assert_eq!(extract_credentials(&HeaderMap::new()), None);
        assert_eq!(extract_credentials(&headers("Digest abc")), None);
        assert_eq!(extract_credentials(&headers("Basic !!!")), None);
        let no_colon = STANDARD.encode("justuser");
        assert_eq!(extract_credentials(&headers(&format!("Basic {no_colon}"))), None);
    }
}
