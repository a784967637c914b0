//! JWT token handling

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::Principal;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

/// 32 random bytes, base64 encoded
pub fn generate_secret() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    STANDARD.encode(bytes)
}

impl Default for JwtConfig {
    /// Uses a freshly generated secret.
    fn default() -> Self {
        Self {
            secret: generate_secret(),
            expiration_hours: 24,
            issuer: "rental-tariffs".to_string(),
        }
    }
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
}

impl TokenClaims {
    pub fn for_principal(principal: &Principal, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: principal.subject.clone(),
            username: principal.username.clone(),
            role: principal.role.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    pub fn into_principal(self) -> Principal {
        Principal::new(self.sub, self.username, self.role)
    }
}

/// Sign a token for `principal`
pub fn create_token(
    principal: &Principal,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        &TokenClaims::for_principal(principal, config),
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, issuer and expiry, then decode
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify_token() {
        let config = JwtConfig::default();
        let principal = Principal::new("admin", "admin", "admin");
        let token = create_token(&principal, &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, "admin");
        assert!(!claims.is_expired());
        assert_eq!(claims.into_principal(), principal);
    }

    #[test]
    fn test_invalid_token() {
        let config = JwtConfig::default();
        assert!(verify_token("invalid-token", &config).is_err());
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let config = JwtConfig::default();
        let principal = Principal::new("u", "u", "admin");
        let other = JwtConfig {
            issuer: "someone-else".into(),
            ..config.clone()
        };
        let token = create_token(&principal, &other).unwrap();
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_default_configs_do_not_share_a_secret() {
        let principal = Principal::new("u", "u", "admin");
        let token = create_token(&principal, &JwtConfig::default()).unwrap();
        assert!(verify_token(&token, &JwtConfig::default()).is_err());
    }
}
