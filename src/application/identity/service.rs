//! Identity service: credential checks and token issuance
//!
//! HTTP middleware and handlers are thin wrappers that delegate here.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::UserCredential;
use crate::domain::{DomainError, DomainResult, Principal};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig};
use crate::infrastructure::crypto::password::verify_password;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub principal: Principal,
}

/// Authenticates the accounts listed in the configuration.
pub struct IdentityService {
    users: Vec<UserCredential>,
    jwt_config: JwtConfig,
}

impl IdentityService {
    pub fn new(users: Vec<UserCredential>, jwt_config: JwtConfig) -> Self {
        Self { users, jwt_config }
    }

    /// Check a username/password pair.
    pub fn verify_credentials(&self, username: &str, password: &str) -> DomainResult<Principal> {
        let Some(user) = self.users.iter().find(|u| u.username == username) else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => Ok(Principal::new(&user.username, &user.username, &user.role)),
            Ok(false) => Err(DomainError::Unauthorized("Invalid credentials".into())),
            Err(e) => {
                warn!(username, error = %e, "Stored password hash is malformed");
                Err(DomainError::Unauthorized("Invalid credentials".into()))
            }
        }
    }

    /// [`verify_credentials`](Self::verify_credentials) on the blocking pool.
    ///
    /// bcrypt is CPU bound and Basic credentials arrive with every request.
    pub async fn authenticate_basic(
        self: &Arc<Self>,
        username: String,
        password: String,
    ) -> DomainResult<Principal> {
        let identity = Arc::clone(self);
        run_blocking(move || identity.verify_credentials(&username, &password)).await
    }

    /// Check a bearer token's signature, issuer and expiry.
    ///
    /// The subject must still be a configured account; the role is taken
    /// from that account, not from the token.
    pub fn verify_bearer(&self, token: &str) -> DomainResult<Principal> {
        let claims = verify_token(token, &self.jwt_config)
            .map_err(|_| DomainError::Unauthorized("Invalid authentication token".into()))?;
        if claims.is_expired() {
            return Err(DomainError::Unauthorized("Token has expired".into()));
        }

        let Some(user) = self.users.iter().find(|u| u.username == claims.sub) else {
            warn!(subject = claims.sub.as_str(), "Token subject is not a configured user");
            return Err(DomainError::Unauthorized("Invalid authentication token".into()));
        };
        Ok(Principal::new(&user.username, &user.username, &user.role))
    }

    /// Verify credentials and issue a JWT.
    pub fn login(&self, username: &str, password: &str) -> DomainResult<AuthResult> {
        let principal = self.verify_credentials(username, password)?;

        let token = create_token(&principal, &self.jwt_config)
            .map_err(|e| DomainError::Unauthorized(format!("Failed to create token: {}", e)))?;

        info!(username, "Token issued");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            principal,
        })
    }

    /// [`login`](Self::login) on the blocking pool.
    pub async fn sign_in(
        self: &Arc<Self>,
        username: String,
        password: String,
    ) -> DomainResult<AuthResult> {
        let identity = Arc::clone(self);
        run_blocking(move || identity.login(&username, &password)).await
    }
}

async fn run_blocking<T, F>(check: F) -> DomainResult<T>
where
    F: FnOnce() -> DomainResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(check).await.map_err(|e| {
        warn!(error = %e, "Credential check did not complete");
        DomainError::Unauthorized("Invalid credentials".into())
    })?
}
