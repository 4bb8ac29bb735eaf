//! Credential verification and token issuance

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        user::{LoginRequest, TokenResponse},
        TokenClaims, UserCredential,
    },
    repository::UserStore,
};

const INVALID_LOGIN: &str = "Invalid login, password or store location";

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored Argon2 digest
pub fn verify_password(password: &str, digest: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(digest)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Authenticate by login, password and store location, returning a bearer token
    pub async fn authenticate(&self, request: &LoginRequest) -> AppResult<TokenResponse> {
        if request.validate().is_err() {
            tracing::warn!("Login attempt with an empty login name");
            return Err(AppError::Authentication(INVALID_LOGIN.to_string()));
        }

        let user = match self.users.get_by_login(&request.user_id).await? {
            Some(user) => user,
            None => {
                tracing::warn!(login = %request.user_id, "Login attempt for unknown user");
                return Err(AppError::Authentication(INVALID_LOGIN.to_string()));
            }
        };

        let password_ok = verify_password(&request.password, &user.password_hash).unwrap_or_else(|e| {
            tracing::warn!(login = %user.login, "Stored password digest is unreadable: {}", e);
            false
        });
        if !password_ok {
            tracing::warn!(login = %user.login, "Login attempt with wrong password");
            return Err(AppError::Authentication(INVALID_LOGIN.to_string()));
        }

        if user.store_spot != request.store_spot {
            tracing::warn!(
                login = %user.login,
                expected = %user.store_spot,
                claimed = %request.store_spot,
                "Login attempt for another store location"
            );
            return Err(AppError::Authentication(INVALID_LOGIN.to_string()));
        }

        let access_token = self.issue_token(&user)?;
        tracing::info!(login = %user.login, store_spot = %user.store_spot, "User logged in");

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    fn issue_token(&self, user: &UserCredential) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: user.login.clone(),
            store_spot: user.store_spot,
            exp: now + (self.config.token_expiration_minutes as i64 * 60),
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Decode a token, checking signature and expiry
    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        TokenClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|e| AppError::Authentication(format!("Could not validate credentials: {}", e)))
    }

    /// Verify a token and confirm its subject still has an account
    pub async fn authorize(&self, token: &str) -> AppResult<TokenClaims> {
        let claims = self.verify_token(token)?;
        if self.users.get_by_login(&claims.sub).await?.is_none() {
            return Err(AppError::Authentication("Could not validate credentials".to_string()));
        }
        Ok(claims)
    }
}
