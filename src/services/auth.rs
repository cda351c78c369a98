//! Authentication and user account service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
    /// Tokens revoked by logout; checked by the request extractor.
    /// In-process only, cleared on restart together with token validity.
    revoked_tokens: Arc<RwLock<HashSet<String>>>,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self {
            repository,
            config,
            revoked_tokens: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Authenticate by username and password, returning a JWT and the user
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !user.active {
            return Err(AppError::Authentication("Account is inactive".to_string()));
        }

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            role: user.role,
            property_id: user.property_id,
            exp,
            iat: now,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok((token, user))
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(&user.password)
            .map_err(|e| AppError::Internal(format!("Corrupt password hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Create a user account (admin only, checked at the API layer through
    /// claims)
    pub async fn create_user(&self, data: &CreateUser) -> AppResult<i32> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let hash = self.hash_password(&data.password)?;
        self.repository.users.create(data, &hash).await
    }

    /// Revoke a token at logout
    pub fn revoke_token(&self, token: &str) {
        let mut revoked = self
            .revoked_tokens
            .write()
            .unwrap_or_else(|e| e.into_inner());
        revoked.insert(token.to_string());
    }

    /// Whether a token was revoked by logout
    pub fn is_revoked(&self, token: &str) -> bool {
        let revoked = self
            .revoked_tokens
            .read()
            .unwrap_or_else(|e| e.into_inner());
        revoked.contains(token)
    }
}
