//! Account service: signup, login, and session identity.
//!
//! Password hashing is CPU-bound, so it runs on Tokio's blocking pool. Port
//! errors are mapped back on the async side so the resulting domain errors
//! still pick up the request trace id.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error};

use crate::domain::ports::{
    AccountService, PasswordHasher, PasswordHasherError, UserRepository, UserRepositoryError,
};
use crate::domain::{Error, LoginCredentials, PasswordHash, SignupCredentials, User, UserId};

pub(crate) const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub(crate) const USERNAME_TAKEN: &str = "Username already exists";

/// Account service implementing [`AccountService`].
pub struct AccountsService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> Clone for AccountsService<U, H> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<U, H> AccountsService<U, H> {
    /// Create a service over the given repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> AccountsService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    fn map_user_error(err: UserRepositoryError) -> Error {
        match err {
            UserRepositoryError::DuplicateUsername { .. } => Self::username_taken(),
            UserRepositoryError::Storage { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    fn map_hasher_error(err: PasswordHasherError) -> Error {
        error!(error = %err, "password hasher failed");
        Error::internal(format!("password hashing failed: {err}"))
    }

    fn username_taken() -> Error {
        Error::invalid_request(USERNAME_TAKEN).with_details(json!({
            "field": "username",
            "code": "duplicate_username",
        }))
    }

    async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = zeroize::Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(Self::map_hasher_error)
    }

    async fn verify_password(&self, hash: PasswordHash, password: &str) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = zeroize::Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(&hash, password.as_str()))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
            .map_err(Self::map_hasher_error)
    }
}

#[async_trait]
impl<U, H> AccountService for AccountsService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn signup(&self, credentials: &SignupCredentials) -> Result<User, Error> {
        let username = credentials.username();
        // Skip the expensive hash when the name is obviously taken; the
        // repository still enforces uniqueness on insert.
        if self
            .users
            .find_by_username(username.as_str())
            .await
            .map_err(Self::map_user_error)?
            .is_some()
        {
            return Err(Self::username_taken());
        }

        let hash = self.hash_password(credentials.password()).await?;
        let user = self
            .users
            .create_user(username, &hash)
            .await
            .map_err(Self::map_user_error)?;
        debug!(user_id = %user.id(), "account created");
        Ok(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(Self::map_user_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .verify_password(user.password_hash().clone(), credentials.password())
            .await?;
        if matches {
            Ok(user)
        } else {
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }

    async fn current_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::unauthorized("User not found"))
    }
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
