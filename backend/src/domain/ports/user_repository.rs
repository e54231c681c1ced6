//! Driven port for user identity storage.
use async_trait::async_trait;

use crate::domain::{PasswordHash, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Another account already uses this exact username.
        DuplicateUsername { username: String } => "username {username} already exists",
        /// The backing store failed (lock poisoned, snapshot write failed, ...).
        Storage { message: String } => "user store failed: {message}",
    }
}

/// Storage of registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user with a freshly generated id.
    ///
    /// The username uniqueness check and the insert form one atomic step;
    /// implementations must not rely on callers checking first.
    async fn create_user(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<User, UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by exact, case-sensitive username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError>;
}
