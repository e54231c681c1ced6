//! Driving port for account use-cases: registration, login, and session
//! identity lookup.
//!
//! Inbound adapters call this port with already-shaped credentials and never
//! see password hashes or storage errors.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, SignupCredentials, User, UserId};

/// Domain use-case port for accounts.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new account and return it.
    ///
    /// Fails with `invalid_request` (details code `duplicate_username`) when
    /// the exact username is taken.
    async fn signup(&self, credentials: &SignupCredentials) -> Result<User, Error>;

    /// Check credentials and return the matching user.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Resolve the user behind a session.
    ///
    /// Fails with `unauthorized` when the id no longer names a user, for
    /// example after a reset.
    async fn current_user(&self, user_id: &UserId) -> Result<User, Error>;
}
