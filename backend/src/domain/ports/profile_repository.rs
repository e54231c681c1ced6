//! Driven port for public profile storage.
use async_trait::async_trait;

use crate::domain::UserProfile;

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// The backing store failed.
        Storage { message: String } => "profile store failed: {message}",
    }
}

/// Storage of public profiles, keyed by case-folded username.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert or wholly replace the profile under [`UserProfile::key`].
    async fn save(&self, profile: &UserProfile) -> Result<(), ProfileRepositoryError>;

    /// Look a profile up; `username` is lowercased before matching.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserProfile>, ProfileRepositoryError>;
}
