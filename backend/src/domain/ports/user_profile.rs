//! Driving ports for public profiles.

use async_trait::async_trait;

use crate::domain::{Error, ProfileFields, UserId, UserProfile};

/// Save the signed-in user's profile.
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Replace every public field of the caller's profile.
    ///
    /// Fails with `unauthorized` when the session user no longer exists.
    async fn save(&self, user_id: &UserId, fields: ProfileFields) -> Result<UserProfile, Error>;
}

/// Public lookup of profiles by username.
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Fetch the profile saved under `username`, matched case-insensitively.
    ///
    /// `Ok(None)` means no profile was saved; callers render defaults.
    async fn fetch(&self, username: &str) -> Result<Option<UserProfile>, Error>;
}
