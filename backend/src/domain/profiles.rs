//! Public profile service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    ProfileRepository, ProfileRepositoryError, UserProfileCommand, UserProfileQuery,
    UserRepository,
};
use crate::domain::{Error, ProfileFields, UserId, UserProfile};

/// Profile service implementing the profile driving ports.
pub struct UserProfileService<U, P> {
    users: Arc<U>,
    profiles: Arc<P>,
}

impl<U, P> Clone for UserProfileService<U, P> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            profiles: Arc::clone(&self.profiles),
        }
    }
}

impl<U, P> UserProfileService<U, P> {
    /// Create a service over the user and profile repositories.
    pub fn new(users: Arc<U>, profiles: Arc<P>) -> Self {
        Self { users, profiles }
    }
}

fn map_profile_error(err: ProfileRepositoryError) -> Error {
    match err {
        ProfileRepositoryError::Storage { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
    }
}

#[async_trait]
impl<U, P> UserProfileCommand for UserProfileService<U, P>
where
    U: UserRepository,
    P: ProfileRepository,
{
    async fn save(&self, user_id: &UserId, fields: ProfileFields) -> Result<UserProfile, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|err| Error::internal(format!("user repository error: {err}")))?
            .ok_or_else(|| Error::unauthorized("User not found"))?;

        let profile = UserProfile::new(user.id().clone(), user.username().clone(), fields);
        self.profiles
            .save(&profile)
            .await
            .map_err(map_profile_error)?;
        Ok(profile)
    }
}

#[async_trait]
impl<U, P> UserProfileQuery for UserProfileService<U, P>
where
    U: UserRepository,
    P: ProfileRepository,
{
    async fn fetch(&self, username: &str) -> Result<Option<UserProfile>, Error> {
        self.profiles
            .find_by_username(username)
            .await
            .map_err(map_profile_error)
    }
}
