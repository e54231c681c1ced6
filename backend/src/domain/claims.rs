//! Barangay claim service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    BarangayClaimsCommand, BarangayClaimsQuery, ClaimRepository, ClaimRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{BarangayClaim, BarangayCode, ClaimStatus, Error, UserId};

pub(crate) const ALREADY_CLAIMED: &str = "Barangay already claimed by another user";

/// Claim service implementing the claim driving ports.
pub struct BarangayClaimsService<U, C> {
    users: Arc<U>,
    claims: Arc<C>,
}

impl<U, C> Clone for BarangayClaimsService<U, C> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            claims: Arc::clone(&self.claims),
        }
    }
}

impl<U, C> BarangayClaimsService<U, C> {
    /// Create a service over the user and claim repositories.
    pub fn new(users: Arc<U>, claims: Arc<C>) -> Self {
        Self { users, claims }
    }
}

fn map_claim_error(err: ClaimRepositoryError) -> Error {
    match err {
        ClaimRepositoryError::Storage { message } => {
            Error::internal(format!("claim repository error: {message}"))
        }
    }
}

fn map_user_error(err: UserRepositoryError) -> Error {
    Error::internal(format!("user repository error: {err}"))
}

#[async_trait]
impl<U, C> BarangayClaimsCommand for BarangayClaimsService<U, C>
where
    U: UserRepository,
    C: ClaimRepository,
{
    async fn claim(&self, user_id: &UserId, code: &BarangayCode) -> Result<BarangayClaim, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("User not found"))?;

        let claim = self
            .claims
            .claim(code, user.id(), user.username())
            .await
            .map_err(map_claim_error)?
            .ok_or_else(|| {
                Error::conflict(ALREADY_CLAIMED).with_details(json!({
                    "barangayCode": code.as_str(),
                    "code": "already_claimed",
                }))
            })?;
        info!(barangay = %code, user_id = %user_id, "barangay claimed");
        Ok(claim)
    }
}

#[async_trait]
impl<U, C> BarangayClaimsQuery for BarangayClaimsService<U, C>
where
    U: UserRepository,
    C: ClaimRepository,
{
    async fn status(&self, code: &BarangayCode) -> Result<ClaimStatus, Error> {
        self.claims
            .find(code)
            .await
            .map(ClaimStatus::from)
            .map_err(map_claim_error)
    }

    async fn list(&self) -> Result<Vec<BarangayClaim>, Error> {
        self.claims.list_all().await.map_err(map_claim_error)
    }
}
