//! Driving ports for barangay claims.
//!
//! Commands and queries are split so read-only adapters (the public map
//! overlay) never hold a handle that can mutate claims.

use async_trait::async_trait;

use crate::domain::{BarangayClaim, BarangayCode, ClaimStatus, Error, UserId};

/// Claim a barangay on behalf of the signed-in user.
#[async_trait]
pub trait BarangayClaimsCommand: Send + Sync {
    /// Record a claim on `code` for `user_id`.
    ///
    /// Fails with `unauthorized` when the user no longer exists and with
    /// `conflict` when anyone, including the caller, already holds the code.
    async fn claim(&self, user_id: &UserId, code: &BarangayCode) -> Result<BarangayClaim, Error>;
}

/// Read access to claims.
#[async_trait]
pub trait BarangayClaimsQuery: Send + Sync {
    /// Status of a single barangay.
    async fn status(&self, code: &BarangayCode) -> Result<ClaimStatus, Error>;

    /// All claims, ordered by claim time then code.
    async fn list(&self) -> Result<Vec<BarangayClaim>, Error>;
}
