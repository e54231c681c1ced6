//! Driven port for barangay claim storage.
use async_trait::async_trait;

use crate::domain::{BarangayClaim, BarangayCode, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by claim repository adapters.
    pub enum ClaimRepositoryError {
        /// The backing store failed.
        Storage { message: String } => "claim store failed: {message}",
    }
}

/// Storage of barangay claims.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClaimRepository: Send + Sync {
    /// Claim `code` for the given user if nobody holds it yet.
    ///
    /// Returns `Ok(None)` when the code is already claimed; the existing claim
    /// is left untouched. The existence check and insert are indivisible.
    async fn claim(
        &self,
        code: &BarangayCode,
        user_id: &UserId,
        username: &Username,
    ) -> Result<Option<BarangayClaim>, ClaimRepositoryError>;

    /// Fetch the claim for `code`, if any.
    async fn find(&self, code: &BarangayCode) -> Result<Option<BarangayClaim>, ClaimRepositoryError>;

    /// Every claim, ordered by claim time then code.
    async fn list_all(&self) -> Result<Vec<BarangayClaim>, ClaimRepositoryError>;
}
