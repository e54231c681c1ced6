//! Driving port for the administrative data wipe.

use async_trait::async_trait;

use crate::domain::Error;

/// Wipe all users, claims, and profiles.
#[async_trait]
pub trait ResetCommand: Send + Sync {
    /// Clear every collection and the durable snapshot.
    async fn reset_all(&self) -> Result<(), Error>;
}
